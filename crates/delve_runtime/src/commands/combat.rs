//! Fighting.
//!
//! `attack` only opens the encounter; rounds are resolved later through
//! [`Game::run_round`](crate::Game::run_round) as the round interval
//! elapses, and their text arrives on the message bus.

use delve_foundation::{Result, Style};
use delve_parser::ParsedCommand;
use delve_storage::NpcKind;

use super::{missing, npc_here};
use crate::game::GameState;

pub(crate) fn attack(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "whom"));
    }
    let Some(npc) = npc_here(state, &cmd.target) else {
        return Ok(format!("There is no {} here.", cmd.target));
    };
    if npc.kind == NpcKind::Friendly {
        let name = state.realm.paint(&npc.name, Style::Npc);
        return Ok(format!("You can't bring yourself to attack {name}."));
    }
    let id = npc.id.clone();
    Ok(match state.combat.start(&mut state.realm, &id) {
        Ok((message, _ticket)) => message,
        Err(e) => e.to_string(),
    })
}

pub(crate) fn flee(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    Ok(match state.combat.flee(&mut state.realm) {
        Ok(report) if report.destination.is_some() => {
            format!("{}\n\n{}", report.message, state.describe_room())
        }
        Ok(report) => report.message,
        Err(e) => e.to_string(),
    })
}

pub(crate) fn skill(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok("Use which skill?".to_string());
    }
    Ok(queue(state, &cmd.target))
}

/// Handler registered under each skill's id, so `bash` works like
/// `skill bash`.
pub(crate) fn skill_verb(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    Ok(queue(state, &cmd.command))
}

fn queue(state: &mut GameState, query: &str) -> String {
    match state.combat.queue_skill(&mut state.realm, query) {
        Ok(message) => message,
        Err(e) => e.to_string(),
    }
}
