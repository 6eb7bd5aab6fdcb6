//! Looking around, moving, and talking.

use delve_foundation::{Result, Style};
use delve_parser::ParsedCommand;
use delve_parser::stdlib::canonical_direction;
use delve_storage::{Item, Npc};
use tracing::{debug, warn};

use super::{current_room, here, item_here, missing, npc_here, object_of};
use crate::game::GameState;

pub(crate) fn look(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(state.describe_room());
    }
    Ok(describe_target(state, object_of(&cmd.target, &["at"])))
}

pub(crate) fn examine(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    Ok(describe_target(state, &cmd.target))
}

fn describe_target(state: &GameState, query: &str) -> String {
    if let Some(npc) = npc_here(state, query) {
        return describe_npc(state, npc);
    }
    if let Some(item) = item_here(state, query) {
        return describe_item(state, item);
    }
    let player = &state.realm.player;
    let carried = player
        .inventory
        .iter()
        .chain(player.equipped_weapon.iter())
        .chain(player.equipped_armor.iter())
        .find(|item| item.matches(query));
    match carried {
        Some(item) => describe_item(state, item),
        None => format!("You don't see any {query} here."),
    }
}

fn describe_npc(state: &GameState, npc: &Npc) -> String {
    let style = if npc.is_hostile() { Style::Hostile } else { Style::Npc };
    let mut out = state.realm.paint(&npc.name, style);
    if !npc.description.is_empty() {
        out.push('\n');
        out.push_str(&delve_foundation::wrap(&npc.description, state.config.wrap_width));
    }
    let percent = npc.health_percent();
    let condition = if !npc.is_alive() {
        "It is dead."
    } else if percent >= 100 {
        "It is in perfect health."
    } else if percent >= 75 {
        "It is slightly wounded."
    } else if percent >= 50 {
        "It is wounded."
    } else if percent >= 25 {
        "It is badly wounded."
    } else {
        "It is close to death."
    };
    out.push('\n');
    out.push_str(condition);
    if npc.is_hostile() && npc.is_alive() {
        out.push_str(" It looks ready to fight.");
    }
    out
}

fn describe_item(state: &GameState, item: &Item) -> String {
    let mut out = state.realm.paint(&item.name, Style::Item);
    if !item.description.is_empty() {
        out.push('\n');
        out.push_str(&delve_foundation::wrap(&item.description, state.config.wrap_width));
    }
    let mut facts = Vec::new();
    if let Some(damage) = &item.damage {
        facts.push(format!("Damage: {damage}"));
    }
    if let Some(armor) = item.armor {
        facts.push(format!("Armor: {armor}"));
    }
    if let Some(heal) = item.heal_amount {
        facts.push(format!("Heals: {heal}"));
    }
    facts.push(format!("Weight: {}", item.weight));
    if item.value > 0 {
        facts.push(format!("Value: {} gold", item.value));
    }
    out.push('\n');
    out.push_str(&state.realm.paint(&facts.join("  "), Style::Dim));
    out
}

pub(crate) fn go(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    let Some(word) = cmd.first_arg() else {
        return Ok("Go where?".to_string());
    };
    let direction = canonical_direction(word).to_string();
    let from = here(state);
    match state.realm.world.resolve_exit(&from, &direction) {
        Ok(Some(to)) => {
            debug!(%from, %to, "player moved");
            state.realm.player.current_room = to;
            Ok(state.describe_room())
        }
        Ok(None) => Ok(format!("You can't go {direction} from here.")),
        Err(e) => {
            warn!(%from, %direction, error = %e, "exit could not be resolved");
            Ok(format!("The way {direction} is blocked."))
        }
    }
}

pub(crate) fn talk(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok("Talk to whom?".to_string());
    }
    let query = object_of(&cmd.target, &["to", "with"]);
    let Some(npc) = npc_here(state, query) else {
        return Ok(format!("There is no {query} here."));
    };
    let id = npc.id.clone();
    let name = state.realm.paint(&npc.name, Style::Npc);
    if !npc.is_alive() {
        return Ok(format!("{name} is in no state to talk."));
    }
    if npc.is_hostile() {
        return Ok(format!("{name} snarls at you."));
    }
    if npc.dialogue.is_empty() {
        return Ok(format!("{name} has nothing to say."));
    }
    let line = state
        .realm
        .world
        .npc_mut(&id)
        .map(Npc::speak)
        .unwrap_or_default();
    Ok(format!("{name} says, \"{line}\""))
}

pub(crate) fn heal(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    let healer = current_room(state).and_then(|room| {
        room.npcs
            .iter()
            .filter_map(|id| state.realm.world.npc(id))
            .find(|npc| npc.can_heal && npc.is_alive())
    });
    let Some(healer) = healer else {
        return Ok("There is no one here who can heal you.".to_string());
    };
    let name = state.realm.paint(&healer.name, Style::Npc);

    let player = &mut state.realm.player;
    if player.hit_points() == player.max_hit_points() && player.stamina == player.max_stamina {
        return Ok("You are already in perfect health.".to_string());
    }
    player.restore();
    let status = format!("({}/{} HP)", player.hit_points(), player.max_hit_points());
    Ok(format!(
        "{name} lays hands on you. {} {status}",
        state.realm.paint("You feel fully restored.", Style::Heal)
    ))
}
