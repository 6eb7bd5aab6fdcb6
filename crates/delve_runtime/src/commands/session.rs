//! Respawning, saving, loading, and starting over.

use delve_foundation::{Error, ErrorKind, Result, Style};
use delve_parser::ParsedCommand;
use tracing::{info, warn};

use crate::game::GameState;

pub(crate) fn respawn(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    if state.realm.player.is_alive() {
        return Ok("You are not dead.".to_string());
    }
    let room = state.config.respawn_room_id();
    state.realm.world.load_area(room.area())?;
    if state.realm.world.room(&room).is_none() {
        return Err(Error::room_not_found(&room));
    }
    state.combat.stop(&mut state.realm, false);
    state.realm.player.resurrect(room);
    info!(room = %state.realm.player.current_room, "player respawned");
    Ok(format!(
        "{}\n\n{}",
        state.realm.paint("You return to the world of the living.", Style::Success),
        state.describe_room()
    ))
}

pub(crate) fn save(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    Ok(match state.save() {
        Ok(()) => "Game saved.".to_string(),
        Err(e) => {
            warn!(error = %e, "save failed");
            format!("Could not save the game: {e}")
        }
    })
}

pub(crate) fn load(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    Ok(match state.load() {
        Ok(()) => format!("Game loaded.\n\n{}", state.describe_room()),
        Err(Error {
            kind: ErrorKind::NoSavedGame(_),
            ..
        }) => "There is no saved game to load.".to_string(),
        Err(e) => {
            warn!(error = %e, "load failed");
            format!("Could not load the saved game: {e}")
        }
    })
}

pub(crate) fn new_game(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    // Keep the name as typed; parsed arguments are lowercased.
    let name = cmd
        .original
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty());
    Ok(match state.new_game(name) {
        Ok(()) => format!(
            "A new adventure begins, {}.\n\n{}",
            state.realm.player.name,
            state.describe_room()
        ),
        Err(e) => {
            warn!(error = %e, "new game failed");
            format!("Could not start a new game: {e}")
        }
    })
}
