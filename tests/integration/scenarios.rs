//! Play scenarios: exploring, fighting, dying.

use delve_parser::messages;
use delve_storage::PlayerState;

use crate::fixtures::{config, fight_to_the_end, game, game_with, id};
use delve_runtime::MemoryStore;

// =============================================================================
// Exploration
// =============================================================================

#[test]
fn aliases_expand_before_dispatch() {
    let mut game = game();
    assert!(game.process_command("l").starts_with("Great Hall"));
    assert!(game.process_command("N").starts_with("Armory"));
    assert_eq!(game.process_command("get battle axe"), "You take the Battle Axe.");
    assert!(game.process_command("i").contains("Battle Axe"));
    assert!(game.process_command("south").starts_with("Great Hall"));
}

#[test]
fn crossing_into_an_unloaded_area_loads_it() {
    let mut game = game();
    assert!(!game.state().world().is_loaded("moor"));
    let reply = game.process_command("s");
    assert!(reply.starts_with("Moor Road"), "{reply}");
    assert!(game.state().world().is_loaded("moor"));
    assert_eq!(game.state().player().current_room, id("moor:road"));
    assert!(reply.contains("Goblin"));
}

#[test]
fn unknown_commands_and_blank_input() {
    let mut game = game();
    assert_eq!(game.process_command("   "), messages::EMPTY);
    assert_eq!(
        game.process_command("dance wildly"),
        "I don't understand 'dance'. Type 'help' for a list of commands."
    );
}

#[test]
fn the_heaviest_armor_is_too_heavy_with_an_axe() {
    let mut game = game();
    game.process_command("n");
    game.process_command("take axe");
    let reply = game.process_command("take plate");
    assert!(reply.contains("too heavy") || reply.contains("Too heavy"), "{reply}");
    assert_eq!(game.state().player().inventory.len(), 1);
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn an_eight_hit_point_goblin_dies() {
    let mut game = game();
    game.process_command("s");
    assert_eq!(game.process_command("attack goblin"), "You attack Goblin!");
    assert_eq!(game.state().player().state, PlayerState::Fighting);

    let lines = fight_to_the_end(&mut game);
    assert!(lines.iter().any(|l| l == "You have slain Goblin!"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "You gain 25 experience."), "{lines:?}");

    let state = game.state();
    assert_eq!(state.player().state, PlayerState::Idle);
    assert_eq!(state.player().experience, 25);
    assert!(!state.combat().is_active());
    assert!(state.world().npc_location(&id("moor:goblin")).is_none());
    assert!(game.process_command("look").contains("Goblin Ear"));

    let respawns: Vec<_> = game.state().scheduler().pending_respawns().collect();
    assert_eq!(respawns.len(), 1);
    assert_eq!(respawns[0].npc, id("moor:goblin"));
    assert_eq!(respawns[0].room, id("moor:road"));
    assert_eq!(respawns[0].due_tick, 30);
}

#[test]
fn a_slain_goblin_returns_after_the_delay() {
    let mut game = game();
    game.process_command("s");
    game.process_command("attack goblin");
    fight_to_the_end(&mut game);

    for _ in 0..29 {
        game.tick();
    }
    assert!(game.state().world().npc_location(&id("moor:goblin")).is_none());

    let lines = game.tick();
    assert_eq!(lines, vec!["Goblin appears.".to_string()]);
    let goblin = game.state().world().npc(&id("moor:goblin")).unwrap();
    assert_eq!(goblin.hit_points(), goblin.max_hit_points());
    assert_eq!(game.state().world().npc_location(&id("moor:goblin")), Some(&id("moor:road")));
    assert_eq!(game.state().scheduler().pending_respawns().count(), 0);
}

#[test]
fn commands_outside_the_allow_list_are_refused_in_combat() {
    let mut game = game();
    game.process_command("s");
    game.process_command("attack goblin");
    assert_eq!(game.process_command("n"), messages::IN_COMBAT);
    assert_eq!(game.process_command("take ear"), messages::IN_COMBAT);
    assert!(game.process_command("look").starts_with("Moor Road"));
    assert_eq!(game.process_command("strike"), "You ready Power Strike!");
    assert_eq!(game.process_command("skill strike"), "You have already used a skill this round.");
}

#[test]
fn fleeing_ends_the_fight_and_moves_the_player() {
    let mut game = game();
    game.process_command("s");
    game.process_command("e");
    game.process_command("attack wight");
    let ticket = game.pending_round().unwrap();

    let reply = game.process_command("flee");
    assert!(reply.starts_with("You flee from Wight, running west!"), "{reply}");
    assert!(reply.contains("Moor Road"));
    assert_eq!(game.state().player().current_room, id("moor:road"));
    assert_eq!(game.state().player().state, PlayerState::Idle);
    assert!(game.pending_round().is_none());

    // The round queued before the flee never lands.
    assert!(game.run_round(ticket).is_empty());
    assert_eq!(game.state().player().hit_points(), 20);
}

#[test]
fn attacking_twice_is_refused() {
    let mut game = game();
    game.process_command("s");
    game.process_command("attack goblin");
    assert_eq!(game.process_command("attack goblin"), messages::IN_COMBAT);
}

// =============================================================================
// Death
// =============================================================================

#[test]
fn the_dead_may_only_respawn() {
    let mut game = game();
    game.process_command("s");
    game.process_command("e");
    game.process_command("attack wight");
    let lines = fight_to_the_end(&mut game);
    assert!(lines.iter().any(|l| l.starts_with("You have been slain by Wight!")), "{lines:?}");
    assert_eq!(game.state().player().state, PlayerState::Dead);

    assert_eq!(game.process_command("look"), messages::DEAD);
    assert_eq!(game.process_command("w"), messages::DEAD);
    assert_eq!(game.available_actions().commands().collect::<Vec<_>>(), vec!["respawn"]);

    let reply = game.process_command("respawn");
    assert!(reply.contains("Great Hall"), "{reply}");
    let player = game.state().player();
    assert_eq!(player.state, PlayerState::Idle);
    assert_eq!(player.current_room, id("keep:hall"));
    assert_eq!(player.hit_points(), player.max_hit_points());
}

#[test]
fn respawn_room_can_differ_from_the_start() {
    let config = config(3).with_respawn("moor", "tor");
    let mut game = game_with(config, MemoryStore::new());
    game.state_mut().realm_mut().player.take_damage(1000);
    assert!(game.process_command("respawn").contains("Windy Tor"));
    assert_eq!(game.state().player().current_room, id("moor:tor"));
}
