//! Saving and loading through the game facade.

use delve_parser::messages;
use delve_runtime::{KeyValueStore, MemoryStore, SaveFormat};
use delve_storage::PlayerState;

use crate::fixtures::{config, fight_to_the_end, game, game_with, id};

#[test]
fn load_without_a_save_leaves_everything_alone() {
    let mut game = game();
    game.process_command("n");
    game.process_command("take axe");
    assert_eq!(game.process_command("load"), "There is no saved game to load.");
    assert_eq!(game.state().player().current_room, id("keep:armory"));
    assert_eq!(game.state().player().inventory.len(), 1);
}

#[test]
fn json_save_round_trips_the_world() {
    let store = MemoryStore::new();
    let mut game = game_with(config(5), store.clone());
    game.process_command("n");
    game.process_command("take axe");
    game.process_command("equip axe");
    game.process_command("s");
    game.process_command("s");
    assert_eq!(game.process_command("save"), "Game saved.");

    let blob = store.get("savegame").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    assert_eq!(json["player"]["currentRoom"], "moor:road");
    assert!(json["loadedAreaIds"].as_array().unwrap().len() >= 2);

    game.process_command("new");
    assert_eq!(game.state().player().current_room, id("keep:hall"));
    assert!(game.state().player().equipped_weapon.is_none());

    let reply = game.process_command("load");
    assert!(reply.starts_with("Game loaded."), "{reply}");
    let player = game.state().player();
    assert_eq!(player.current_room, id("moor:road"));
    assert_eq!(player.equipped_weapon.as_ref().map(|w| w.name.as_str()), Some("Battle Axe"));
    assert!(game.state().world().is_loaded("moor"));
    let armory = game.state().world().room(&id("keep:armory")).unwrap();
    assert!(!armory.items.contains(&id("keep:axe")));
}

#[test]
fn messagepack_save_restores_a_dead_goblin_and_queues_its_return() {
    let store = MemoryStore::new();
    let config = config(9).with_save_format(SaveFormat::MessagePack);
    let mut game = game_with(config, store.clone());
    game.process_command("s");
    game.process_command("attack goblin");
    fight_to_the_end(&mut game);
    assert_eq!(game.process_command("save"), "Game saved.");

    let blob = store.get("savegame").unwrap().unwrap();
    assert_ne!(blob.first(), Some(&b'{'));

    game.process_command("new");
    assert!(game.state().world().npc_location(&id("moor:goblin")).is_none());
    game.process_command("load");

    let state = game.state();
    assert_eq!(state.player().experience, 25);
    assert!(state.world().npc_location(&id("moor:goblin")).is_none());
    assert!(!state.world().npc(&id("moor:goblin")).unwrap().is_alive());
    let respawns: Vec<_> = state.scheduler().pending_respawns().collect();
    assert_eq!(respawns.len(), 1);
    assert_eq!(respawns[0].npc, id("moor:goblin"));
    assert_eq!(respawns[0].room, id("moor:road"));

    for _ in 0..30 {
        game.tick();
    }
    assert_eq!(game.state().world().npc_location(&id("moor:goblin")), Some(&id("moor:road")));
}

#[test]
fn a_fight_in_progress_is_not_saved_as_a_fight() {
    let store = MemoryStore::new();
    let mut game = game_with(config(2), store);
    game.process_command("s");
    game.process_command("attack goblin");
    assert_eq!(game.process_command("save"), "Game saved.");
    game.process_command("flee");

    game.process_command("load");
    assert_eq!(game.state().player().state, PlayerState::Idle);
    assert!(!game.state().combat().is_active());
    assert!(game.pending_round().is_none());
}

#[test]
fn an_edited_save_is_brought_back_into_bounds() {
    let store = MemoryStore::new();
    let mut game = game_with(config(4), store.clone());
    assert_eq!(game.process_command("save"), "Game saved.");

    let blob = store.get("savegame").unwrap().unwrap();
    let mut json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    json["player"]["hitPoints"] = 999.into();
    json["player"]["stamina"] = 999.into();
    store.put("savegame", &serde_json::to_vec(&json).unwrap()).unwrap();

    assert!(game.process_command("load").starts_with("Game loaded."));
    let player = game.state().player();
    assert_eq!(player.hit_points(), player.max_hit_points());
    assert_eq!(player.stamina, player.max_stamina);
}

#[test]
fn a_save_at_zero_hit_points_loads_dead() {
    let store = MemoryStore::new();
    let mut game = game_with(config(6), store.clone());
    game.process_command("save");

    let blob = store.get("savegame").unwrap().unwrap();
    let mut json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    json["player"]["hitPoints"] = 0.into();
    json["player"]["state"] = "idle".into();
    store.put("savegame", &serde_json::to_vec(&json).unwrap()).unwrap();

    game.process_command("load");
    assert_eq!(game.state().player().state, PlayerState::Dead);
    assert_eq!(game.process_command("look"), messages::DEAD);
    assert!(game.process_command("respawn").starts_with("You return to the world of the living."));
}
