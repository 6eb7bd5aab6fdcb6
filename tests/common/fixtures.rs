//! A two-area world shared by the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use delve_foundation::GlobalId;
use delve_runtime::{Game, GameConfig, MemoryStore};
use delve_storage::MemorySource;

pub const KEEP: &str = r#"{
    "id": "keep",
    "name": "Greystone Keep",
    "rooms": {
        "hall": {
            "name": "Great Hall",
            "description": "Banners hang from the rafters.",
            "exits": { "north": "armory", "south": { "room": "road", "area": "moor" } },
            "items": ["bread"],
            "npcs": ["steward"]
        },
        "armory": {
            "name": "Armory",
            "description": "Racks of old weapons.",
            "exits": { "south": "hall" },
            "items": ["axe", "plate"]
        }
    },
    "items": {
        "bread": { "name": "Loaf of Bread", "type": "potion", "healAmount": 4, "weight": 1, "value": 2 },
        "axe": { "name": "Battle Axe", "type": "weapon", "damage": "6", "weight": 8, "value": 40 },
        "plate": { "name": "Plate Armor", "type": "armor", "armor": 6, "weight": 95, "value": 200 }
    },
    "npcs": {
        "steward": { "name": "Steward", "type": "friendly", "hitPoints": 10, "maxHitPoints": 10, "damage": "1",
                     "canHeal": true, "dialogue": ["The moor is no place at night."] }
    }
}"#;

pub const MOOR: &str = r#"{
    "id": "moor",
    "name": "Bleak Moor",
    "rooms": {
        "road": {
            "name": "Moor Road",
            "description": "Wind hisses through the heather.",
            "exits": { "north": { "room": "hall", "area": "keep" }, "east": "barrow", "west": "tor" },
            "npcs": ["goblin"]
        },
        "barrow": {
            "name": "Barrow",
            "description": "A burial mound, breached.",
            "exits": { "west": "road" },
            "npcs": ["wight"]
        },
        "tor": {
            "name": "Windy Tor",
            "description": "Bare rock under a low sky.",
            "exits": { "east": "road" },
            "npcs": ["sheep"]
        }
    },
    "items": { "ear": { "name": "Goblin Ear", "type": "misc", "weight": 1, "value": 4 } },
    "npcs": {
        "goblin": { "name": "Goblin", "type": "hostile", "hitPoints": 8, "maxHitPoints": 8, "damage": "1",
                    "experience": 25, "drops": ["ear"] },
        "wight": { "name": "Wight", "type": "hostile", "hitPoints": 300, "maxHitPoints": 300, "damage": "50" },
        "sheep": { "name": "Sheep", "type": "neutral", "hitPoints": 5, "maxHitPoints": 5, "damage": "1", "canWander": true }
    }
}"#;

pub const SKILLS: &str = r#"{
    "strike": { "name": "Power Strike", "description": "Put your back into it.", "level": 1, "cost": 5, "cooldown": 2, "damageMultiplier": 3.0 }
}"#;

pub fn source() -> Arc<MemorySource> {
    Arc::new(
        MemorySource::new()
            .with_area("keep", KEEP)
            .with_area("moor", MOOR)
            .with_area("skills", SKILLS),
    )
}

pub fn config(seed: u64) -> GameConfig {
    GameConfig::deterministic(seed)
        .with_start("keep", "hall")
        .with_wander_chance(0.0)
}

pub fn game_with(config: GameConfig, store: MemoryStore) -> Game {
    Game::new(config, source(), Box::new(store)).unwrap()
}

pub fn game() -> Game {
    game_with(config(11), MemoryStore::new())
}

pub fn id(raw: &str) -> GlobalId {
    raw.parse().unwrap()
}

/// Runs rounds until the encounter ends, returning every line produced.
pub fn fight_to_the_end(game: &mut Game) -> Vec<String> {
    let mut lines = Vec::new();
    for _ in 0..200 {
        let Some(ticket) = game.pending_round() else {
            break;
        };
        lines.extend(game.run_round(ticket));
    }
    lines
}
