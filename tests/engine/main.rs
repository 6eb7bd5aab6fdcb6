//! Integration tests for the engine layer.
//!
//! Combat, ticks, and the message bus driven directly over a [`Realm`],
//! without the command layer.
//!
//! [`Realm`]: delve_engine::Realm

#[path = "../common/fixtures.rs"]
mod fixtures;

mod bus;
mod combat;
mod ticks;

use std::sync::Arc;

use delve_engine::Realm;
use delve_storage::{Player, SkillBook, WorldStore};

/// A realm with the player standing on the moor road.
pub fn realm(seed: u64) -> Realm {
    let source: Arc<delve_storage::MemorySource> = fixtures::source();
    let mut world = WorldStore::new(source);
    world.load_area("keep").unwrap();
    world.load_area("moor").unwrap();
    let skills = SkillBook::from_json(fixtures::SKILLS).unwrap();
    let player = Player::new("Tess", fixtures::id("moor:road"));
    Realm::new(world, player, skills, Some(seed))
}
