//! The area files shipped in `data/` load cleanly.

use std::path::PathBuf;
use std::sync::Arc;

use delve_foundation::GlobalId;
use delve_storage::{DirectorySource, WorldStore};

fn shipped() -> WorldStore {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    WorldStore::new(Arc::new(DirectorySource::new(root)))
}

#[test]
fn town_and_forest_connect() {
    let mut world = shipped();
    world.load_area("town").unwrap();
    let square = GlobalId::new("town", "square");
    assert!(world.room(&square).is_some());

    let edge = world
        .resolve_exit(&GlobalId::new("town", "gate"), "south")
        .unwrap()
        .unwrap();
    assert_eq!(edge, GlobalId::new("forest", "edge"));
    assert!(world.is_loaded("forest"));
    assert!(world.npcs().any(|npc| npc.is_hostile()));
}

#[test]
fn skill_table_parses() {
    let skills = shipped().load_skills().unwrap();
    assert!(skills.len() >= 3);
    assert!(skills.iter().any(|skill| skill.level == 1));
}

#[test]
fn ids_cannot_escape_the_data_directory() {
    let mut world = shipped();
    assert!(world.load_area("../Cargo").is_err());
    assert!(world.load_area(".hidden").is_err());
}
