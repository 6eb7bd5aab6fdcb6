//! Lazy area loading and the NPC location index.

use std::sync::Arc;

use delve_foundation::ErrorKind;
use delve_storage::{MemorySource, WorldStore};

use crate::fixtures::{KEEP, id, source};

fn store() -> WorldStore {
    let mut world = WorldStore::new(source());
    world.load_area("keep").unwrap();
    world
}

#[test]
fn cross_area_exits_load_on_demand() {
    let mut world = store();
    assert_eq!(world.loaded_area_ids().collect::<Vec<_>>(), vec!["keep"]);

    let target = world.resolve_exit(&id("keep:hall"), "south").unwrap();
    assert_eq!(target, Some(id("moor:road")));
    assert_eq!(world.loaded_area_ids().collect::<Vec<_>>(), vec!["keep", "moor"]);
    assert_eq!(world.area_name("moor"), "Bleak Moor");

    assert_eq!(world.resolve_exit(&id("keep:hall"), "up").unwrap(), None);
    assert!(world.resolve_exit(&id("keep:cellar"), "north").is_err());
}

#[test]
fn loading_twice_is_a_no_op() {
    let mut world = store();
    world.npc_mut(&id("keep:steward")).unwrap().set_hit_points(3);
    world.load_area("keep").unwrap();
    assert_eq!(world.npc(&id("keep:steward")).unwrap().hit_points(), 3);
}

#[test]
fn bad_documents_leave_the_store_untouched() {
    let source = Arc::new(
        MemorySource::new()
            .with_area("keep", KEEP)
            .with_area("broken", "{ not json")
            .with_area("liar", r#"{ "id": "keep", "name": "Liar" }"#)
            .with_area(
                "dangling",
                r#"{ "id": "dangling", "name": "D", "rooms": { "a": { "name": "A", "exits": { "north": "nowhere" } } } }"#,
            ),
    );
    let mut world = WorldStore::new(source);
    world.load_area("keep").unwrap();

    let parse = world.load_area("broken").unwrap_err();
    assert!(matches!(parse.kind, ErrorKind::AreaParse { .. }));
    let liar = world.load_area("liar").unwrap_err();
    assert!(matches!(liar.kind, ErrorKind::InvalidArea { .. }));
    let dangling = world.load_area("dangling").unwrap_err();
    assert!(matches!(dangling.kind, ErrorKind::InvalidArea { .. }));
    let missing = world.load_area("atlantis").unwrap_err();
    assert!(matches!(missing.kind, ErrorKind::AreaNotFound(_)));

    assert_eq!(world.loaded_area_ids().count(), 1);
    assert_eq!(world.rooms().count(), 2);
}

#[test]
fn placing_an_npc_moves_it_between_rooms() {
    let mut world = store();
    world.load_area("moor").unwrap();
    let goblin = id("moor:goblin");

    world.place_npc(&goblin, &id("keep:hall")).unwrap();
    assert_eq!(world.npc_location(&goblin), Some(&id("keep:hall")));
    assert!(world.room(&id("keep:hall")).unwrap().npcs.contains(&goblin));
    assert!(!world.room(&id("moor:road")).unwrap().npcs.contains(&goblin));

    assert_eq!(world.remove_npc(&goblin), Some(id("keep:hall")));
    assert!(world.npc_location(&goblin).is_none());
    assert!(world.npc(&goblin).is_some());
}

#[test]
fn location_index_rebuilds_room_lists() {
    let mut world = store();
    world.load_area("moor").unwrap();
    world.set_npc_locations([
        (id("moor:goblin"), id("moor:tor")),
        (id("moor:ghost"), id("moor:tor")),
        (id("moor:sheep"), id("keep:nowhere")),
    ]);
    world.sync_rooms_from_npc_map();

    assert_eq!(world.room(&id("moor:tor")).unwrap().npcs, vec![id("moor:goblin")]);
    assert!(world.room(&id("moor:road")).unwrap().npcs.is_empty());
    assert!(world.room(&id("keep:hall")).unwrap().npcs.is_empty());
    assert_eq!(world.npc_locations().count(), 1);
}

#[test]
fn room_items_ignore_unknown_ids() {
    let mut world = store();
    let hall = id("keep:hall");
    world
        .set_room_items(&hall, vec![id("keep:axe"), id("keep:unicorn")])
        .unwrap();
    assert_eq!(world.room(&hall).unwrap().items, vec![id("keep:axe")]);

    assert!(world.remove_room_item(&hall, &id("keep:axe")));
    assert!(!world.remove_room_item(&hall, &id("keep:axe")));
    assert!(world.add_room_item(&id("keep:cellar"), id("keep:axe")).is_err());
}

#[test]
fn room_lookups_by_name() {
    let world = store();
    let hall = world.room(&id("keep:hall")).unwrap();
    assert_eq!(hall.find_item("bread", &world).map(|i| i.name.as_str()), Some("Loaf of Bread"));
    assert_eq!(hall.find_npc("STEWARD", &world).map(|n| n.name.as_str()), Some("Steward"));
    assert!(hall.find_item("axe", &world).is_none());
}
