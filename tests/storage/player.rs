//! Inventory, equipment, and health rules.

use delve_storage::{InventoryError, Player, PlayerState, WorldStore};

use crate::fixtures::{id, source};

fn player_with_armory() -> (Player, WorldStore) {
    let mut world = WorldStore::new(source());
    world.load_area("keep").unwrap();
    (Player::new("Tess", id("keep:hall")), world)
}

#[test]
fn carry_capacity_limits_pickups() {
    let (mut player, world) = player_with_armory();
    let axe = world.item(&id("keep:axe")).unwrap().clone();
    let plate = world.item(&id("keep:plate")).unwrap().clone();

    assert_eq!(player.carry_capacity(), 100);
    player.add_item(plate).unwrap();
    assert_eq!(player.carried_weight(), 95);
    assert_eq!(player.add_item(axe), Err(InventoryError::TooHeavy("Battle Axe".into())));
    assert_eq!(player.inventory.len(), 1);
}

#[test]
fn equipping_moves_items_out_of_the_pack() {
    let (mut player, world) = player_with_armory();
    player.add_item(world.item(&id("keep:axe")).unwrap().clone()).unwrap();
    player.add_item(world.item(&id("keep:bread")).unwrap().clone()).unwrap();

    let axe = player.find_item("Battle").unwrap();
    assert_eq!(player.equip(axe), Ok(None));
    assert_eq!(player.equipped_weapon.as_ref().map(|w| w.name.as_str()), Some("Battle Axe"));
    assert_eq!(player.carried_weight(), 1);

    let bread = player.find_item("bread").unwrap();
    assert_eq!(player.equip(bread), Err(InventoryError::NotEquippable("Loaf of Bread".into())));

    assert_eq!(player.unequip_weapon(), Ok("Battle Axe".into()));
    assert_eq!(player.unequip_weapon(), Err(InventoryError::SlotEmpty));
    assert_eq!(player.inventory.len(), 2);
}

#[test]
fn armor_reduces_to_its_rating() {
    let (mut player, world) = player_with_armory();
    player.add_item(world.item(&id("keep:plate")).unwrap().clone()).unwrap();
    player.equip(0).unwrap();
    assert_eq!(player.armor_value(), 6);
}

#[test]
fn death_and_resurrection() {
    let (mut player, _) = player_with_armory();
    assert!(player.take_damage(5));
    assert_eq!(player.heal(100), 5);
    assert!(!player.take_damage(25));
    assert_eq!(player.state, PlayerState::Dead);
    assert_eq!(player.hit_points(), 0);

    player.resurrect(id("moor:tor"));
    assert_eq!(player.state, PlayerState::Idle);
    assert_eq!(player.current_room, id("moor:tor"));
    assert_eq!(player.hit_points(), player.max_hit_points());
}

#[test]
fn player_json_uses_camel_case() {
    let (player, _) = player_with_armory();
    let json = serde_json::to_value(&player).unwrap();
    assert_eq!(json["currentRoom"], "keep:hall");
    assert_eq!(json["maxHitPoints"], 20);
    let back: Player = serde_json::from_value(json).unwrap();
    assert_eq!(back, player);
}
