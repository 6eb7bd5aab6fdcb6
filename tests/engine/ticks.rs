//! World tick tests: wandering, respawns, cooldowns.

use delve_engine::{MessageKind, TickScheduler};

use crate::fixtures::id;
use crate::realm;

#[test]
fn sheep_wander_at_about_the_configured_rate() {
    let mut realm = realm(2024);
    let mut scheduler = TickScheduler::new(0.05);
    let sheep = id("moor:sheep");

    let mut moves = 0;
    let mut last = realm.world.npc_location(&sheep).cloned();
    for _ in 0..2000 {
        scheduler.advance_tick(&mut realm, None);
        let now = realm.world.npc_location(&sheep).cloned();
        if now != last {
            moves += 1;
            last = now;
        }
    }
    assert!((50..=150).contains(&moves), "sheep moved {moves} times");
    assert_eq!(scheduler.tick_number(), 2000);
}

#[test]
fn only_wanderers_move() {
    let mut realm = realm(8);
    let mut scheduler = TickScheduler::new(1.0);
    for _ in 0..20 {
        scheduler.advance_tick(&mut realm, None);
    }
    assert_eq!(realm.world.npc_location(&id("moor:goblin")), Some(&id("moor:road")));
    assert_eq!(realm.world.npc_location(&id("moor:wight")), Some(&id("moor:barrow")));
}

#[test]
fn the_combat_target_never_wanders() {
    let mut realm = realm(9);
    let mut scheduler = TickScheduler::new(1.0);
    let sheep = id("moor:sheep");
    for _ in 0..20 {
        scheduler.advance_tick(&mut realm, Some(&sheep));
        assert_eq!(realm.world.npc_location(&sheep), Some(&id("moor:tor")));
    }
}

#[test]
fn a_wanderer_arriving_is_announced() {
    let mut realm = realm(10);
    let mut scheduler = TickScheduler::new(1.0);
    // The tor has a single exit, so the first move is always onto the road.
    let messages = scheduler.advance_tick(&mut realm, None);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, MessageKind::Wander);
    assert_eq!(messages[0].text, "Sheep wanders in.");
}

#[test]
fn respawn_of_a_present_npc_is_skipped() {
    let mut realm = realm(11);
    let mut scheduler = TickScheduler::new(0.0);
    let goblin = id("moor:goblin");
    let road = id("moor:road");

    assert!(scheduler.schedule_npc_respawn(&realm.world, &goblin, &road, 2));
    assert!(scheduler.schedule_npc_respawn(&realm.world, &goblin, &road, 3));
    assert_eq!(scheduler.pending_respawns().count(), 1);

    for _ in 0..3 {
        assert!(scheduler.advance_tick(&mut realm, None).is_empty());
    }
    assert_eq!(scheduler.pending_respawns().count(), 0);
    let road_npcs = &realm.world.room(&road).unwrap().npcs;
    assert_eq!(road_npcs.iter().filter(|npc| **npc == goblin).count(), 1);
}

#[test]
fn only_hostile_npcs_are_queued() {
    let realm = realm(12);
    let mut scheduler = TickScheduler::new(0.0);
    assert!(!scheduler.schedule_npc_respawn(&realm.world, &id("moor:sheep"), &id("moor:tor"), 1));
    assert!(!scheduler.schedule_npc_respawn(&realm.world, &id("keep:steward"), &id("keep:hall"), 1));
    assert!(!scheduler.schedule_npc_respawn(&realm.world, &id("moor:ghost"), &id("moor:road"), 1));
    assert_eq!(scheduler.pending_respawns().count(), 0);
}

#[test]
fn cooldowns_count_down_and_announce() {
    let mut realm = realm(13);
    let mut scheduler = TickScheduler::new(0.0);
    realm.player.start_cooldown("strike", 2);

    assert!(scheduler.advance_tick(&mut realm, None).is_empty());
    assert_eq!(realm.player.cooldown("strike"), 1);
    let messages = scheduler.advance_tick(&mut realm, None);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, MessageKind::Cooldown);
    assert_eq!(messages[0].text, "Power Strike is ready.");
}

#[test]
fn reset_forgets_the_queue() {
    let mut realm = realm(14);
    let mut scheduler = TickScheduler::new(0.0);
    scheduler.advance_tick(&mut realm, None);
    scheduler.schedule_npc_respawn(&realm.world, &id("moor:wight"), &id("moor:barrow"), 5);
    scheduler.reset();
    assert_eq!(scheduler.tick_number(), 0);
    assert_eq!(scheduler.pending_respawns().count(), 0);
}
