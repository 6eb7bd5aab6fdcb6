//! Combat engine tests.

use delve_engine::{CombatEngine, CombatError, CombatOutcome, CombatRules, TickScheduler};
use delve_storage::PlayerState;

use crate::fixtures::id;
use crate::realm;

#[test]
fn goblin_fight_runs_to_victory() {
    let mut realm = realm(1);
    let mut combat = CombatEngine::new(CombatRules::default());
    let mut scheduler = TickScheduler::new(0.0);

    let (message, mut ticket) = combat.start(&mut realm, &id("moor:goblin")).unwrap();
    assert_eq!(message, "You attack Goblin!");
    assert_eq!(realm.player.state, PlayerState::Fighting);

    let mut outcome = None;
    for _ in 0..20 {
        let report = combat.advance_round(ticket, &mut realm, &mut scheduler);
        if report.outcome.is_some() {
            outcome = report.outcome;
            assert!(report.next.is_none());
            break;
        }
        ticket = report.next.unwrap();
    }
    assert_eq!(outcome, Some(CombatOutcome::Victory));
    assert_eq!(realm.player.state, PlayerState::Idle);
    assert!(!combat.is_active());
    assert!(realm.world.npc_location(&id("moor:goblin")).is_none());
    let road = realm.world.room(&id("moor:road")).unwrap();
    assert!(road.items.contains(&id("moor:ear")));
    assert_eq!(scheduler.pending_respawns().count(), 1);
}

#[test]
fn each_ticket_is_redeemed_once() {
    let mut realm = realm(2);
    let mut combat = CombatEngine::new(CombatRules::default());
    let mut scheduler = TickScheduler::new(0.0);

    let (_, ticket) = combat.start(&mut realm, &id("moor:goblin")).unwrap();
    let first = combat.advance_round(ticket, &mut realm, &mut scheduler);
    assert!(first.messages[0].starts_with("You hit Goblin for "));
    assert_ne!(first.next, Some(ticket));

    let replay = combat.advance_round(ticket, &mut realm, &mut scheduler);
    assert!(replay.messages.is_empty());
    assert!(replay.outcome.is_none());
}

#[test]
fn stopping_invalidates_the_pending_round() {
    let mut realm = realm(3);
    let mut combat = CombatEngine::new(CombatRules::default());
    let mut scheduler = TickScheduler::new(0.0);

    let (_, ticket) = combat.start(&mut realm, &id("moor:goblin")).unwrap();
    assert_eq!(combat.stop(&mut realm, false), Some(id("moor:goblin")));
    assert_eq!(combat.stop(&mut realm, false), None);
    assert_eq!(combat.advance_round(ticket, &mut realm, &mut scheduler).messages.len(), 0);
    assert_eq!(realm.player.state, PlayerState::Idle);
    assert_eq!(realm.world.npc(&id("moor:goblin")).unwrap().hit_points(), 8);
}

#[test]
fn a_second_start_is_rejected() {
    let mut realm = realm(4);
    let mut combat = CombatEngine::new(CombatRules::default());
    combat.start(&mut realm, &id("moor:goblin")).unwrap();
    let err = combat.start(&mut realm, &id("moor:sheep")).unwrap_err();
    assert_eq!(err, CombatError::AlreadyFighting("Goblin".into()));
    assert_eq!(combat.target(), Some(&id("moor:goblin")));
}

#[test]
fn skill_queueing_checks_every_precondition() {
    let mut realm = realm(5);
    let mut combat = CombatEngine::new(CombatRules::default());
    let mut scheduler = TickScheduler::new(0.0);

    assert_eq!(combat.queue_skill(&mut realm, "strike"), Err(CombatError::NotFighting));
    let (_, ticket) = combat.start(&mut realm, &id("moor:goblin")).unwrap();

    assert_eq!(
        combat.queue_skill(&mut realm, "cartwheel").unwrap_err().to_string(),
        "You don't know a skill called 'cartwheel'."
    );
    assert_eq!(
        combat.queue_skill(&mut realm, "strike").unwrap_err().to_string(),
        "You haven't learned Power Strike yet."
    );

    let skills = realm.skills.clone();
    assert_eq!(realm.player.learn_unlocked_skills(&skills), vec!["Power Strike".to_string()]);
    let stamina = realm.player.stamina;
    assert_eq!(combat.queue_skill(&mut realm, "power strike").unwrap(), "You ready Power Strike!");
    assert_eq!(realm.player.stamina, stamina - 5);
    assert_eq!(realm.player.cooldown("strike"), 2);
    assert_eq!(combat.queue_skill(&mut realm, "strike"), Err(CombatError::SkillAlreadyUsed));

    let report = combat.advance_round(ticket, &mut realm, &mut scheduler);
    assert!(report.messages[0].starts_with("You use Power Strike on Goblin for "), "{:?}", report.messages);
    if report.outcome.is_none() {
        assert_eq!(
            combat.queue_skill(&mut realm, "strike"),
            Err(CombatError::OnCooldown {
                skill: "Power Strike".into(),
                ticks: 2
            })
        );
    }
}

#[test]
fn fleeing_from_the_barrow_runs_west() {
    let mut realm = realm(6);
    let mut combat = CombatEngine::new(CombatRules::default());

    realm.player.current_room = id("moor:barrow");
    combat.start(&mut realm, &id("moor:wight")).unwrap();
    let report = combat.flee(&mut realm).unwrap();
    assert_eq!(report.destination, Some(id("moor:road")));
    assert_eq!(realm.player.current_room, id("moor:road"));
    assert!(report.message.contains("running west"));
    assert_eq!(combat.flee(&mut realm).unwrap_err(), CombatError::NotFighting);
}
