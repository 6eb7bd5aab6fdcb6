//! Global ids and dice notation.

use delve_foundation::{Dice, ErrorKind, GlobalId};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn global_id_round_trips_through_text_and_json() {
    let id: GlobalId = "moor:road".parse().unwrap();
    assert_eq!(id.area(), "moor");
    assert_eq!(id.local(), "road");
    assert_eq!(id.to_string(), "moor:road");

    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"moor:road\"");
    assert_eq!(serde_json::from_str::<GlobalId>(&json).unwrap(), id);
}

#[test]
fn only_the_first_separator_splits() {
    let id = GlobalId::parse("moor:cairn:top").unwrap();
    assert_eq!(id.area(), "moor");
    assert_eq!(id.local(), "cairn:top");
}

#[test]
fn malformed_ids_are_rejected() {
    for raw in ["road", ":road", ""] {
        let err = GlobalId::parse(raw).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidGlobalId(_)), "{raw}");
    }
    assert!(serde_json::from_str::<GlobalId>("\"road\"").is_err());
}

#[test]
fn dice_notation() {
    let dice: Dice = "2d6+1".parse().unwrap();
    assert_eq!(dice, Dice::new(2, 6, 1));
    assert_eq!(dice.to_string(), "2d6+1");
    assert_eq!("d8".parse::<Dice>().unwrap(), Dice::new(1, 8, 0));
    assert_eq!("1d4-1".parse::<Dice>().unwrap().to_string(), "1d4-1");
    assert_eq!("7".parse::<Dice>().unwrap().to_string(), "7");
    assert!("2d".parse::<Dice>().is_err());
    assert!("1d0".parse::<Dice>().is_err());
}

proptest! {
    #[test]
    fn rolls_stay_in_range(count in 1u32..5, sides in 1u32..20, modifier in -3i32..4, seed in any::<u64>()) {
        let dice = Dice::new(count, sides, modifier);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roll = dice.roll(&mut rng);
        prop_assert!(roll >= dice.min());
        prop_assert!(roll <= dice.max());
    }

    #[test]
    fn ids_survive_display_and_parse(area in "[a-z]{1,8}", local in "[a-z_]{1,8}") {
        let id = GlobalId::new(area.as_str(), local.as_str());
        prop_assert_eq!(id.to_string().parse::<GlobalId>().unwrap(), id);
    }
}
