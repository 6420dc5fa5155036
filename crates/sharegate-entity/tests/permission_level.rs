//! Property tests for permission level ordering.

use proptest::prelude::*;
use sharegate_entity::PermissionLevel;

fn arb_level() -> impl Strategy<Value = PermissionLevel> {
    prop::sample::select(PermissionLevel::ALL_LEVELS.to_vec())
}

proptest! {
    #[test]
    fn compare_agrees_with_wire_values(a in arb_level(), b in arb_level()) {
        prop_assert_eq!(a.compare(b), a.as_u8().cmp(&b.as_u8()));
        prop_assert_eq!(a.compare(b), a.cmp(&b));
    }

    #[test]
    fn at_least_share_only_for_share_and_all(level in arb_level()) {
        let expected = matches!(level, PermissionLevel::Share | PermissionLevel::All);
        prop_assert_eq!(level.at_least(PermissionLevel::Share), expected);
    }

    #[test]
    fn at_least_is_reflexive_and_transitive(a in arb_level(), b in arb_level(), c in arb_level()) {
        prop_assert!(a.at_least(a));
        if a.at_least(b) && b.at_least(c) {
            prop_assert!(a.at_least(c));
        }
    }

    #[test]
    fn only_members_decode(raw in any::<u8>()) {
        let member = PermissionLevel::ALL_LEVELS.iter().any(|l| l.as_u8() == raw);
        prop_assert_eq!(PermissionLevel::try_from(raw).is_ok(), member);
    }
}
