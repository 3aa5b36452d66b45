use proptest::prelude::*;

use quorum_types::{CurrencyName, ProposalResult, Timestamp, VoteOption};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// checked_add_secs never wraps.
    #[test]
    fn timestamp_checked_add(start in 0u64..u64::MAX, secs in 0u64..u64::MAX) {
        let shifted = Timestamp::new(start).checked_add_secs(secs);
        match start.checked_add(secs) {
            Some(expected) => prop_assert_eq!(shifted, Some(Timestamp::new(expected))),
            None => prop_assert_eq!(shifted, None),
        }
    }

    /// Currency names are compared byte-for-byte.
    #[test]
    fn currency_names_compare_verbatim(a in prop::collection::vec(any::<u8>(), 0..32),
                                       b in prop::collection::vec(any::<u8>(), 0..32)) {
        prop_assert_eq!(CurrencyName::new(a.clone()) == CurrencyName::new(b.clone()), a == b);
    }

    /// Raw vote options outside 0..=2 are rejected.
    #[test]
    fn vote_option_rejects_out_of_range(raw in 3u8..=255) {
        prop_assert!(VoteOption::try_from(raw).is_err());
    }
}

#[test]
fn result_display_matches_wire_names() {
    assert_eq!(ProposalResult::Pending.to_string(), "PENDING");
    assert_eq!(ProposalResult::Success.to_string(), "SUCCESS");
    assert_eq!(ProposalResult::Fail.to_string(), "FAIL");
}
