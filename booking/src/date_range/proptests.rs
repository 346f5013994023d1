//! Property-based tests for overlap arithmetic.

use super::{is_valid_range, overlaps, DateRange};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Days within a few years of a fixed epoch
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..2000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

// Ordered pair of dates forming a valid range
fn range_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..60).prop_map(|(from, len)| (from, from + Duration::days(len)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Overlap does not depend on argument order
    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(
            overlaps(a.0, a.1, b.0, b.1),
            overlaps(b.0, b.1, a.0, a.1)
        );
    }

    // Every valid range overlaps itself
    #[test]
    fn overlap_is_reflexive(a in range_strategy()) {
        prop_assert!(overlaps(a.0, a.1, a.0, a.1));
    }

    // Touching on the last day counts as an overlap
    #[test]
    fn shared_boundary_day_overlaps(a in range_strategy(), len in 0i64..30) {
        let b_to = a.1 + Duration::days(len);
        prop_assert!(overlaps(a.0, a.1, a.1, b_to));
    }

    // A gap of one day or more never overlaps
    #[test]
    fn separated_ranges_do_not_overlap(a in range_strategy(), gap in 1i64..30, len in 0i64..30) {
        let b_from = a.1 + Duration::days(gap);
        let b_to = b_from + Duration::days(len);
        prop_assert!(!overlaps(a.0, a.1, b_from, b_to));
        prop_assert!(!overlaps(b_from, b_to, a.0, a.1));
    }

    // Overlap agrees with a brute-force day-by-day comparison
    #[test]
    fn overlap_matches_shared_day(a in range_strategy(), b in range_strategy()) {
        let shared = a.0.iter_days()
            .take_while(|day| *day <= a.1)
            .any(|day| day >= b.0 && day <= b.1);
        prop_assert_eq!(overlaps(a.0, a.1, b.0, b.1), shared);
    }

    // Validity is false exactly when from is after to
    #[test]
    fn validity_iff_ordered(from in date_strategy(), to in date_strategy()) {
        prop_assert_eq!(is_valid_range(Some(from), Some(to)), from <= to);
    }

    // Missing bounds are always structurally valid and never overlap
    #[test]
    fn incomplete_ranges_are_inert(a in range_strategy(), open in date_strategy()) {
        let full = DateRange::between(a.0, a.1);
        let half = DateRange::new(Some(open), None);

        prop_assert!(half.is_valid());
        prop_assert!(!full.overlaps(&half));
        prop_assert!(!half.overlaps(&full));
    }
}
