//! Property-based tests for `Reservation` and `ReservationId`.

use super::{Reservation, ReservationId, ReservationStatus};
use crate::room::RoomId;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

fn date_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((0i64..1500).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + Duration::days(offset)
    }))
}

fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Any UUID survives Display then FromStr unchanged
    #[test]
    fn reservation_id_text_is_stable(raw in uuid_strategy()) {
        let id = ReservationId::from(raw);
        let parsed: ReservationId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    // The builder accepts a range exactly when it is valid
    #[test]
    fn builder_accepts_only_valid_ranges(from in date_strategy(), to in date_strategy()) {
        let result = Reservation::builder(RoomId::new_v4())
            .from_date(from)
            .to_date(to)
            .build();

        let valid = match (from, to) {
            (Some(f), Some(t)) => f <= t,
            _ => true,
        };
        prop_assert_eq!(result.is_ok(), valid);
    }

    // Delete then restore returns to the original record
    #[test]
    fn delete_restore_roundtrip(secs in 0i64..2_000_000_000) {
        let original = Reservation::builder(RoomId::new_v4()).build().unwrap();
        let mut reservation = original.clone();

        reservation.mark_deleted(Utc.timestamp_opt(secs, 0).unwrap());
        prop_assert_eq!(reservation.status(), ReservationStatus::Deleted);

        reservation.restore();
        prop_assert_eq!(reservation, original);
    }
}
