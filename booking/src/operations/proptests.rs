//! Property-based tests for operations module.
//!
//! These tests drive random operation sequences through the service and
//! check the lifecycle invariants after every step.

use crate::operations::{decide, BookingService, Decision};
use crate::request::{ActionHint, DeletedAtField, ReservationPayload, UpdateRequest};
use crate::store::{MemoryStore, ReservationFilter, ReservationStore};
use crate::{Reservation, ReservationId, Room, RoomId};
use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Create { room: usize, start: i64, len: i64 },
    Replace { target: usize, room: usize, start: i64, len: i64 },
    Restore { target: usize },
    SoftDelete { target: usize },
    HardDelete { target: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..2usize, 0..30i64, 0..5i64).prop_map(|(room, start, len)| Step::Create {
            room,
            start,
            len
        }),
        (0..8usize, 0..2usize, 0..30i64, 0..5i64).prop_map(|(target, room, start, len)| {
            Step::Replace {
                target,
                room,
                start,
                len,
            }
        }),
        (0..8usize).prop_map(|target| Step::Restore { target }),
        (0..8usize).prop_map(|target| Step::SoftDelete { target }),
        (0..8usize).prop_map(|target| Step::HardDelete { target }),
    ]
}

// Strategy for the tri-state delete marker
fn marker_strategy() -> impl Strategy<Value = DeletedAtField> {
    prop_oneof![
        Just(DeletedAtField::Absent),
        Just(DeletedAtField::Null),
        Just(DeletedAtField::Timestamp(Utc::now())),
    ]
}

fn day(offset: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 1, 1).map(|d| d + Duration::days(offset))
}

fn payload(room: RoomId, start: i64, len: i64) -> ReservationPayload {
    ReservationPayload {
        from: day(start),
        to: day(start + len),
        room_id: Some(room.to_string()),
        ..ReservationPayload::default()
    }
}

fn pick(ids: &[ReservationId], index: usize) -> Option<ReservationId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn active_set_is_disjoint(store: &MemoryStore) -> bool {
    let active = store.list_filtered(&ReservationFilter::new()).unwrap_or_default();
    active.iter().enumerate().all(|(i, a)| {
        active[i + 1..]
            .iter()
            .all(|b| a.room_id() != b.room_id() || !a.range().overlaps(&b.range()))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // No sequence of operations leaves two active reservations overlapping in one room
    #[test]
    fn active_set_stays_disjoint(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut store = MemoryStore::new();
        let rooms: Vec<RoomId> = (0..2)
            .map(|i| {
                let room = Room::new(format!("room-{i}")).unwrap();
                let id = room.id;
                store.add_room(room);
                id
            })
            .collect();
        let mut ids: Vec<ReservationId> = Vec::new();

        for step in steps {
            let mut service = BookingService::new(&mut store);
            // Rejections are expected; only the invariant matters
            match step {
                Step::Create { room, start, len } => {
                    if let Ok(result) = service.create(payload(rooms[room], start, len)) {
                        if let Some(r) = result.reservation {
                            ids.push(r.id());
                        }
                    }
                }
                Step::Replace { target: t, room, start, len } => {
                    if let Some(id) = pick(&ids, t) {
                        let request = UpdateRequest::new(
                            ActionHint::Replace,
                            Some(payload(rooms[room], start, len)),
                        );
                        let _ = service.update(id, request);
                    }
                }
                Step::Restore { target: t } => {
                    if let Some(id) = pick(&ids, t) {
                        let _ = service.update(id, UpdateRequest::new(ActionHint::Restore, None));
                    }
                }
                Step::SoftDelete { target: t } => {
                    if let Some(id) = pick(&ids, t) {
                        let _ = service.delete(id, false);
                    }
                }
                Step::HardDelete { target: t } => {
                    if let Some(id) = pick(&ids, t) {
                        let _ = service.delete(id, true);
                    }
                }
            }

            prop_assert!(active_set_is_disjoint(&store));
        }
    }

    // Every successful mutation records exactly one audit event
    #[test]
    fn one_audit_event_per_mutation(steps in prop::collection::vec(step_strategy(), 1..30)) {
        let mut store = MemoryStore::new();
        let room = Room::new("audited").unwrap();
        let room_id = room.id;
        store.add_room(room);
        let mut ids: Vec<ReservationId> = Vec::new();
        let mut successes = 0usize;

        for step in steps {
            let mut service = BookingService::new(&mut store);
            let ok = match step {
                Step::Create { start, len, .. } => match service.create(payload(room_id, start, len)) {
                    Ok(result) => {
                        if let Some(r) = result.reservation {
                            ids.push(r.id());
                        }
                        true
                    }
                    Err(_) => false,
                },
                Step::Replace { target, start, len, .. } => pick(&ids, target).is_some_and(|id| {
                    let body = payload(room_id, start, len);
                    service
                        .update(id, UpdateRequest::new(ActionHint::Replace, Some(body)))
                        .is_ok()
                }),
                Step::Restore { target } => pick(&ids, target).is_some_and(|id| {
                    service.update(id, UpdateRequest::new(ActionHint::Restore, None)).is_ok()
                }),
                Step::SoftDelete { target } => {
                    pick(&ids, target).is_some_and(|id| service.delete(id, false).is_ok())
                }
                Step::HardDelete { target } => {
                    pick(&ids, target).is_some_and(|id| service.delete(id, true).is_ok())
                }
            };
            if ok {
                successes += 1;
            }
        }

        prop_assert_eq!(store.audit_events().len(), successes);
    }

    // Restore is reachable only from the soft-deleted state
    #[test]
    fn restore_requires_soft_deleted(
        stored in prop::option::of(any::<bool>()),
        restore_hint in any::<bool>(),
        marker in marker_strategy(),
        with_body in any::<bool>(),
    ) {
        let existing = stored.map(|deleted| {
            let mut r = Reservation::builder(RoomId::new_v4()).build().unwrap();
            if deleted {
                r.mark_deleted(Utc::now());
            }
            r
        });
        let body = with_body.then(|| ReservationPayload {
            deleted_at: marker.clone(),
            ..ReservationPayload::default()
        });
        let action = if restore_hint { ActionHint::Restore } else { ActionHint::Replace };
        let request = UpdateRequest::new(action, body);

        let soft_deleted = existing.as_ref().is_some_and(|r| !r.is_active());
        match decide(existing.as_ref(), &request) {
            Ok(Decision::Restore) => prop_assert!(soft_deleted),
            Ok(Decision::Create) => {
                prop_assert!(existing.is_none());
                prop_assert!(!restore_hint);
                prop_assert!(request.body.is_some());
            }
            Ok(Decision::Replace) => {
                prop_assert!(existing.is_some());
                prop_assert!(!restore_hint);
                prop_assert!(!matches!(request.deleted_at(), DeletedAtField::Timestamp(_)));
            }
            Err(_) => prop_assert!(!(soft_deleted && restore_hint)),
        }
    }
}
