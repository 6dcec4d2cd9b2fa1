//! Behavioural properties of the service over a shared store.

use rsvp_core::{
    AggregateCounts, Attendance, AttendancePolicy, CoreError, Limits, Record, RecordDraft,
    RecordId, ServiceConfig, ValidationError,
};
use rsvp_testkit::prelude::*;

#[test]
fn idempotent_read() {
    let fixture = TestService::memory();
    for seed in 1..=5 {
        fixture.service.append(attending(seed, 2)).unwrap();
    }

    let first = fixture.service.list_all().unwrap();
    let second = fixture.service.list_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn delete_removes_exactly_one_and_keeps_order() {
    let fixture = TestService::memory();
    for seed in 1..=6 {
        fixture.service.append(attending(seed, 1)).unwrap();
    }
    let before = fixture.service.list_all().unwrap();
    let target = seeded_id(4);

    fixture.service.delete_by_id(target).unwrap();

    let after = fixture.service.list_all().unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(target));

    let expected: Vec<&Record> = before.iter().filter(|r| r.id() != target).collect();
    let actual: Vec<&Record> = after.iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn not_found_short_circuits_after_one_read() {
    let fixture = TestService::memory();
    fixture.service.append(declined(1)).unwrap();
    let reads = fixture.store.read_count();
    let writes = fixture.store.write_count();

    let missing = RecordId::new();
    let err = fixture.service.delete_by_id(missing).unwrap_err();

    assert!(matches!(err, CoreError::NotFound { id } if id == missing));
    assert_eq!(fixture.store.read_count() - reads, 1);
    assert_eq!(fixture.store.write_count(), writes);
}

#[test]
fn not_found_on_empty_store() {
    let fixture = TestService::memory();
    let err = fixture.service.delete_by_id(seeded_id(1)).unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(fixture.store.read_count(), 1);
    assert_eq!(fixture.store.write_count(), 0);
}

#[test]
fn aggregate_correctness() {
    let fixture = TestService::memory();
    fixture.service.append(attending(1, 2)).unwrap();
    fixture.service.append(attending(2, 3)).unwrap();
    fixture.service.append(declined(3)).unwrap();

    let all = fixture.service.list_all().unwrap();
    assert_eq!(
        fixture.service.summarize(&all),
        AggregateCounts {
            attending_count: 2,
            not_attending_count: 1,
            attending_persons: 5,
            not_attending_persons: 0,
            total_records: 3,
            total_persons: 5,
        }
    );
}

#[test]
fn exhaustion_surfaces_busy_and_keeps_nothing() {
    let fixture = TestService::memory_with(fast_config(3));
    fixture.service.append(declined(1)).unwrap();

    fixture.store.force_conflicts(3);
    let err = fixture.service.append(attending(2, 2)).unwrap_err();

    assert!(matches!(err, CoreError::Busy { attempts: 3 }));
    assert!(err.is_retryable());

    let all = fixture.service.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all.contains(seeded_id(2)));

    // The same record goes through once the contention is gone.
    fixture.service.append(attending(2, 2)).unwrap();
    assert!(fixture.service.list_all().unwrap().contains(seeded_id(2)));
}

#[test]
fn conflicts_below_the_bound_are_invisible() {
    let fixture = TestService::memory_with(fast_config(3));
    fixture.store.force_conflicts(2);

    fixture.service.append(attending(1, 1)).unwrap();
    assert_eq!(fixture.service.list_all().unwrap().len(), 1);
}

#[test]
fn attendance_invariant_reject_policy() {
    let fixture = TestService::memory_with(fast_config(3).with_policy(AttendancePolicy::Reject));

    let err = fixture
        .service
        .submit(RecordDraft::not_attending().with_party_size(3))
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::DeclineWithParty {
            party_size: 3,
            names: 0
        })
    ));
    assert_eq!(fixture.store.write_count(), 0);
    assert!(fixture.service.list_all().unwrap().is_empty());
}

#[test]
fn attendance_invariant_normalize_policy() {
    let fixture =
        TestService::memory_with(fast_config(3).with_policy(AttendancePolicy::Normalize));

    let record = fixture
        .service
        .submit(RecordDraft::not_attending().with_party_size(3))
        .unwrap();

    let stored = fixture.service.list_all().unwrap();
    let stored = stored.get(record.id()).unwrap();
    assert_eq!(stored.attendance(), Attendance::NotAttending);
    assert_eq!(stored.party_size(), 0);
    assert!(stored.names().is_empty());
}

#[test]
fn attending_invariant_holds_under_both_policies() {
    for policy in [AttendancePolicy::Reject, AttendancePolicy::Normalize] {
        let no_party =
            Record::from_draft(RecordDraft::attending(0, ["Ada"]), policy, &Limits::default());
        assert_eq!(no_party.unwrap_err(), ValidationError::MissingPartySize);

        let no_names = Record::from_draft(
            RecordDraft::attending(2, Vec::<String>::new()),
            policy,
            &Limits::default(),
        );
        assert_eq!(no_names.unwrap_err(), ValidationError::MissingNames);
    }
}

#[test]
fn store_failure_is_surfaced_not_swallowed() {
    let fixture = TestService::memory();
    fixture.store.fail_writes(true);

    let err = fixture.service.append(attending(1, 1)).unwrap_err();
    assert!(matches!(err, CoreError::Store(_)));
    assert!(!err.is_retryable());
    assert_eq!(fixture.store.write_count(), 1);
}

#[test]
fn separate_keys_are_separate_collections() {
    let fixture = TestService::memory();
    let other = rsvp_core::RsvpService::new(
        std::sync::Arc::clone(&fixture.store),
        ServiceConfig::new("other-event"),
    )
    .unwrap();

    fixture.service.append(attending(1, 1)).unwrap();
    assert!(other.list_all().unwrap().is_empty());
}

#[test]
fn file_store_keeps_properties() {
    let fixture = TestService::file();
    fixture.service.append(attending(1, 2)).unwrap();
    fixture.service.append(declined(2)).unwrap();

    let first = fixture.service.list_all().unwrap();
    assert_eq!(first, fixture.handler().list_all().unwrap());

    fixture.service.delete_by_id(seeded_id(1)).unwrap();
    assert!(matches!(
        fixture.service.delete_by_id(seeded_id(1)),
        Err(CoreError::NotFound { .. })
    ));
    assert_eq!(fixture.service.list_all().unwrap().len(), 1);
}
