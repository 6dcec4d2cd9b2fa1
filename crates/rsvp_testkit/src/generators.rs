//! Property-based test generators using proptest.
//!
//! Provides strategies for generating drafts and mutation sequences.

use proptest::prelude::*;
use rsvp_core::{Attendance, RecordDraft};

/// Strategy for attendee names within default limits.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{1,15}( [A-Z][a-z]{1,15})?").expect("Invalid regex")
}

/// Strategy for drafts that satisfy the attendance rule and default limits.
pub fn valid_draft_strategy() -> impl Strategy<Value = RecordDraft> {
    prop_oneof![
        (1u32..=10, prop::collection::vec(name_strategy(), 1..5))
            .prop_map(|(party_size, names)| RecordDraft::attending(party_size, names)),
        Just(RecordDraft::not_attending()),
    ]
}

/// Strategy for arbitrary drafts, including ones that break the
/// attendance rule.
pub fn any_draft_strategy() -> impl Strategy<Value = RecordDraft> {
    (
        prop_oneof![Just(Attendance::Attending), Just(Attendance::NotAttending)],
        0u32..=60,
        prop::collection::vec(prop::string::string_regex("[ a-z\t]{0,8}").expect("Invalid regex"), 0..4),
        prop::string::string_regex("[ -~]{0,20}").expect("Invalid regex"),
    )
        .prop_map(|(attendance, party_size, names, note)| RecordDraft {
            attendance,
            party_size,
            names,
            contact: String::new(),
            display_name: String::new(),
            note,
            client_tag: String::new(),
        })
}

/// A mutation to apply in model-based tests.
#[derive(Debug, Clone)]
pub enum Op {
    /// Append a record built from the draft.
    Append(RecordDraft),
    /// Delete the record at this index of the current collection,
    /// modulo its length. On an empty collection, deletes a missing id.
    Delete(usize),
}

/// Strategy for sequences of mutations.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => valid_draft_strategy().prop_map(Op::Append),
            1 => any::<usize>().prop_map(Op::Delete),
        ],
        0..max_len,
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvp_core::{AttendancePolicy, Limits, Record};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn valid_drafts_build_records(draft in valid_draft_strategy()) {
            let record = Record::from_draft(draft, AttendancePolicy::Reject, &Limits::default());
            prop_assert!(record.is_ok());
        }

        #[test]
        fn names_fit_default_limit(name in name_strategy()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().count() <= Limits::default().name);
        }
    }
}
