//! Raw submissions and the rules that turn them into records.

use super::Attendance;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// What to do with a declined draft that still carries attendees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendancePolicy {
    /// Refuse the draft with [`ValidationError::DeclineWithParty`].
    Reject,
    /// Force the party size to zero and drop the names.
    #[default]
    Normalize,
}

/// Length and size caps applied to drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum characters in the display name.
    pub display_name: usize,
    /// Maximum characters in the contact field.
    pub contact: usize,
    /// Maximum characters in the free-text note.
    pub note: usize,
    /// Maximum characters in the client tag.
    pub client_tag: usize,
    /// Maximum characters in a single attendee name.
    pub name: usize,
    /// Maximum number of attendee names.
    pub max_names: usize,
    /// Maximum party size.
    pub max_party_size: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            display_name: 100,
            contact: 200,
            note: 1000,
            client_tag: 64,
            name: 100,
            max_names: 20,
            max_party_size: 50,
        }
    }
}

/// Caller-supplied content for a new record.
///
/// A draft is unchecked input. It becomes a [`super::Record`] only through
/// [`super::Record::from_draft`], which sanitizes and validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    /// Whether the respondent attends.
    pub attendance: Attendance,
    /// Number of people attending.
    #[serde(default)]
    pub party_size: u32,
    /// Names of the attendees.
    #[serde(default)]
    pub names: Vec<String>,
    /// How to reach the respondent.
    #[serde(default)]
    pub contact: String,
    /// Name shown next to the response.
    #[serde(default)]
    pub display_name: String,
    /// Free-text message.
    #[serde(default)]
    pub note: String,
    /// Opaque tag set by the submitting client.
    #[serde(default)]
    pub client_tag: String,
}

impl RecordDraft {
    /// Creates an attending draft.
    pub fn attending<I, N>(party_size: u32, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            attendance: Attendance::Attending,
            party_size,
            names: names.into_iter().map(Into::into).collect(),
            contact: String::new(),
            display_name: String::new(),
            note: String::new(),
            client_tag: String::new(),
        }
    }

    /// Creates a declining draft.
    pub fn not_attending() -> Self {
        Self {
            attendance: Attendance::NotAttending,
            ..Self::attending(0, Vec::<String>::new())
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self
    }

    /// Sets the contact field.
    pub fn with_contact(mut self, value: impl Into<String>) -> Self {
        self.contact = value.into();
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, value: impl Into<String>) -> Self {
        self.note = value.into();
        self
    }

    /// Sets the client tag.
    pub fn with_client_tag(mut self, value: impl Into<String>) -> Self {
        self.client_tag = value.into();
        self
    }

    /// Sets the party size.
    pub fn with_party_size(mut self, party_size: u32) -> Self {
        self.party_size = party_size;
        self
    }

    /// Sets the attendee names.
    pub fn with_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sanitizes every field, applies the attendance policy and checks limits.
    pub(crate) fn into_checked(
        self,
        policy: AttendancePolicy,
        limits: &Limits,
    ) -> Result<Self, ValidationError> {
        let mut draft = Self {
            attendance: self.attendance,
            party_size: self.party_size,
            names: self
                .names
                .iter()
                .map(|n| sanitize(n))
                .filter(|n| !n.is_empty())
                .collect(),
            contact: sanitize(&self.contact),
            display_name: sanitize(&self.display_name),
            note: sanitize(&self.note),
            client_tag: sanitize(&self.client_tag),
        };

        if draft.attendance == Attendance::NotAttending && policy == AttendancePolicy::Normalize {
            draft.party_size = 0;
            draft.names.clear();
        }

        check_len("displayName", &draft.display_name, limits.display_name)?;
        check_len("contact", &draft.contact, limits.contact)?;
        check_len("note", &draft.note, limits.note)?;
        check_len("clientTag", &draft.client_tag, limits.client_tag)?;
        for name in &draft.names {
            check_len("name", name, limits.name)?;
        }
        if draft.names.len() > limits.max_names {
            return Err(ValidationError::TooManyNames {
                count: draft.names.len(),
                max: limits.max_names,
            });
        }
        if draft.party_size > limits.max_party_size {
            return Err(ValidationError::PartyTooLarge {
                size: draft.party_size,
                max: limits.max_party_size,
            });
        }

        super::check_consistency(draft.attendance, draft.party_size, draft.names.len())?;
        Ok(draft)
    }
}

/// Strips control characters and surrounding whitespace.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_controls_and_whitespace() {
        assert_eq!(sanitize("  Ada\u{0}\n Lovelace\t "), "Ada Lovelace");
        assert_eq!(sanitize("\r\n"), "");
    }

    #[test]
    fn blank_names_are_dropped() {
        let draft = RecordDraft::attending(2, ["Ada", "   ", "Grace"])
            .into_checked(AttendancePolicy::Reject, &Limits::default())
            .unwrap();
        assert_eq!(draft.names, vec!["Ada", "Grace"]);
    }

    #[test]
    fn only_blank_names_counts_as_missing() {
        let err = RecordDraft::attending(1, [" ", "\t"])
            .into_checked(AttendancePolicy::Normalize, &Limits::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingNames);
    }

    #[test]
    fn length_caps_count_characters() {
        let limits = Limits {
            note: 3,
            ..Limits::default()
        };
        let ok = RecordDraft::not_attending().with_note("äöü");
        assert!(ok.into_checked(AttendancePolicy::Reject, &limits).is_ok());

        let too_long = RecordDraft::not_attending().with_note("abcd");
        assert_eq!(
            too_long
                .into_checked(AttendancePolicy::Reject, &limits)
                .unwrap_err(),
            ValidationError::TooLong {
                field: "note",
                max: 3
            }
        );
    }

    #[test]
    fn too_many_names_rejected() {
        let limits = Limits {
            max_names: 2,
            ..Limits::default()
        };
        let err = RecordDraft::attending(3, ["a", "b", "c"])
            .into_checked(AttendancePolicy::Reject, &limits)
            .unwrap_err();
        assert_eq!(err, ValidationError::TooManyNames { count: 3, max: 2 });
    }

    #[test]
    fn party_size_cap() {
        let err = RecordDraft::attending(51, ["a"])
            .into_checked(AttendancePolicy::Reject, &Limits::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::PartyTooLarge { size: 51, max: 50 });
    }

    #[test]
    fn draft_json_uses_camel_case() {
        let draft: RecordDraft = serde_json::from_str(
            r#"{"attendance":"attending","partySize":2,"names":["A","B"],"displayName":"A&B"}"#,
        )
        .unwrap();
        assert_eq!(draft.party_size, 2);
        assert_eq!(draft.display_name, "A&B");
        assert!(draft.note.is_empty());
    }
}
