//! Records: one submitted response each.

mod draft;
mod id;

pub use draft::{AttendancePolicy, Limits, RecordDraft};
pub use id::RecordId;

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Whether a respondent attends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
    /// Coming, with a party of one or more.
    Attending,
    /// Not coming.
    NotAttending,
}

/// One submitted response.
///
/// Records are immutable. A record can only be built from a draft through
/// [`Record::from_draft`], which guarantees the attendance rule:
///
/// - `Attending` ⇒ `party_size >= 1` and at least one name
/// - `NotAttending` ⇒ `party_size == 0` and no names
///
/// Records decoded from a stored collection are re-checked by
/// [`crate::Collection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: RecordId,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    attendance: Attendance,
    party_size: u32,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    client_tag: String,
}

impl Record {
    /// Builds a record with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the draft breaks a limit or the
    /// attendance rule under `policy`.
    pub fn from_draft(
        draft: RecordDraft,
        policy: AttendancePolicy,
        limits: &Limits,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(RecordId::new(), OffsetDateTime::now_utc(), draft, policy, limits)
    }

    /// Builds a record with a caller-chosen id and timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Record::from_draft`].
    pub fn from_parts(
        id: RecordId,
        created_at: OffsetDateTime,
        draft: RecordDraft,
        policy: AttendancePolicy,
        limits: &Limits,
    ) -> Result<Self, ValidationError> {
        let draft = draft.into_checked(policy, limits)?;
        Ok(Self {
            id,
            created_at,
            attendance: draft.attendance,
            party_size: draft.party_size,
            names: draft.names,
            contact: draft.contact,
            display_name: draft.display_name,
            note: draft.note,
            client_tag: draft.client_tag,
        })
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the creation time.
    #[must_use]
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns the attendance flag.
    #[must_use]
    pub fn attendance(&self) -> Attendance {
        self.attendance
    }

    /// Returns the party size.
    #[must_use]
    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Returns the attendee names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the contact field.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the client tag.
    #[must_use]
    pub fn client_tag(&self) -> &str {
        &self.client_tag
    }

    /// Checks the attendance rule.
    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        check_consistency(self.attendance, self.party_size, self.names.len())
    }
}

fn check_consistency(
    attendance: Attendance,
    party_size: u32,
    names: usize,
) -> Result<(), ValidationError> {
    match attendance {
        Attendance::Attending if party_size == 0 => Err(ValidationError::MissingPartySize),
        Attendance::Attending if names == 0 => Err(ValidationError::MissingNames),
        Attendance::NotAttending if party_size != 0 || names != 0 => {
            Err(ValidationError::DeclineWithParty { party_size, names })
        }
        _ => Ok(()),
    }
}
