//! Pure mutation intents applied by the controller.
//!
//! A transform receives the collection as just read and says what it should
//! become. It may be called once per attempt, each time against a newer
//! collection, so it must depend on nothing but its argument and what it
//! captured.

use crate::collection::Collection;
use crate::record::{Record, RecordId};
use thiserror::Error;

/// What a transform wants written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    /// Write this collection, then report `T`.
    Write(Collection, T),
    /// Nothing to write; report `T` straight away.
    Unchanged(T),
}

/// A transform refused the mutation based on current content.
///
/// Rejections end the mutation immediately; they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No record with this id exists.
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

/// Appends `record` to the end of the collection.
///
/// If the id is already present the record has been committed before and
/// the transform reports [`Change::Unchanged`]. Append never rejects.
pub fn append(record: Record) -> impl FnMut(&Collection) -> Result<Change<RecordId>, Rejection> {
    move |current| {
        let id = record.id();
        let mut next = current.clone();
        match next.insert(record.clone()) {
            Ok(()) => Ok(Change::Write(next, id)),
            Err(_) => Ok(Change::Unchanged(id)),
        }
    }
}

/// Removes exactly the record with `id`.
///
/// Rejects with [`Rejection::NotFound`] if it is absent.
pub fn delete(id: RecordId) -> impl FnMut(&Collection) -> Result<Change<RecordId>, Rejection> {
    move |current| {
        let mut next = current.clone();
        match next.remove(id) {
            Some(_) => Ok(Change::Write(next, id)),
            None => Err(Rejection::NotFound(id)),
        }
    }
}
