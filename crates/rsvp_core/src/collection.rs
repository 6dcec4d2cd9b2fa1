//! The collection: every record, stored as one document.

use crate::error::CollectionError;
use crate::record::{Record, RecordId};
use serde::{Deserialize, Serialize, Serializer};

/// Ordered sequence of records with unique ids.
///
/// The collection is the whole payload of the shared document. It is
/// always read and written as one blob; its version belongs to the store.
/// Order is commit order: appends go to the end, deletes keep the relative
/// order of what remains.
///
/// On the wire a collection is a JSON array of records. Decoding rejects
/// duplicate ids and records that break the attendance rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Record>")]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in commit order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates records in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns true if a record with `id` exists.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Records sorted for display, newest first.
    ///
    /// Ties keep commit order.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&Record> {
        let mut sorted: Vec<&Record> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        sorted
    }

    /// Adds a record at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] if the id is already present.
    pub fn insert(&mut self, record: Record) -> Result<(), CollectionError> {
        if self.contains(record.id()) {
            return Err(CollectionError::DuplicateId(record.id()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes the record with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        self.position(id).map(|idx| self.records.remove(idx))
    }

    /// Decodes a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid collection.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encodes the collection as a document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl TryFrom<Vec<Record>> for Collection {
    type Error = CollectionError;

    fn try_from(records: Vec<Record>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        for record in records {
            record.check().map_err(|source| CollectionError::Inconsistent {
                id: record.id(),
                source,
            })?;
            collection.insert(record)?;
        }
        Ok(collection)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AttendancePolicy, Limits, RecordDraft};
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn record(seed: u8, at: OffsetDateTime) -> Record {
        Record::from_parts(
            RecordId::from_bytes([seed; 16]),
            at,
            RecordDraft::attending(1, ["Guest"]),
            AttendancePolicy::Reject,
            &Limits::default(),
        )
        .unwrap()
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut c = Collection::new();
        let r = record(1, datetime!(2026-01-01 0:00 UTC));
        c.insert(r.clone()).unwrap();

        assert_eq!(c.insert(r.clone()), Err(CollectionError::DuplicateId(r.id())));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_preserves_order() {
        let mut c = Collection::new();
        for seed in 1..=4 {
            c.insert(record(seed, datetime!(2026-01-01 0:00 UTC))).unwrap();
        }

        let removed = c.remove(RecordId::from_bytes([2; 16])).unwrap();
        assert_eq!(removed.id(), RecordId::from_bytes([2; 16]));

        let ids: Vec<_> = c.iter().map(Record::id).collect();
        assert_eq!(
            ids,
            vec![
                RecordId::from_bytes([1; 16]),
                RecordId::from_bytes([3; 16]),
                RecordId::from_bytes([4; 16]),
            ]
        );
        assert!(c.remove(RecordId::from_bytes([2; 16])).is_none());
    }

    #[test]
    fn newest_first_sorts_descending() {
        let mut c = Collection::new();
        c.insert(record(1, datetime!(2026-01-01 10:00 UTC))).unwrap();
        c.insert(record(2, datetime!(2026-01-03 10:00 UTC))).unwrap();
        c.insert(record(3, datetime!(2026-01-02 10:00 UTC))).unwrap();

        let order: Vec<u8> = c
            .newest_first()
            .iter()
            .map(|r| r.id().as_uuid().as_bytes()[0])
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
        // Stored order is untouched.
        assert_eq!(c.records()[0].id(), RecordId::from_bytes([1; 16]));
    }

    #[test]
    fn encode_decode_preserves_collection() {
        let mut c = Collection::new();
        c.insert(record(1, datetime!(2026-01-01 10:00 UTC))).unwrap();
        c.insert(record(2, datetime!(2026-01-02 10:00 UTC))).unwrap();

        let bytes = c.encode().unwrap();
        assert!(bytes.starts_with(b"["));
        assert_eq!(Collection::decode(&bytes).unwrap(), c);
    }

    #[test]
    fn empty_collection_is_empty_array() {
        assert_eq!(Collection::new().encode().unwrap(), b"[]");
        assert!(Collection::decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let r = record(1, datetime!(2026-01-01 10:00 UTC));
        let bytes = serde_json::to_vec(&vec![r.clone(), r]).unwrap();
        let err = Collection::decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("duplicate record id"));
    }

    #[test]
    fn decode_rejects_inconsistent_record() {
        let json = r#"[{
            "id": "01010101-0101-0101-0101-010101010101",
            "createdAt": "2026-01-01T00:00:00Z",
            "attendance": "not_attending",
            "partySize": 3
        }]"#;
        let err = Collection::decode(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Collection::decode(b"{not json").is_err());
    }
}
