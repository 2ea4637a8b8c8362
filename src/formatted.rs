//! Per-operation accumulator of structured records.
//!
//! Formatting one operation yields at most two `(key, record)` pairs: the
//! after image, or the before and after images of a primary-key update.

use crate::error::{FormatError, Result};
use connect_core::Struct;

/// Records one operation can produce.
pub const MAX_RECORDS: usize = 2;

/// Ordered `(optional key, record)` pairs for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedData {
    entries: Vec<(Option<Struct>, Struct)>,
}

impl FormattedData {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_RECORDS),
        }
    }

    /// Append a record and its key, keeping insertion order.
    pub fn push(&mut self, key: Option<Struct>, record: Struct) -> Result<()> {
        if self.entries.len() >= MAX_RECORDS {
            return Err(FormatError::Capacity {
                capacity: MAX_RECORDS,
            });
        }
        self.entries.push((key, record));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(Option<&Struct>, &Struct)> {
        self.entries
            .get(index)
            .map(|(key, record)| (key.as_ref(), record))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&Struct>, &Struct)> {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_ref(), record))
    }

    pub fn into_entries(self) -> Vec<(Option<Struct>, Struct)> {
        self.entries
    }

    /// File suffix for schemas written alongside formatted data.
    pub fn schema_suffix(&self) -> &'static str {
        ".avsc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_core::{Schema, SchemaBuilder};

    fn schema() -> Schema {
        SchemaBuilder::structure()
            .field("ID", SchemaBuilder::int32().build().unwrap())
            .build()
            .unwrap()
    }

    fn row(id: i32) -> Struct {
        Struct::new(schema()).unwrap().with("ID", id).unwrap()
    }

    #[test]
    fn test_push_keeps_order() {
        let mut data = FormattedData::new();
        assert!(data.is_empty());

        data.push(Some(row(1)), row(10)).unwrap();
        data.push(None, row(20)).unwrap();

        assert_eq!(data.len(), 2);
        let (key, record) = data.get(0).unwrap();
        assert_eq!(key, Some(&row(1)));
        assert_eq!(record, &row(10));
        let (key, record) = data.get(1).unwrap();
        assert!(key.is_none());
        assert_eq!(record, &row(20));
        assert!(data.get(2).is_none());

        let records: Vec<_> = data.iter().map(|(_, r)| r.clone()).collect();
        assert_eq!(records, vec![row(10), row(20)]);
    }

    #[test]
    fn test_capacity() {
        let mut data = FormattedData::new();
        data.push(None, row(1)).unwrap();
        data.push(None, row(2)).unwrap();

        assert_eq!(
            data.push(None, row(3)),
            Err(FormatError::Capacity { capacity: 2 })
        );
        assert_eq!(data.into_entries().len(), 2);
    }

    #[test]
    fn test_schema_suffix() {
        assert_eq!(FormattedData::new().schema_suffix(), ".avsc");
    }
}
