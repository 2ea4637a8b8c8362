//! Change events as delivered by the capture process.
//!
//! A [`Transaction`] groups the [`Operation`]s committed together. Each
//! operation names its source table and carries the capture position it was
//! read from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified source table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    pub catalog: Option<String>,
    pub schema: String,
    pub table: String,
}

impl TableName {
    /// Two-part `schema.table` name.
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Three-part `catalog.schema.table` name.
    pub fn with_catalog(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog: Some(catalog.into()),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Name as written at the source: `schema.table` or `catalog.schema.table`.
    pub fn original_name(&self) -> String {
        match &self.catalog {
            Some(catalog) => format!("{catalog}.{}.{}", self.schema, self.table),
            None => format!("{}.{}", self.schema, self.table),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original_name())
    }
}

/// Kind of row change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    Insert,
    Update,
    /// Update that changed the primary key, carrying distinct before/after keys.
    PrimaryKeyUpdate,
    Delete,
    Truncate,
}

impl OpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpType::Insert => "I",
            OpType::Update => "U",
            OpType::PrimaryKeyUpdate => "PK",
            OpType::Delete => "D",
            OpType::Truncate => "T",
        }
    }

    /// Whether the operation produces both a before and an after image.
    pub fn has_before_and_after(&self) -> bool {
        matches!(self, OpType::PrimaryKeyUpdate)
    }
}

/// One captured row change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    table: TableName,
    op_type: OpType,
    /// Capture file sequence number followed by the byte offset in that file.
    position: String,
    timestamp: DateTime<Utc>,
}

impl Operation {
    pub fn new(
        table: TableName,
        op_type: OpType,
        position: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            table,
            op_type,
            position: position.into(),
            timestamp,
        }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn op_type(&self) -> OpType {
        self.op_type
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    /// Commit timestamp recorded at the source.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Group of operations committed together at the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    commit_time: DateTime<Utc>,
    size: usize,
}

impl Transaction {
    pub fn new(id: impl Into<String>, commit_time: DateTime<Utc>, size: usize) -> Self {
        Self {
            id: id.into(),
            commit_time,
            size,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn commit_time(&self) -> DateTime<Utc> {
        self.commit_time
    }

    /// Number of operations in the transaction.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_original_name() {
        assert_eq!(TableName::new("HR", "EMPLOYEES").original_name(), "HR.EMPLOYEES");
        assert_eq!(
            TableName::with_catalog("PDB1", "HR", "EMPLOYEES").original_name(),
            "PDB1.HR.EMPLOYEES"
        );
        assert_eq!(TableName::new("HR", "EMPLOYEES").short_name(), "EMPLOYEES");
    }

    #[test]
    fn test_operation_serde() {
        let op = Operation::new(
            TableName::new("HR", "EMPLOYEES"),
            OpType::PrimaryKeyUpdate,
            "000000001234",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op_type"], "primary_key_update");
        assert_eq!(json["position"], "000000001234");

        let back: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
        assert!(back.op_type().has_before_and_after());
    }
}
