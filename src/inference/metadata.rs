//! Metadata rows embedded among the records.
//!
//! A record whose `Field Name` cell holds one of the sentinels below does not
//! carry data; its cells, keyed by header, describe the field of that header.

use std::fmt;

use super::error::SchemaInferenceError;
use crate::model::Record;

/// Column whose value identifies a metadata row.
pub const FIELD_NAME_COLUMN: &str = "Field Name";

/// Cell value that switches a constraint on for a header.
pub const CONSTRAINT_MARKER: &str = "x";

/// The kind of a metadata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Required,
    Unique,
    Enumerations,
}

impl MetadataKind {
    pub const ALL: [MetadataKind; 3] = [Self::Required, Self::Unique, Self::Enumerations];

    /// The `Field Name` value that marks this kind of row.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::Required => "Is Required?",
            Self::Unique => "Is Unique?",
            Self::Enumerations => "Enumerations",
        }
    }

    pub fn from_sentinel(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.sentinel() == value)
    }

    /// Kind of a record, or `None` for a data record.
    pub fn of(record: &Record) -> Option<Self> {
        record.text(FIELD_NAME_COLUMN).and_then(Self::from_sentinel)
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Whether a record is a metadata row.
pub fn is_metadata_record(record: &Record) -> bool {
    MetadataKind::of(record).is_some()
}

/// The first metadata row of a kind.
pub fn find_metadata_row(records: &[Record], kind: MetadataKind) -> Option<&Record> {
    records.iter().find(|r| MetadataKind::of(r) == Some(kind))
}

/// Check that each kind of metadata row appears at most once.
pub fn validate_metadata_block(records: &[Record]) -> Result<(), SchemaInferenceError> {
    let mut seen: Vec<(MetadataKind, usize)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(kind) = MetadataKind::of(record) else {
            continue;
        };
        if let Some((_, first)) = seen.iter().find(|(k, _)| *k == kind) {
            return Err(SchemaInferenceError::MalformedMetadata {
                row: index,
                reason: format!("duplicate '{}' row (first at row {})", kind, first),
            });
        }
        seen.push((kind, index));
    }

    Ok(())
}
