//! Schema inference errors.

use thiserror::Error;

/// Errors raised while turning records into a blueprint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaInferenceError {
    /// There is no record to take a representative sample from.
    #[error("cannot infer a schema from an empty record set")]
    EmptyRecords,

    /// Every record is a metadata row.
    #[error("no data record found among {metadata_rows} metadata rows")]
    NoDataRecord { metadata_rows: usize },

    /// A data record does not carry one of the headers.
    #[error("record {index} has no value for header '{header}'")]
    HeterogeneousRecord { index: usize, header: String },

    /// The metadata block cannot be interpreted.
    #[error("malformed metadata row {row}: {reason}")]
    MalformedMetadata { row: usize, reason: String },
}
