//! Schema inference.
//!
//! Turns the records of an uploaded sheet into a [`Blueprint`](crate::model::Blueprint).
//! Records may carry a metadata block: rows whose `Field Name` cell is one of
//! `Is Required?`, `Is Unique?` or `Enumerations`, holding per-header markers
//! instead of data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       SchemaSynthesizer                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  FieldTypeInferrer        │  Metadata extraction          │  │
//! │  │  - tag_mapping (TypeTable)│  - extract_constraints()      │  │
//! │  │  - runtime_shape          │  - extract_enum_options()     │  │
//! │  │                           │  - validate_metadata_block()  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use workbook_agent::inference::SchemaSynthesizer;
//!
//! let synthesizer = SchemaSynthesizer::from_settings(&settings.inference);
//! let blueprint = synthesizer.synthesize_records(&records)?;
//! ```

mod constraints;
mod enumerations;
mod error;
mod inferrer;
mod metadata;
mod synthesizer;
mod type_table;

pub use constraints::extract_constraints;
pub use enumerations::extract_enum_options;
pub use error::SchemaInferenceError;
pub use inferrer::FieldTypeInferrer;
pub use metadata::{
    find_metadata_row, is_metadata_record, validate_metadata_block, MetadataKind,
    CONSTRAINT_MARKER, FIELD_NAME_COLUMN,
};
pub use synthesizer::SchemaSynthesizer;
pub use type_table::TypeTable;
