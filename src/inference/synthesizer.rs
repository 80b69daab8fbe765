//! Blueprint synthesis.
//!
//! Combines the pieces of this module into a single pass over the headers:
//!
//! ```text
//! records ──► metadata check ──► sample record ──► header check
//!                                      │
//!        for each header ◄─────────────┘
//!          ├─ inferrer      sample cell  → type
//!          ├─ constraints   metadata     → [required | unique]
//!          ├─ enumerations  (enum only)  → options
//!          └─ FieldConfig::for_type      → config
//! ```

use log::debug;

use super::constraints::extract_constraints;
use super::enumerations::extract_enum_options;
use super::error::SchemaInferenceError;
use super::inferrer::FieldTypeInferrer;
use super::metadata::{is_metadata_record, validate_metadata_block, FIELD_NAME_COLUMN};
use super::type_table::TypeTable;
use crate::config::{InferenceMode, InferenceSettings};
use crate::model::{Blueprint, FieldConfig, FieldDescriptor, FieldType, Record, BLUEPRINT_NAME};

/// Turns a sheet's records into a [`Blueprint`].
///
/// Synthesis is a pure function of its inputs: the same headers and records
/// always produce the same blueprint.
#[derive(Debug, Clone)]
pub struct SchemaSynthesizer {
    mode: InferenceMode,
    type_table: TypeTable,
    validate_headers: bool,
}

impl Default for SchemaSynthesizer {
    fn default() -> Self {
        Self {
            mode: InferenceMode::Auto,
            type_table: TypeTable::default(),
            validate_headers: true,
        }
    }
}

impl SchemaSynthesizer {
    pub fn new(mode: InferenceMode, type_table: TypeTable) -> Self {
        Self {
            mode,
            type_table,
            validate_headers: true,
        }
    }

    pub fn from_settings(settings: &InferenceSettings) -> Self {
        Self {
            mode: settings.mode,
            type_table: TypeTable::new(settings.type_tags.clone()),
            validate_headers: settings.validate_headers,
        }
    }

    /// Toggle the uniform-header check on data records.
    pub fn with_header_validation(mut self, enabled: bool) -> Self {
        self.validate_headers = enabled;
        self
    }

    pub fn type_table(&self) -> &TypeTable {
        &self.type_table
    }

    /// Headers of the first record in column order, without the metadata column.
    pub fn discover_headers(records: &[Record]) -> Result<Vec<String>, SchemaInferenceError> {
        let first = records.first().ok_or(SchemaInferenceError::EmptyRecords)?;
        Ok(first
            .values
            .headers()
            .filter(|h| *h != FIELD_NAME_COLUMN)
            .map(str::to_string)
            .collect())
    }

    /// Discover headers from the records and synthesize in one step.
    pub fn synthesize_records(&self, records: &[Record]) -> Result<Blueprint, SchemaInferenceError> {
        let headers = Self::discover_headers(records)?;
        self.synthesize(&headers, records)
    }

    /// Build a blueprint with one field per header, in header order.
    pub fn synthesize(
        &self,
        headers: &[String],
        records: &[Record],
    ) -> Result<Blueprint, SchemaInferenceError> {
        if records.is_empty() {
            return Err(SchemaInferenceError::EmptyRecords);
        }

        validate_metadata_block(records)?;

        let sample = records
            .iter()
            .find(|r| !is_metadata_record(r))
            .ok_or(SchemaInferenceError::NoDataRecord {
                metadata_rows: records.len(),
            })?;

        if self.validate_headers {
            check_uniform_headers(headers, records)?;
        }

        let inferrer = FieldTypeInferrer::resolve(self.mode, &self.type_table, sample);
        let mut constraints = extract_constraints(headers, records);

        debug!(
            "Synthesizing blueprint: {} headers, {} records, {} inference",
            headers.len(),
            records.len(),
            inferrer.name()
        );

        let fields = headers
            .iter()
            .filter(|h| h.as_str() != FIELD_NAME_COLUMN)
            .map(|header| {
                let field_type = sample
                    .get(header)
                    .map_or(FieldType::String, |cell| inferrer.infer(&cell.value));

                let options = if field_type == FieldType::Enum {
                    extract_enum_options(header, records)
                } else {
                    Vec::new()
                };

                FieldDescriptor {
                    key: header.clone(),
                    name: header.clone(),
                    field_type,
                    constraints: constraints.remove(header).unwrap_or_default(),
                    config: FieldConfig::for_type(field_type, options),
                }
            })
            .collect();

        Ok(Blueprint {
            name: BLUEPRINT_NAME.to_string(),
            fields,
        })
    }
}

fn check_uniform_headers(headers: &[String], records: &[Record]) -> Result<(), SchemaInferenceError> {
    for (index, record) in records.iter().enumerate() {
        if is_metadata_record(record) {
            continue;
        }
        if let Some(missing) = headers.iter().find(|h| !record.values.contains(h)) {
            return Err(SchemaInferenceError::HeterogeneousRecord {
                index,
                header: missing.clone(),
            });
        }
    }
    Ok(())
}
