//! Field type inference from a representative sample.

use serde_json::Value;

use super::metadata::{MetadataKind, FIELD_NAME_COLUMN};
use super::type_table::TypeTable;
use crate::config::InferenceMode;
use crate::model::{FieldType, Record};

/// Maps a sample cell value to a canonical field type.
///
/// Exactly one strategy is active for a synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTypeInferrer {
    /// The sample is a declared type tag looked up in the table.
    TagMapping(TypeTable),
    /// The sample is real data, classified by its JSON kind.
    RuntimeShape,
}

impl FieldTypeInferrer {
    /// Resolve the configured mode against the sample record.
    ///
    /// `Auto` selects tag mapping when the sample declares a tag row, i.e. its
    /// `Field Name` cell names something other than a metadata sentinel.
    /// Constraint rows alone do not make the data rows tags.
    pub fn resolve(mode: InferenceMode, table: &TypeTable, sample: &Record) -> Self {
        let tag_mapping = match mode {
            InferenceMode::TagMapping => true,
            InferenceMode::RuntimeShape => false,
            InferenceMode::Auto => declares_tags(sample),
        };

        if tag_mapping {
            Self::TagMapping(table.clone())
        } else {
            Self::RuntimeShape
        }
    }

    /// Canonical type for a sample. Total: anything unrecognized is `string`.
    pub fn infer(&self, sample: &Value) -> FieldType {
        match self {
            Self::TagMapping(table) => sample
                .as_str()
                .map_or(FieldType::String, |tag| table.lookup(tag)),
            Self::RuntimeShape => match sample {
                Value::Number(_) => FieldType::Number,
                Value::Bool(_) => FieldType::Boolean,
                _ => FieldType::String,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TagMapping(_) => "tag_mapping",
            Self::RuntimeShape => "runtime_shape",
        }
    }
}

fn declares_tags(sample: &Record) -> bool {
    sample
        .text(FIELD_NAME_COLUMN)
        .map(str::trim)
        .is_some_and(|label| !label.is_empty() && MetadataKind::from_sentinel(label).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_mapping() {
        let inferrer = FieldTypeInferrer::TagMapping(TypeTable::default());
        assert_eq!(inferrer.infer(&json!("Int")), FieldType::Number);
        assert_eq!(inferrer.infer(&json!("Enumeration")), FieldType::Enum);
        assert_eq!(inferrer.infer(&json!("Boolean")), FieldType::Boolean);
        assert_eq!(inferrer.infer(&json!("Whatever")), FieldType::String);
        assert_eq!(inferrer.infer(&json!(42)), FieldType::String);
        assert_eq!(inferrer.infer(&Value::Null), FieldType::String);
    }

    #[test]
    fn test_runtime_shape() {
        let inferrer = FieldTypeInferrer::RuntimeShape;
        assert_eq!(inferrer.infer(&json!("Alice")), FieldType::String);
        assert_eq!(inferrer.infer(&json!(30)), FieldType::Number);
        assert_eq!(inferrer.infer(&json!(2.5)), FieldType::Number);
        assert_eq!(inferrer.infer(&json!(true)), FieldType::Boolean);
        assert_eq!(inferrer.infer(&Value::Null), FieldType::String);
        assert_eq!(inferrer.infer(&json!([1, 2])), FieldType::String);
        assert_eq!(inferrer.infer(&json!({"a": 1})), FieldType::String);
        // Tags are just text in this mode
        assert_eq!(inferrer.infer(&json!("Int")), FieldType::String);
    }

    #[test]
    fn test_auto_resolution() {
        let table = TypeTable::default();
        let with_metadata = Record::new().with(FIELD_NAME_COLUMN, "Type").with("A", "Int");
        let plain = Record::new().with("A", 1);

        assert_eq!(
            FieldTypeInferrer::resolve(InferenceMode::Auto, &table, &with_metadata).name(),
            "tag_mapping"
        );
        assert_eq!(
            FieldTypeInferrer::resolve(InferenceMode::Auto, &table, &plain).name(),
            "runtime_shape"
        );
        assert_eq!(
            FieldTypeInferrer::resolve(InferenceMode::TagMapping, &table, &plain).name(),
            "tag_mapping"
        );
        assert_eq!(
            FieldTypeInferrer::resolve(InferenceMode::RuntimeShape, &table, &with_metadata).name(),
            "runtime_shape"
        );
    }

    #[test]
    fn test_auto_ignores_blank_field_name() {
        let table = TypeTable::default();
        for label in ["", "  "] {
            let sample = Record::new().with(FIELD_NAME_COLUMN, label).with("Age", 30);
            assert_eq!(
                FieldTypeInferrer::resolve(InferenceMode::Auto, &table, &sample).name(),
                "runtime_shape"
            );
        }
        let untagged = Record::new().with(FIELD_NAME_COLUMN, 7).with("Age", 30);
        assert_eq!(
            FieldTypeInferrer::resolve(InferenceMode::Auto, &table, &untagged).name(),
            "runtime_shape"
        );
    }
}
