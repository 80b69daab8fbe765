//! Blueprint types: the sheet schema sent to the platform when a workbook is created.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name given to every synthesized blueprint.
pub const BLUEPRINT_NAME: &str = "Dynamically Generated Blueprint";

/// Canonical field types understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Enum,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level constraint. Serializes as `{"type": "required"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Constraint {
    Required,
    Unique,
}

/// One selectable value of an enum field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    /// An option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Type-specific rendering and validation hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldConfig {
    String {
        size: String,
    },
    Number {
        #[serde(rename = "decimalPlaces")]
        decimal_places: u32,
    },
    Boolean {
        #[serde(rename = "allowIndeterminate")]
        allow_indeterminate: bool,
    },
    Enum {
        options: Vec<EnumOption>,
    },
}

impl FieldConfig {
    /// Config for a field of the given type.
    ///
    /// Enum fields only get a config when they have at least one option.
    pub fn for_type(field_type: FieldType, options: Vec<String>) -> Option<Self> {
        match field_type {
            FieldType::String => Some(Self::String {
                size: "normal".to_string(),
            }),
            FieldType::Number => Some(Self::Number { decimal_places: 2 }),
            FieldType::Boolean => Some(Self::Boolean {
                allow_indeterminate: false,
            }),
            FieldType::Enum if options.is_empty() => None,
            FieldType::Enum => Some(Self::Enum {
                options: options.into_iter().map(EnumOption::new).collect(),
            }),
        }
    }
}

/// A single field of a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
}

impl FieldDescriptor {
    pub fn has_constraint(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }
}

/// A self-contained sheet definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Blueprint {
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }
}
