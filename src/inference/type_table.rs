//! Declared type tag to canonical field type mapping.

use std::collections::BTreeMap;

use crate::config::default_type_tags;
use crate::model::FieldType;

/// Lookup table used by tag-mapping inference.
///
/// Unknown tags map to [`FieldType::String`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    tags: BTreeMap<String, FieldType>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new(default_type_tags())
    }
}

impl TypeTable {
    pub fn new(tags: BTreeMap<String, FieldType>) -> Self {
        Self { tags }
    }

    /// An empty table; every tag maps to `string`.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Add or replace a tag.
    pub fn with_tag(mut self, tag: impl Into<String>, field_type: FieldType) -> Self {
        self.tags.insert(tag.into(), field_type);
        self
    }

    /// Canonical type for a declared tag. Tags are matched exactly.
    pub fn lookup(&self, tag: &str) -> FieldType {
        self.tags.get(tag).copied().unwrap_or(FieldType::String)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
