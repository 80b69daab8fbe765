//! Records as returned by the platform's records endpoint.
//!
//! A record maps column headers to cells. Header order is the order in which
//! the columns appear in the JSON document. Decoding goes through a map
//! visitor, and `serde_json` is built with `preserve_order` so records
//! decoded from a `Value` keep that order too.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Raw cell value.
    #[serde(default)]
    pub value: Value,

    /// Validation flag assigned by the platform, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl Cell {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            valid: None,
        }
    }

    /// The value as text, when it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Header-ordered cells of a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordValues(Vec<(String, Cell)>);

impl RecordValues {
    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.0.iter().find(|(key, _)| key == header).map(|(_, cell)| cell)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.get(header).is_some()
    }

    /// Headers in document order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or replace a cell, keeping the position of an existing header.
    pub fn insert(&mut self, header: impl Into<String>, cell: Cell) {
        let header = header.into();
        match self.0.iter_mut().find(|(key, _)| *key == header) {
            Some((_, existing)) => *existing = cell,
            None => self.0.push((header, cell)),
        }
    }
}

impl Serialize for RecordValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (header, cell) in &self.0 {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedCells;

        impl<'de> Visitor<'de> for OrderedCells {
            type Value = RecordValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column header to cell")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RecordValues, A::Error> {
                let mut values = RecordValues(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((header, cell)) = access.next_entry::<String, Cell>()? {
                    values.insert(header, cell);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(OrderedCells)
    }
}

/// A record fetched from a sheet. Never mutated after it is fetched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub values: RecordValues,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion.
    pub fn with(mut self, header: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(header, Cell::new(value));
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.values.get(header)
    }

    /// Text content of a cell, if the cell exists and holds a string.
    pub fn text(&self, header: &str) -> Option<&str> {
        self.get(header).and_then(Cell::as_str)
    }
}
