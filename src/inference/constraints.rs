//! Constraint extraction from `Is Required?` / `Is Unique?` rows.

use std::collections::BTreeMap;

use super::metadata::{MetadataKind, CONSTRAINT_MARKER};
use crate::model::{Constraint, Record};

/// Per-header constraints declared by the metadata block.
///
/// Every header gets an entry, empty when nothing marks it. Constraints are
/// listed in the order their rows appear and never twice for one header.
pub fn extract_constraints(
    headers: &[String],
    records: &[Record],
) -> BTreeMap<String, Vec<Constraint>> {
    let mut mapping: BTreeMap<String, Vec<Constraint>> = headers
        .iter()
        .map(|h| (h.clone(), Vec::new()))
        .collect();

    for record in records {
        let constraint = match MetadataKind::of(record) {
            Some(MetadataKind::Required) => Constraint::Required,
            Some(MetadataKind::Unique) => Constraint::Unique,
            _ => continue,
        };

        for header in headers {
            if record.text(header) != Some(CONSTRAINT_MARKER) {
                continue;
            }
            if let Some(list) = mapping.get_mut(header) {
                if !list.contains(&constraint) {
                    list.push(constraint);
                }
            }
        }
    }

    mapping
}
