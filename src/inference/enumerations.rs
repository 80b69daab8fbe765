//! Enumerated option extraction from the `Enumerations` row.

use super::metadata::{find_metadata_row, MetadataKind};
use crate::model::Record;

/// Options declared for `header`, split on commas and trimmed.
///
/// Returns an empty list when there is no `Enumerations` row or its cell for
/// `header` is absent, not text, or blank. Empty tokens are dropped.
pub fn extract_enum_options(header: &str, records: &[Record]) -> Vec<String> {
    find_metadata_row(records, MetadataKind::Enumerations)
        .and_then(|row| row.text(header))
        .map(|cell| {
            cell.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
