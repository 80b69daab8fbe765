//! Wire types for the platform control-plane API.
//!
//! Successful responses wrap their payload in `{"data": ...}`; failures carry
//! `{"errors": [{"message": ...}]}`. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::model::{Blueprint, Record};

/// File status that marks the end of upload processing.
pub const FILE_STATUS_COMPLETE: &str = "complete";

// ============================================================================
// Envelopes
// ============================================================================

/// Success envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Error body of a failed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// One error reported by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub key: Option<String>,
}

impl ErrorBody {
    /// All error messages joined, or `None` if the body carried none.
    pub fn joined(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| match &e.key {
                    Some(key) => format!("{}: {}", key, e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Payload of endpoints that only acknowledge success.
#[derive(Debug, Clone, Deserialize)]
pub struct Success {
    #[serde(default)]
    pub success: bool,
}

// ============================================================================
// Files
// ============================================================================

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    /// Workbook the platform extracted the file into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbook_id: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl File {
    /// Whether upload processing has finished.
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some(FILE_STATUS_COMPLETE)
    }

    pub fn has_action(&self, operation: &str) -> bool {
        self.actions.iter().any(|a| a.operation == operation)
    }
}

/// A user-triggerable action attached to a file.
///
/// Properties this crate does not model are kept in `extra` so that writing
/// the action list back does not drop them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    pub operation: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `PATCH /files/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFileRequest {
    pub actions: Vec<Action>,
}

// ============================================================================
// Workbooks and records
// ============================================================================

/// A sheet inside a workbook.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A workbook (container of sheets) owned by a space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub space_id: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Body of `POST /workbooks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkbookRequest {
    pub name: String,
    pub space_id: String,
    pub sheets: Vec<Blueprint>,
}

/// Payload of `GET /sheets/{id}/records`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsPage {
    #[serde(default)]
    pub records: Vec<Record>,
}

// ============================================================================
// Jobs
// ============================================================================

/// A remotely tracked job.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Body of `POST /jobs/{id}/ack`.
#[derive(Debug, Clone, Serialize)]
pub struct AckJobRequest {
    pub info: String,
    pub progress: u8,
}

/// Outcome attached to a finished job.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub message: String,
}

/// Body of `POST /jobs/{id}/complete` and `POST /jobs/{id}/fail`.
#[derive(Debug, Clone, Serialize)]
pub struct FinishJobRequest {
    pub outcome: JobOutcome,
    pub info: String,
}
