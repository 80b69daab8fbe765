//! Inbound platform events.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const TOPIC_FILE_CREATED: &str = "file:created";
pub const TOPIC_JOB_READY: &str = "job:ready";

/// Errors raised while decoding an event.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("failed to parse event: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{topic} event is missing context.{field}")]
    MissingContext { topic: String, field: &'static str },

    #[error("job:ready event does not name a job kind")]
    MissingJobKind,
}

/// Ids carried by an event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub space_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    topic: String,
    #[serde(default)]
    context: EventContext,
    #[serde(default)]
    payload: Value,
}

/// An event the agent reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A file was uploaded.
    FileCreated { file_id: String },
    /// A job was triggered and is waiting to be picked up.
    JobReady {
        /// Job kind, e.g. `file:createWorkbookFromFile`.
        job_kind: String,
        file_id: String,
        job_id: String,
    },
    /// Any other topic.
    Other { topic: String },
}

impl PlatformEvent {
    /// Decode an event from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        let raw: RawEvent = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Decode an event from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        let raw: RawEvent = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    pub fn topic(&self) -> &str {
        match self {
            Self::FileCreated { .. } => TOPIC_FILE_CREATED,
            Self::JobReady { .. } => TOPIC_JOB_READY,
            Self::Other { topic } => topic,
        }
    }

    fn from_raw(raw: RawEvent) -> Result<Self, EventError> {
        let require = |value: Option<String>, field: &'static str| {
            value.ok_or_else(|| EventError::MissingContext {
                topic: raw.topic.clone(),
                field,
            })
        };

        match raw.topic.as_str() {
            TOPIC_FILE_CREATED => Ok(Self::FileCreated {
                file_id: require(raw.context.file_id.clone(), "fileId")?,
            }),
            TOPIC_JOB_READY => Ok(Self::JobReady {
                job_kind: job_kind(&raw.payload).ok_or(EventError::MissingJobKind)?,
                file_id: require(raw.context.file_id.clone(), "fileId")?,
                job_id: require(raw.context.job_id.clone(), "jobId")?,
            }),
            _ => Ok(Self::Other {
                topic: raw.topic.clone(),
            }),
        }
    }
}

/// `payload.job`, or `payload.domain:payload.operation`.
fn job_kind(payload: &Value) -> Option<String> {
    if let Some(job) = payload.get("job").and_then(Value::as_str) {
        return Some(job.to_string());
    }
    let domain = payload.get("domain").and_then(Value::as_str)?;
    let operation = payload.get("operation").and_then(Value::as_str)?;
    Some(format!("{}:{}", domain, operation))
}
