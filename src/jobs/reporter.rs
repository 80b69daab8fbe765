//! Job lifecycle signals.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::config::JobSettings;
use crate::platform::PlatformApi;

/// A lifecycle signal sent to a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSignal {
    Acknowledge,
    Complete,
    Fail,
}

impl fmt::Display for JobSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acknowledge => write!(f, "acknowledge"),
            Self::Complete => write!(f, "complete"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Sends acknowledge/complete/fail signals for jobs.
///
/// Signals never raise: a failed call is logged and reported as `false`, so
/// the caller decides whether a dropped signal matters.
#[derive(Clone)]
pub struct JobReporter {
    api: Arc<dyn PlatformApi>,
    settings: JobSettings,
}

impl JobReporter {
    pub fn new(api: Arc<dyn PlatformApi>, settings: JobSettings) -> Self {
        Self { api, settings }
    }

    pub fn settings(&self) -> &JobSettings {
        &self.settings
    }

    /// Acknowledge a job with the configured progress and status text.
    pub async fn acknowledge(&self, job_id: &str) -> bool {
        match self
            .api
            .ack_job(job_id, &self.settings.ack_info, self.settings.ack_progress)
            .await
        {
            Ok(()) => {
                info!(
                    "Acknowledged job {} ({}%)",
                    job_id, self.settings.ack_progress
                );
                true
            }
            Err(e) => {
                warn!("Failed to acknowledge job {}: {}", job_id, e);
                false
            }
        }
    }

    /// Complete a job with the configured outcome.
    pub async fn complete(&self, job_id: &str) -> bool {
        match self
            .api
            .complete_job(
                job_id,
                &self.settings.complete_message,
                &self.settings.complete_info,
            )
            .await
        {
            Ok(()) => {
                info!("Completed job {}", job_id);
                true
            }
            Err(e) => {
                warn!("Failed to complete job {}: {}", job_id, e);
                false
            }
        }
    }

    /// Fail a job. The error's display string is both message and info.
    pub async fn fail(&self, job_id: &str, error: &(dyn std::error::Error + Send + Sync)) -> bool {
        let message = error.to_string();
        match self.api.fail_job(job_id, &message, &message).await {
            Ok(()) => {
                info!("Failed job {}: {}", job_id, message);
                true
            }
            Err(e) => {
                warn!("Failed to report failure of job {}: {}", job_id, e);
                false
            }
        }
    }

    /// Current remote status of a job, if it can be fetched.
    pub async fn status(&self, job_id: &str) -> Option<String> {
        match self.api.get_job(job_id).await {
            Ok(job) => job.status,
            Err(e) => {
                warn!("Failed to fetch job {}: {}", job_id, e);
                None
            }
        }
    }
}
