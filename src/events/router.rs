//! Event dispatch.

use std::sync::Arc;

use log::{error, info};

use super::event::PlatformEvent;
use super::file_created::{FileActionRegistrar, RegistrationOutcome};
use crate::config::Settings;
use crate::pipeline::{JobOrchestrator, JobReport};
use crate::platform::PlatformApi;

/// What handling an event led to.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// `file:created` handled.
    ActionRegistered(RegistrationOutcome),
    /// `file:created` could not be handled; the error is logged.
    RegistrationFailed(String),
    /// `job:ready` ran the pipeline.
    JobRun(JobReport),
    /// The event is not one this agent handles.
    Ignored { topic: String, reason: String },
}

/// Routes decoded events to their handlers.
///
/// `job:ready` events are only handled for the configured job kind.
#[derive(Clone)]
pub struct EventRouter {
    registrar: FileActionRegistrar,
    orchestrator: JobOrchestrator,
    job_kind: String,
}

impl EventRouter {
    pub fn new(
        registrar: FileActionRegistrar,
        orchestrator: JobOrchestrator,
        job_kind: impl Into<String>,
    ) -> Self {
        Self {
            registrar,
            orchestrator,
            job_kind: job_kind.into(),
        }
    }

    pub fn from_settings(api: Arc<dyn PlatformApi>, settings: &Settings) -> Self {
        Self::new(
            FileActionRegistrar::from_settings(api.clone(), settings),
            JobOrchestrator::from_settings(api, settings),
            settings.job.kind.clone(),
        )
    }

    pub fn job_kind(&self) -> &str {
        &self.job_kind
    }

    /// Handle one event. Handler errors are logged and reported in the
    /// outcome, never returned.
    pub async fn dispatch(&self, event: &PlatformEvent) -> DispatchOutcome {
        match event {
            PlatformEvent::FileCreated { file_id } => {
                info!("File created: {}", file_id);
                match self.registrar.register(file_id).await {
                    Ok(outcome) => DispatchOutcome::ActionRegistered(outcome),
                    Err(e) => {
                        error!("Error processing file:created event for {}: {}", file_id, e);
                        DispatchOutcome::RegistrationFailed(e.to_string())
                    }
                }
            }
            PlatformEvent::JobReady {
                job_kind,
                file_id,
                job_id,
            } => {
                if *job_kind != self.job_kind {
                    return DispatchOutcome::Ignored {
                        topic: event.topic().to_string(),
                        reason: format!("job kind {} is not {}", job_kind, self.job_kind),
                    };
                }
                DispatchOutcome::JobRun(self.orchestrator.run(job_id, file_id).await)
            }
            PlatformEvent::Other { topic } => DispatchOutcome::Ignored {
                topic: topic.clone(),
                reason: "unhandled topic".to_string(),
            },
        }
    }
}
