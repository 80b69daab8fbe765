//! Job orchestrator.

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Serialize;
use uuid::Uuid;

use super::error::PipelineError;
use super::state::{JobState, StepKind, StepSpec, Transition, PIPELINE};
use crate::config::Settings;
use crate::inference::SchemaSynthesizer;
use crate::jobs::{JobReporter, JobSignal};
use crate::model::Blueprint;
use crate::platform::PlatformApi;
use crate::workbook::WorkbookLifecycle;

/// Outcome of one job run.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Local id of this run, for correlating log lines.
    pub run_id: String,
    pub job_id: String,
    pub file_id: String,
    pub state: JobState,
    pub transitions: Vec<Transition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workbook_id: Option<String>,
    pub pruned: Vec<String>,
    /// Errors of non-fatal steps.
    pub warnings: Vec<String>,
    /// Error that failed the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobReport {
    fn new(job_id: &str, file_id: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            file_id: file_id.to_string(),
            state: JobState::Idle,
            transitions: Vec::new(),
            workbook_id: None,
            pruned: Vec::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    fn advance(&mut self, step: StepKind, to: JobState) {
        info!(
            "[{}] job {}: {} -> {} ({})",
            self.run_id, self.job_id, self.state, to, step
        );
        self.transitions.push(Transition {
            from: self.state,
            to,
            step,
        });
        self.state = to;
    }

    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.state == JobState::Failed
    }
}

/// Values produced by one step and consumed by a later one.
#[derive(Debug, Default)]
struct RunContext {
    space_id: Option<String>,
    blueprint: Option<Blueprint>,
}

/// Drives a job through the pipeline table.
///
/// ```text
/// Idle ─ack─► Acknowledged ─build─► SchemaBuilt ─create─► ContainerCreated
///                                        │                      │
///                      (fatal steps) ────┴──────► Failed        │
///                                                               ▼
///                           Completed ◄─complete─ Pruned ◄─prune─┘
/// ```
///
/// Steps run one at a time; each waits for the previous remote call.
#[derive(Clone)]
pub struct JobOrchestrator {
    api: Arc<dyn PlatformApi>,
    reporter: JobReporter,
    lifecycle: WorkbookLifecycle,
    synthesizer: SchemaSynthesizer,
}

impl JobOrchestrator {
    pub fn new(
        api: Arc<dyn PlatformApi>,
        reporter: JobReporter,
        lifecycle: WorkbookLifecycle,
        synthesizer: SchemaSynthesizer,
    ) -> Self {
        Self {
            api,
            reporter,
            lifecycle,
            synthesizer,
        }
    }

    pub fn from_settings(api: Arc<dyn PlatformApi>, settings: &Settings) -> Self {
        Self::new(
            api.clone(),
            JobReporter::new(api.clone(), settings.job.clone()),
            WorkbookLifecycle::from_settings(api, &settings.workbook),
            SchemaSynthesizer::from_settings(&settings.inference),
        )
    }

    /// Run the pipeline for a job over a file.
    ///
    /// Never returns an error: a fatal step failure fails the remote job and
    /// ends the run in [`JobState::Failed`].
    pub async fn run(&self, job_id: &str, file_id: &str) -> JobReport {
        let mut report = JobReport::new(job_id, file_id);
        let mut ctx = RunContext::default();

        info!("[{}] Starting job {} for file {}", report.run_id, job_id, file_id);

        for spec in PIPELINE {
            match self.execute(spec, job_id, file_id, &mut ctx, &mut report).await {
                Ok(()) => report.advance(spec.step, spec.reaches),
                Err(e) if spec.fatal => {
                    error!(
                        "[{}] job {}: {} failed: {}",
                        report.run_id, job_id, spec.step, e
                    );
                    report.error = Some(e.to_string());
                    report.advance(spec.step, JobState::Failed);
                    if !self.reporter.fail(job_id, &e).await {
                        report
                            .warnings
                            .push(PipelineError::SignalDropped(JobSignal::Fail).to_string());
                    }
                    return report;
                }
                Err(e) => {
                    warn!(
                        "[{}] job {}: {} failed, continuing: {}",
                        report.run_id, job_id, spec.step, e
                    );
                    report.warnings.push(format!("{}: {}", spec.step, e));
                    report.advance(spec.step, spec.reaches);
                }
            }
        }

        if let Some(status) = self.reporter.status(job_id).await {
            debug!("[{}] job {} remote status: {}", report.run_id, job_id, status);
        }

        report
    }

    async fn execute(
        &self,
        spec: &StepSpec,
        job_id: &str,
        file_id: &str,
        ctx: &mut RunContext,
        report: &mut JobReport,
    ) -> Result<(), PipelineError> {
        match spec.step {
            StepKind::Acknowledge => {
                if self.reporter.acknowledge(job_id).await {
                    Ok(())
                } else {
                    Err(PipelineError::SignalDropped(JobSignal::Acknowledge))
                }
            }
            StepKind::BuildSchema => {
                let (space_id, blueprint) = self.build_schema(file_id).await?;
                ctx.space_id = Some(space_id);
                ctx.blueprint = Some(blueprint);
                Ok(())
            }
            StepKind::CreateWorkbook => {
                let (Some(space_id), Some(blueprint)) = (ctx.space_id.as_deref(), ctx.blueprint.take())
                else {
                    return Err(PipelineError::StepOutOfOrder { step: spec.step });
                };
                let workbook_id = self.lifecycle.create_workbook(blueprint, space_id).await?;
                report.workbook_id = Some(workbook_id);
                Ok(())
            }
            StepKind::PruneWorkbooks => {
                let space_id = ctx
                    .space_id
                    .as_deref()
                    .ok_or(PipelineError::StepOutOfOrder { step: spec.step })?;
                report.pruned = self.lifecycle.prune_empty_workbooks(space_id).await?;
                Ok(())
            }
            StepKind::Complete => {
                if self.reporter.complete(job_id).await {
                    Ok(())
                } else {
                    Err(PipelineError::SignalDropped(JobSignal::Complete))
                }
            }
        }
    }

    /// Fetch file, workbook, sheet and records, then synthesize a blueprint.
    ///
    /// Returns the space of the source workbook with the blueprint.
    async fn build_schema(&self, file_id: &str) -> Result<(String, Blueprint), PipelineError> {
        let file = self.api.get_file(file_id).await?;
        let workbook_id = file
            .workbook_id
            .ok_or_else(|| PipelineError::MissingWorkbook {
                file_id: file_id.to_string(),
            })?;

        let workbook = self.api.get_workbook(&workbook_id).await?;
        let sheet = workbook
            .sheets
            .first()
            .ok_or_else(|| PipelineError::MissingSheet {
                workbook_id: workbook_id.clone(),
            })?;

        let records = self.api.get_records(&sheet.id).await?;
        debug!(
            "Fetched {} records from sheet {} of workbook {}",
            records.len(),
            sheet.id,
            workbook_id
        );

        let blueprint = self.synthesizer.synthesize_records(&records)?;
        debug!(
            "Generated blueprint: {}",
            serde_json::to_string(&blueprint).unwrap_or_default()
        );
        Ok((workbook.space_id, blueprint))
    }
}
