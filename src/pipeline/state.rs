//! Pipeline states, steps and the step table.

use std::fmt;

use serde::Serialize;

/// State of a job run.
///
/// `Completed` and `Failed` are terminal. `Failed` is reachable from every
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Idle,
    Acknowledged,
    SchemaBuilt,
    ContainerCreated,
    Pruned,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Acknowledged => "acknowledged",
            Self::SchemaBuilt => "schema_built",
            Self::ContainerCreated => "container_created",
            Self::Pruned => "pruned",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Acknowledge,
    BuildSchema,
    CreateWorkbook,
    PruneWorkbooks,
    Complete,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Acknowledge => "acknowledge",
            Self::BuildSchema => "build_schema",
            Self::CreateWorkbook => "create_workbook",
            Self::PruneWorkbooks => "prune_workbooks",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// One row of the pipeline table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub step: StepKind,
    /// State the run is in before the step.
    pub from: JobState,
    /// State the run is in after the step, whether or not a non-fatal step
    /// succeeded.
    pub reaches: JobState,
    /// A failing fatal step moves the run to `Failed` and fails the job.
    pub fatal: bool,
}

/// The pipeline, in execution order.
pub const PIPELINE: &[StepSpec] = &[
    StepSpec {
        step: StepKind::Acknowledge,
        from: JobState::Idle,
        reaches: JobState::Acknowledged,
        fatal: false,
    },
    StepSpec {
        step: StepKind::BuildSchema,
        from: JobState::Acknowledged,
        reaches: JobState::SchemaBuilt,
        fatal: true,
    },
    StepSpec {
        step: StepKind::CreateWorkbook,
        from: JobState::SchemaBuilt,
        reaches: JobState::ContainerCreated,
        fatal: true,
    },
    StepSpec {
        step: StepKind::PruneWorkbooks,
        from: JobState::ContainerCreated,
        reaches: JobState::Pruned,
        fatal: false,
    },
    StepSpec {
        step: StepKind::Complete,
        from: JobState::Pruned,
        reaches: JobState::Completed,
        fatal: false,
    },
];

/// Look up the table row for a step.
pub fn step_spec(step: StepKind) -> Option<&'static StepSpec> {
    PIPELINE.iter().find(|s| s.step == step)
}

/// A state change observed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: JobState,
    pub to: JobState,
    pub step: StepKind,
}
