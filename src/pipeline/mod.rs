//! Job pipeline.
//!
//! Runs a `job:ready` job for a file as a linear sequence of steps described
//! by [`PIPELINE`]. Each row says which state the step moves the run to and
//! whether a failure of that step fails the job.
//!
//! | Step              | Reaches            | Fatal |
//! |-------------------|--------------------|-------|
//! | `acknowledge`     | `acknowledged`     | no    |
//! | `build_schema`    | `schema_built`     | yes   |
//! | `create_workbook` | `container_created`| yes   |
//! | `prune_workbooks` | `pruned`           | no    |
//! | `complete`        | `completed`        | no    |
//!
//! # Example
//!
//! ```ignore
//! use workbook_agent::pipeline::JobOrchestrator;
//!
//! let orchestrator = JobOrchestrator::from_settings(platform, &settings);
//! let report = orchestrator.run("us_jb_1", "us_fl_1").await;
//! println!("{}", report.state);
//! ```

mod error;
mod orchestrator;
mod state;

pub use error::PipelineError;
pub use orchestrator::{JobOrchestrator, JobReport};
pub use state::{step_spec, JobState, StepKind, StepSpec, Transition, PIPELINE};
