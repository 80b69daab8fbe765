//! Job protocol.
//!
//! Thin wrapper over the job endpoints that turns remote failures into
//! logged, non-fatal outcomes. The pipeline decides what a dropped signal
//! means for the run.

mod reporter;

pub use reporter::{JobReporter, JobSignal};
