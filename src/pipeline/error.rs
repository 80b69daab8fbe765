//! Pipeline error types.

use thiserror::Error;

use super::state::StepKind;
use crate::api::ApiError;
use crate::inference::SchemaInferenceError;
use crate::jobs::JobSignal;

/// Errors raised by a pipeline step.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A platform call failed.
    #[error(transparent)]
    Remote(#[from] ApiError),

    /// The records could not be turned into a blueprint.
    #[error(transparent)]
    Inference(#[from] SchemaInferenceError),

    /// The file was never extracted into a workbook.
    #[error("file {file_id} has no workbook")]
    MissingWorkbook { file_id: String },

    /// The file's workbook has no sheet to read records from.
    #[error("workbook {workbook_id} has no sheets")]
    MissingSheet { workbook_id: String },

    /// A job signal could not be delivered.
    #[error("job {0} signal was not delivered")]
    SignalDropped(JobSignal),

    /// A step ran before the step that produces its input.
    #[error("step {step} ran before its input was available")]
    StepOutOfOrder { step: StepKind },
}
