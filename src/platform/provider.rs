//! PlatformApi trait definition.
//!
//! The PlatformApi trait abstracts over the control-plane operations the
//! agent consumes. The primary implementation uses the HTTP [`ApiClient`];
//! the in-memory implementation backs offline simulation and tests.
//!
//! [`ApiClient`]: crate::api::ApiClient

use async_trait::async_trait;

use crate::api::protocol::{Action, CreateWorkbookRequest, File, Job, Workbook};
use crate::api::{ApiError, ApiResult};
use crate::config::PollSettings;
use crate::model::Record;

/// Trait for the platform operations used by the agent.
///
/// Every call is issued fresh; implementations must not cache results.
///
/// # Example
///
/// ```ignore
/// use workbook_agent::platform::PlatformApi;
///
/// async fn first_sheet(api: &dyn PlatformApi, file_id: &str) -> ApiResult<String> {
///     let file = api.get_file(file_id).await?;
///     let workbook = api.get_workbook(file.workbook_id.as_deref().unwrap_or_default()).await?;
///     Ok(workbook.sheets[0].id.clone())
/// }
/// ```
#[async_trait]
pub trait PlatformApi: Send + Sync {
    // =========================================================================
    // Files
    // =========================================================================

    /// Fetch a file.
    async fn get_file(&self, file_id: &str) -> ApiResult<File>;

    /// Replace the action list of a file.
    async fn update_file_actions(&self, file_id: &str, actions: Vec<Action>) -> ApiResult<File>;

    // =========================================================================
    // Workbooks and records
    // =========================================================================

    /// Fetch a workbook with its sheets.
    async fn get_workbook(&self, workbook_id: &str) -> ApiResult<Workbook>;

    /// Create a workbook.
    async fn create_workbook(&self, request: &CreateWorkbookRequest) -> ApiResult<Workbook>;

    /// List the workbooks of a space.
    async fn list_workbooks(&self, space_id: &str) -> ApiResult<Vec<Workbook>>;

    /// Delete a workbook.
    async fn delete_workbook(&self, workbook_id: &str) -> ApiResult<()>;

    /// Fetch the records of a sheet.
    async fn get_records(&self, sheet_id: &str) -> ApiResult<Vec<Record>>;

    // =========================================================================
    // Jobs
    // =========================================================================

    /// Acknowledge a job with an initial progress value.
    async fn ack_job(&self, job_id: &str, info: &str, progress: u8) -> ApiResult<()>;

    /// Mark a job as complete.
    async fn complete_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()>;

    /// Mark a job as failed.
    async fn fail_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()>;

    /// Fetch a job.
    async fn get_job(&self, job_id: &str) -> ApiResult<Job>;
}

/// Extension trait for PlatformApi with multi-call helpers.
#[async_trait]
pub trait PlatformApiExt: PlatformApi {
    /// Wait for a file to finish upload processing.
    ///
    /// Fetches the file until its status is `complete`, sleeping
    /// `poll.interval()` between fetches. Gives up with
    /// [`ApiError::PollTimeout`] after `poll.max_attempts` fetches.
    async fn wait_for_file_ready(&self, file_id: &str, poll: &PollSettings) -> ApiResult<File> {
        let max_attempts = poll.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            let file = self.get_file(file_id).await?;
            attempts += 1;

            if file.is_complete() {
                return Ok(file);
            }
            if attempts >= max_attempts {
                return Err(ApiError::PollTimeout {
                    resource: format!("file {}", file_id),
                    attempts,
                });
            }

            log::info!(
                "Waiting for file {} to be complete (status: {}, attempt {}/{})",
                file_id,
                file.status.as_deref().unwrap_or("unknown"),
                attempts,
                max_attempts
            );
            tokio::time::sleep(poll.interval()).await;
        }
    }
}

// Blanket implementation for all PlatformApi implementations
impl<T: PlatformApi + ?Sized> PlatformApiExt for T {}
