//! In-process PlatformApi implementation.
//!
//! `InMemoryPlatform` keeps files, workbooks, records and jobs in memory and
//! records every call it receives. The CLI uses it to simulate a job run
//! against a records fixture, and the tests use it to observe which remote
//! calls a pipeline issued.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::provider::PlatformApi;
use crate::api::protocol::{
    Action, CreateWorkbookRequest, File, Job, Sheet, Workbook, FILE_STATUS_COMPLETE,
};
use crate::api::{ApiError, ApiResult};
use crate::model::{Blueprint, Record};

/// Kind of a platform call, used for counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetFile,
    UpdateFileActions,
    GetWorkbook,
    CreateWorkbook,
    ListWorkbooks,
    DeleteWorkbook,
    GetRecords,
    AckJob,
    CompleteJob,
    FailJob,
    GetJob,
}

/// A call received by the in-memory platform, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    GetFile { file_id: String },
    UpdateFileActions { file_id: String, actions: Vec<Action> },
    GetWorkbook { workbook_id: String },
    CreateWorkbook { request: CreateWorkbookRequest },
    ListWorkbooks { space_id: String },
    DeleteWorkbook { workbook_id: String },
    GetRecords { sheet_id: String },
    AckJob { job_id: String, info: String, progress: u8 },
    CompleteJob { job_id: String, message: String, info: String },
    FailJob { job_id: String, message: String, info: String },
    GetJob { job_id: String },
}

impl PlatformCall {
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetFile { .. } => Operation::GetFile,
            Self::UpdateFileActions { .. } => Operation::UpdateFileActions,
            Self::GetWorkbook { .. } => Operation::GetWorkbook,
            Self::CreateWorkbook { .. } => Operation::CreateWorkbook,
            Self::ListWorkbooks { .. } => Operation::ListWorkbooks,
            Self::DeleteWorkbook { .. } => Operation::DeleteWorkbook,
            Self::GetRecords { .. } => Operation::GetRecords,
            Self::AckJob { .. } => Operation::AckJob,
            Self::CompleteJob { .. } => Operation::CompleteJob,
            Self::FailJob { .. } => Operation::FailJob,
            Self::GetJob { .. } => Operation::GetJob,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    files: HashMap<String, File>,
    /// Remaining fetches before a pending file reports `complete`.
    pending_polls: HashMap<String, u32>,
    /// Workbooks in creation order.
    workbooks: Vec<Workbook>,
    records: HashMap<String, Vec<Record>>,
    jobs: HashMap<String, Job>,
    failures: HashMap<Operation, String>,
    failing_deletes: HashSet<String>,
    calls: Vec<PlatformCall>,
    next_id: u64,
}

impl State {
    fn check(&self, operation: Operation) -> ApiResult<()> {
        match self.failures.get(&operation) {
            Some(message) => Err(ApiError::status(500, message.clone())),
            None => Ok(()),
        }
    }

    fn job_mut(&mut self, job_id: &str) -> &mut Job {
        self.jobs.entry(job_id.to_string()).or_insert_with(|| Job {
            id: job_id.to_string(),
            ..Default::default()
        })
    }
}

/// In-memory platform.
///
/// Builder methods are meant to be chained before the platform is shared.
///
/// # Example
///
/// ```ignore
/// let platform = InMemoryPlatform::new()
///     .with_uploaded_file("us_fl_1", "us_sp_1", records);
/// let report = orchestrator.run("us_jb_1", "us_fl_1").await;
/// assert_eq!(platform.count(Operation::CreateWorkbook).await, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: Mutex<State>,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file as-is.
    pub fn with_file(mut self, file: File) -> Self {
        let state = self.state.get_mut();
        state.files.insert(file.id.clone(), file);
        self
    }

    /// Add a file that reports `complete` only after `polls` fetches.
    pub fn with_pending_file(mut self, mut file: File, polls: u32) -> Self {
        file.status = Some("partial".to_string());
        let state = self.state.get_mut();
        state.pending_polls.insert(file.id.clone(), polls);
        state.files.insert(file.id.clone(), file);
        self
    }

    /// Add a workbook.
    pub fn with_workbook(mut self, workbook: Workbook) -> Self {
        self.state.get_mut().workbooks.push(workbook);
        self
    }

    /// Set the records of a sheet.
    pub fn with_records(mut self, sheet_id: impl Into<String>, records: Vec<Record>) -> Self {
        self.state.get_mut().records.insert(sheet_id.into(), records);
        self
    }

    /// Add a processed upload: a complete file extracted into a workbook
    /// with one sheet holding `records`.
    ///
    /// The workbook and sheet ids are derived from `file_id`.
    pub fn with_uploaded_file(
        self,
        file_id: impl Into<String>,
        space_id: impl Into<String>,
        records: Vec<Record>,
    ) -> Self {
        let file_id = file_id.into();
        let workbook_id = format!("{}_workbook", file_id);
        let sheet_id = format!("{}_sheet", file_id);

        self.with_file(File {
            id: file_id.clone(),
            status: Some(FILE_STATUS_COMPLETE.to_string()),
            workbook_id: Some(workbook_id.clone()),
            ..Default::default()
        })
        .with_workbook(Workbook {
            id: workbook_id,
            name: Some(file_id),
            space_id: space_id.into(),
            sheets: vec![Sheet {
                id: sheet_id.clone(),
                name: None,
            }],
        })
        .with_records(sheet_id, records)
    }

    /// Make every call of `operation` fail with a 500 carrying `message`.
    pub fn failing(mut self, operation: Operation, message: impl Into<String>) -> Self {
        self.state
            .get_mut()
            .failures
            .insert(operation, message.into());
        self
    }

    /// Make deleting one particular workbook fail.
    pub fn failing_delete(mut self, workbook_id: impl Into<String>) -> Self {
        self.state
            .get_mut()
            .failing_deletes
            .insert(workbook_id.into());
        self
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls of one kind received so far.
    pub async fn count(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    /// Current workbooks, in creation order.
    pub async fn workbooks(&self) -> Vec<Workbook> {
        self.state.lock().await.workbooks.clone()
    }

    /// Current state of a file.
    pub async fn file(&self, file_id: &str) -> Option<File> {
        self.state.lock().await.files.get(file_id).cloned()
    }

    /// Current state of a job.
    pub async fn job(&self, job_id: &str) -> Option<Job> {
        self.state.lock().await.jobs.get(job_id).cloned()
    }

    /// Blueprints of every workbook created so far.
    pub async fn created_blueprints(&self) -> Vec<Blueprint> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::CreateWorkbook { request } => Some(request.sheets.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[async_trait]
impl PlatformApi for InMemoryPlatform {
    async fn get_file(&self, file_id: &str) -> ApiResult<File> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::GetFile {
            file_id: file_id.to_string(),
        });
        state.check(Operation::GetFile)?;

        if let Some(remaining) = state.pending_polls.get_mut(file_id) {
            if *remaining == 0 {
                state.pending_polls.remove(file_id);
                if let Some(file) = state.files.get_mut(file_id) {
                    file.status = Some(FILE_STATUS_COMPLETE.to_string());
                }
            } else {
                *remaining -= 1;
            }
        }

        state
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("file {}", file_id)))
    }

    async fn update_file_actions(&self, file_id: &str, actions: Vec<Action>) -> ApiResult<File> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::UpdateFileActions {
            file_id: file_id.to_string(),
            actions: actions.clone(),
        });
        state.check(Operation::UpdateFileActions)?;

        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| ApiError::NotFound(format!("file {}", file_id)))?;
        file.actions = actions;
        Ok(file.clone())
    }

    async fn get_workbook(&self, workbook_id: &str) -> ApiResult<Workbook> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::GetWorkbook {
            workbook_id: workbook_id.to_string(),
        });
        state.check(Operation::GetWorkbook)?;

        state
            .workbooks
            .iter()
            .find(|w| w.id == workbook_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("workbook {}", workbook_id)))
    }

    async fn create_workbook(&self, request: &CreateWorkbookRequest) -> ApiResult<Workbook> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::CreateWorkbook {
            request: request.clone(),
        });
        state.check(Operation::CreateWorkbook)?;

        state.next_id += 1;
        let workbook_id = format!("us_wb_mem_{}", state.next_id);
        let sheets = request
            .sheets
            .iter()
            .enumerate()
            .map(|(i, blueprint)| Sheet {
                id: format!("{}_sheet_{}", workbook_id, i),
                name: Some(blueprint.name.clone()),
            })
            .collect();

        let workbook = Workbook {
            id: workbook_id,
            name: Some(request.name.clone()),
            space_id: request.space_id.clone(),
            sheets,
        };
        state.workbooks.push(workbook.clone());
        Ok(workbook)
    }

    async fn list_workbooks(&self, space_id: &str) -> ApiResult<Vec<Workbook>> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::ListWorkbooks {
            space_id: space_id.to_string(),
        });
        state.check(Operation::ListWorkbooks)?;

        Ok(state
            .workbooks
            .iter()
            .filter(|w| w.space_id == space_id)
            .cloned()
            .collect())
    }

    async fn delete_workbook(&self, workbook_id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::DeleteWorkbook {
            workbook_id: workbook_id.to_string(),
        });
        state.check(Operation::DeleteWorkbook)?;

        if state.failing_deletes.contains(workbook_id) {
            return Err(ApiError::status(
                409,
                format!("workbook {} is locked", workbook_id),
            ));
        }

        let before = state.workbooks.len();
        state.workbooks.retain(|w| w.id != workbook_id);
        if state.workbooks.len() == before {
            return Err(ApiError::NotFound(format!("workbook {}", workbook_id)));
        }
        Ok(())
    }

    async fn get_records(&self, sheet_id: &str) -> ApiResult<Vec<Record>> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::GetRecords {
            sheet_id: sheet_id.to_string(),
        });
        state.check(Operation::GetRecords)?;

        state
            .records
            .get(sheet_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("sheet {}", sheet_id)))
    }

    async fn ack_job(&self, job_id: &str, info: &str, progress: u8) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::AckJob {
            job_id: job_id.to_string(),
            info: info.to_string(),
            progress,
        });
        state.check(Operation::AckJob)?;

        let job = state.job_mut(job_id);
        job.status = Some("executing".to_string());
        job.progress = Some(f64::from(progress));
        job.info = Some(info.to_string());
        Ok(())
    }

    async fn complete_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::CompleteJob {
            job_id: job_id.to_string(),
            message: message.to_string(),
            info: info.to_string(),
        });
        state.check(Operation::CompleteJob)?;

        let job = state.job_mut(job_id);
        job.status = Some("complete".to_string());
        job.progress = Some(100.0);
        job.info = Some(info.to_string());
        Ok(())
    }

    async fn fail_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::FailJob {
            job_id: job_id.to_string(),
            message: message.to_string(),
            info: info.to_string(),
        });
        state.check(Operation::FailJob)?;

        let job = state.job_mut(job_id);
        job.status = Some("failed".to_string());
        job.info = Some(info.to_string());
        Ok(())
    }

    async fn get_job(&self, job_id: &str) -> ApiResult<Job> {
        let mut state = self.state.lock().await;
        state.calls.push(PlatformCall::GetJob {
            job_id: job_id.to_string(),
        });
        state.check(Operation::GetJob)?;

        state
            .jobs
            .get(job_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("job {}", job_id)))
    }
}
