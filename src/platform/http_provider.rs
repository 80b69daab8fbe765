//! HttpPlatformApi implementation.
//!
//! This module provides the primary PlatformApi implementation that uses the
//! ApiClient for HTTP calls to the platform.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::provider::PlatformApi;
use crate::api::protocol::{
    AckJobRequest, Action, CreateWorkbookRequest, File, FinishJobRequest, Job, JobOutcome,
    RecordsPage, Success, UpdateFileRequest, Workbook,
};
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::model::Record;

/// PlatformApi implementation that uses the ApiClient.
///
/// # Example
///
/// ```ignore
/// use workbook_agent::api::ApiClient;
/// use workbook_agent::platform::HttpPlatformApi;
///
/// let client = ApiClient::new("https://platform.flatfile.com/api/v1", "sk_...")?;
/// let platform = HttpPlatformApi::with_client(client);
///
/// let file = platform.get_file("us_fl_123").await?;
/// ```
pub struct HttpPlatformApi {
    client: Arc<ApiClient>,
}

impl HttpPlatformApi {
    /// Create a new HttpPlatformApi from a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a new HttpPlatformApi with an owned client.
    pub fn with_client(client: ApiClient) -> Self {
        Self::new(Arc::new(client))
    }

    async fn finish_job(
        &self,
        job_id: &str,
        verb: &str,
        message: &str,
        info: &str,
    ) -> ApiResult<()> {
        let _: serde_json::Value = self
            .client
            .send(
                Method::POST,
                &format!("/jobs/{}/{}", job_id, verb),
                &FinishJobRequest {
                    outcome: JobOutcome {
                        message: message.to_string(),
                    },
                    info: info.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PlatformApi for HttpPlatformApi {
    async fn get_file(&self, file_id: &str) -> ApiResult<File> {
        self.client.get(&format!("/files/{}", file_id), &[]).await
    }

    async fn update_file_actions(&self, file_id: &str, actions: Vec<Action>) -> ApiResult<File> {
        self.client
            .send(
                Method::PATCH,
                &format!("/files/{}", file_id),
                &UpdateFileRequest { actions },
            )
            .await
    }

    async fn get_workbook(&self, workbook_id: &str) -> ApiResult<Workbook> {
        self.client
            .get(&format!("/workbooks/{}", workbook_id), &[])
            .await
    }

    async fn create_workbook(&self, request: &CreateWorkbookRequest) -> ApiResult<Workbook> {
        self.client.send(Method::POST, "/workbooks", request).await
    }

    async fn list_workbooks(&self, space_id: &str) -> ApiResult<Vec<Workbook>> {
        self.client
            .get("/workbooks", &[("spaceId", space_id)])
            .await
    }

    async fn delete_workbook(&self, workbook_id: &str) -> ApiResult<()> {
        let response: Success = self
            .client
            .delete(&format!("/workbooks/{}", workbook_id))
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(ApiError::InvalidResponse(format!(
                "delete of workbook {} was not acknowledged",
                workbook_id
            )))
        }
    }

    async fn get_records(&self, sheet_id: &str) -> ApiResult<Vec<Record>> {
        let page: RecordsPage = self
            .client
            .get(&format!("/sheets/{}/records", sheet_id), &[])
            .await?;
        Ok(page.records)
    }

    async fn ack_job(&self, job_id: &str, info: &str, progress: u8) -> ApiResult<()> {
        let _: serde_json::Value = self
            .client
            .send(
                Method::POST,
                &format!("/jobs/{}/ack", job_id),
                &AckJobRequest {
                    info: info.to_string(),
                    progress,
                },
            )
            .await?;
        Ok(())
    }

    async fn complete_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()> {
        self.finish_job(job_id, "complete", message, info).await
    }

    async fn fail_job(&self, job_id: &str, message: &str, info: &str) -> ApiResult<()> {
        self.finish_job(job_id, "fail", message, info).await
    }

    async fn get_job(&self, job_id: &str) -> ApiResult<Job> {
        self.client.get(&format!("/jobs/{}", job_id), &[]).await
    }
}
