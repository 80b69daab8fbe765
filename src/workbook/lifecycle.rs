//! Workbook creation and cleanup.

use std::sync::Arc;

use log::{info, warn};

use crate::api::protocol::CreateWorkbookRequest;
use crate::api::ApiResult;
use crate::config::WorkbookSettings;
use crate::model::Blueprint;
use crate::platform::PlatformApi;

/// Creates generated workbooks and prunes empty ones in a space.
///
/// Nothing here retries; remote errors go back to the caller.
#[derive(Clone)]
pub struct WorkbookLifecycle {
    api: Arc<dyn PlatformApi>,
    workbook_name: String,
}

impl WorkbookLifecycle {
    pub fn new(api: Arc<dyn PlatformApi>, workbook_name: impl Into<String>) -> Self {
        Self {
            api,
            workbook_name: workbook_name.into(),
        }
    }

    pub fn from_settings(api: Arc<dyn PlatformApi>, settings: &WorkbookSettings) -> Self {
        Self::new(api, settings.name.clone())
    }

    pub fn workbook_name(&self) -> &str {
        &self.workbook_name
    }

    /// Create a workbook holding exactly one sheet built from `blueprint`.
    ///
    /// Returns the id of the new workbook.
    pub async fn create_workbook(&self, blueprint: Blueprint, space_id: &str) -> ApiResult<String> {
        let request = CreateWorkbookRequest {
            name: self.workbook_name.clone(),
            space_id: space_id.to_string(),
            sheets: vec![blueprint],
        };

        let workbook = self.api.create_workbook(&request).await?;
        info!(
            "Created workbook {} in space {} ({} sheet(s))",
            workbook.id,
            space_id,
            workbook.sheets.len()
        );
        Ok(workbook.id)
    }

    /// Delete every workbook of the space that has no sheets.
    ///
    /// Listing failures are returned. A failed delete is logged and skipped,
    /// and the remaining workbooks are still processed. Returns the ids that
    /// were actually deleted, in listing order.
    pub async fn prune_empty_workbooks(&self, space_id: &str) -> ApiResult<Vec<String>> {
        let workbooks = self.api.list_workbooks(space_id).await?;
        let mut pruned = Vec::new();

        for workbook in workbooks.iter().filter(|w| w.is_empty()) {
            match self.api.delete_workbook(&workbook.id).await {
                Ok(()) => {
                    info!("Deleted empty workbook {}", workbook.id);
                    pruned.push(workbook.id.clone());
                }
                Err(e) => {
                    warn!("Failed to delete empty workbook {}: {}", workbook.id, e);
                }
            }
        }

        Ok(pruned)
    }
}
