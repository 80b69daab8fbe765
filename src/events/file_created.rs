//! File action registration on `file:created`.

use std::sync::Arc;

use log::{debug, info};

use crate::api::protocol::Action;
use crate::api::ApiResult;
use crate::config::{ActionSettings, PollSettings, Settings};
use crate::platform::{PlatformApi, PlatformApiExt};

/// Result of registering the action on a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The action was appended; `actions` is the new length of the list.
    Added { actions: usize },
    /// The file already carried the action and was left untouched.
    AlreadyPresent,
}

/// Appends the workbook-creation action to uploaded files.
///
/// Registration is idempotent, keyed by the action's `operation`.
#[derive(Clone)]
pub struct FileActionRegistrar {
    api: Arc<dyn PlatformApi>,
    action: Action,
    poll: PollSettings,
}

impl FileActionRegistrar {
    pub fn new(api: Arc<dyn PlatformApi>, action: Action, poll: PollSettings) -> Self {
        Self { api, action, poll }
    }

    pub fn from_settings(api: Arc<dyn PlatformApi>, settings: &Settings) -> Self {
        Self::new(
            api,
            build_action(&settings.job.operation, &settings.action),
            settings.polling.clone(),
        )
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Wait for the file to finish processing, then add the action if missing.
    pub async fn register(&self, file_id: &str) -> ApiResult<RegistrationOutcome> {
        let file = self.api.wait_for_file_ready(file_id, &self.poll).await?;
        debug!("File {} has {} action(s)", file_id, file.actions.len());

        if file.has_action(&self.action.operation) {
            info!(
                "File {} already has action '{}'",
                file_id, self.action.operation
            );
            return Ok(RegistrationOutcome::AlreadyPresent);
        }

        let mut actions = file.actions;
        actions.push(self.action.clone());
        let count = actions.len();

        self.api.update_file_actions(file_id, actions).await?;
        info!("Added action '{}' to file {}", self.action.operation, file_id);

        match self.api.get_file(file_id).await {
            Ok(updated) => debug!(
                "File {} actions: {:?}",
                file_id,
                updated.actions.iter().map(|a| &a.operation).collect::<Vec<_>>()
            ),
            Err(e) => debug!("Could not re-read file {}: {}", file_id, e),
        }

        Ok(RegistrationOutcome::Added { actions: count })
    }
}

/// The action descriptor for `operation`, presented as configured.
pub fn build_action(operation: &str, settings: &ActionSettings) -> Action {
    Action {
        operation: operation.to_string(),
        label: settings.label.clone(),
        description: Some(settings.description.clone()),
        mode: Some(settings.mode.clone()),
        confirm: Some(settings.confirm),
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_action_shape() {
        let settings = Settings::default();
        let action = build_action(&settings.job.operation, &settings.action);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "operation": "createWorkbookFromFile",
                "label": "Create Workbook From File",
                "description": "This will create a Flatfile workbook based on the contents of the file.",
                "mode": "foreground",
                "confirm": true
            })
        );
    }
}
