//! Configuration module for the workbook agent.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    default_type_tags, expand_env_vars, ActionSettings, ApiSettings, InferenceMode,
    InferenceSettings, JobSettings, PollSettings, Settings, SettingsError, WorkbookSettings,
};
