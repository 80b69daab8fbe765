//! TOML-based configuration for the workbook agent.
//!
//! Supports a config file (workbook-agent.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [api]
//! base_url = "https://platform.flatfile.com/api/v1"
//! secret_key = "${FLATFILE_API_KEY}"
//! timeout_secs = 30
//!
//! [polling]
//! interval_ms = 2000
//! max_attempts = 30
//!
//! [job]
//! operation = "createWorkbookFromFile"
//! ack_progress = 10
//!
//! [inference]
//! mode = "auto"
//! validate_headers = true
//!
//! [inference.type_tags]
//! String = "string"
//! Int = "number"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::FieldType;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Platform API connection.
    pub api: ApiSettings,

    /// File readiness polling.
    pub polling: PollSettings,

    /// Job protocol messages.
    pub job: JobSettings,

    /// Action descriptor appended to uploaded files.
    pub action: ActionSettings,

    /// Generated workbook settings.
    pub workbook: WorkbookSettings,

    /// Schema inference settings.
    pub inference: InferenceSettings,
}

/// Platform API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the control-plane API.
    pub base_url: String,

    /// Secret key (supports ${ENV_VAR} expansion).
    pub secret_key: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://platform.flatfile.com/api/v1".to_string(),
            secret_key: "${FLATFILE_API_KEY}".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiSettings {
    /// Get the secret key with environment variables expanded.
    pub fn resolved_secret_key(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.secret_key)
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bounded polling for a file to reach the `complete` status.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between two status fetches, in milliseconds.
    pub interval_ms: u64,

    /// Maximum number of status fetches before giving up.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            max_attempts: 30,
        }
    }
}

impl PollSettings {
    /// Delay between two status fetches.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Job protocol settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JobSettings {
    /// Operation name of the file action that triggers the job.
    pub operation: String,

    /// Job kind the `job:ready` listener is filtered to.
    pub kind: String,

    /// Progress reported when acknowledging.
    pub ack_progress: u8,

    /// Info reported when acknowledging.
    pub ack_info: String,

    /// Outcome message reported on completion.
    pub complete_message: String,

    /// Info reported on completion.
    pub complete_info: String,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            operation: "createWorkbookFromFile".to_string(),
            kind: "file:createWorkbookFromFile".to_string(),
            ack_progress: 10,
            ack_info: "Starting workbook creation.".to_string(),
            complete_message: "Workbook creation is complete.".to_string(),
            complete_info:
                "The workbook has been successfully formatted to match the blueprint structure."
                    .to_string(),
        }
    }
}

/// Presentation of the file action that lets a user start the job.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionSettings {
    pub label: String,
    pub description: String,
    pub mode: String,
    pub confirm: bool,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            label: "Create Workbook From File".to_string(),
            description:
                "This will create a Flatfile workbook based on the contents of the file."
                    .to_string(),
            mode: "foreground".to_string(),
            confirm: true,
        }
    }
}

/// Generated workbook settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkbookSettings {
    /// Name given to every generated workbook.
    pub name: String,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            name: "Dynamically Generated Workbook".to_string(),
        }
    }
}

/// How field types are inferred from the representative record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMode {
    /// Tag mapping when a metadata block is present, runtime shape otherwise.
    #[default]
    Auto,
    /// Sample values are declared type tags ("String", "Int", ...).
    TagMapping,
    /// Sample values are real data, classified by their JSON kind.
    RuntimeShape,
}

/// Inference settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// Inference strategy.
    pub mode: InferenceMode,

    /// Reject data records that do not carry every header.
    pub validate_headers: bool,

    /// Declared type tag to canonical field type.
    pub type_tags: BTreeMap<String, FieldType>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            mode: InferenceMode::Auto,
            validate_headers: true,
            type_tags: default_type_tags(),
        }
    }
}

/// The built-in tag table.
pub fn default_type_tags() -> BTreeMap<String, FieldType> {
    [
        ("String", FieldType::String),
        ("Enumeration", FieldType::Enum),
        ("Int", FieldType::Number),
        ("Float", FieldType::Number),
        ("Boolean", FieldType::Boolean),
    ]
    .into_iter()
    .map(|(tag, ty)| (tag.to_string(), ty))
    .collect()
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `WORKBOOK_AGENT_CONFIG`
    /// 2. `./workbook-agent.toml`
    /// 3. `~/.config/workbook-agent/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("WORKBOOK_AGENT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("workbook-agent.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("workbook-agent").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.polling.max_attempts == 0 {
            return Err(SettingsError::InvalidConfig(
                "polling.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.job.ack_progress > 100 {
            return Err(SettingsError::InvalidConfig(format!(
                "job.ack_progress must be a percentage, got {}",
                self.job.ack_progress
            )));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(SettingsError::InvalidConfig("api.base_url is empty".to_string()));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
