//! Workbook agent CLI
//!
//! Usage:
//!   workbook-agent handle-event [--event <event.json>]
//!   workbook-agent run-job --job-id <id> --file-id <id>
//!   workbook-agent register-actions --file-id <id>
//!   workbook-agent simulate <records.json>
//!
//! Examples:
//!   cat event.json | workbook-agent handle-event
//!   workbook-agent run-job --job-id us_jb_123 --file-id us_fl_456
//!   workbook-agent simulate fixtures/people.json --show-blueprint

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::error;
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use workbook_agent::api::ApiClient;
use workbook_agent::config::Settings;
use workbook_agent::events::{DispatchOutcome, EventRouter, FileActionRegistrar, PlatformEvent};
use workbook_agent::model::Record;
use workbook_agent::pipeline::{JobOrchestrator, JobReport};
use workbook_agent::platform::{HttpPlatformApi, InMemoryPlatform, PlatformApi};

#[derive(Parser)]
#[command(name = "workbook-agent")]
#[command(about = "Workbook agent - infer a workbook from an uploaded file and create it on the platform")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to the usual search locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one platform event given as JSON
    HandleEvent {
        /// Path to the event JSON (reads stdin if not specified)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },

    /// Run the workbook creation job for a file
    RunJob {
        #[arg(long)]
        job_id: String,

        #[arg(long)]
        file_id: String,
    },

    /// Add the workbook creation action to a file
    RegisterActions {
        #[arg(long)]
        file_id: String,
    },

    /// Run the pipeline offline against a records fixture
    Simulate {
        /// JSON file holding a record array or a `{"records": [...]}` page
        records: PathBuf,

        /// Space the simulated upload belongs to
        #[arg(long, default_value = "us_sp_simulated")]
        space_id: String,

        /// Print the generated blueprint
        #[arg(long)]
        show_blueprint: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::HandleEvent { event } => cmd_handle_event(&settings, event).await,
        Commands::RunJob { job_id, file_id } => cmd_run_job(&settings, &job_id, &file_id).await,
        Commands::RegisterActions { file_id } => cmd_register_actions(&settings, &file_id).await,
        Commands::Simulate {
            records,
            space_id,
            show_blueprint,
        } => cmd_simulate(&settings, records, &space_id, show_blueprint).await,
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, workbook_agent::config::SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn http_platform(settings: &Settings) -> Option<Arc<dyn PlatformApi>> {
    match ApiClient::from_settings(&settings.api) {
        Ok(client) => {
            let api: Arc<dyn PlatformApi> = Arc::new(HttpPlatformApi::with_client(client));
            Some(api)
        }
        Err(e) => {
            eprintln!("Error creating API client: {}", e);
            None
        }
    }
}

async fn read_event(path: Option<PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

async fn cmd_handle_event(settings: &Settings, path: Option<PathBuf>) -> ExitCode {
    let text = match read_event(path).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading event: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event = match PlatformEvent::from_json(&text) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Invalid event: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(api) = http_platform(settings) else {
        return ExitCode::FAILURE;
    };
    let router = EventRouter::from_settings(api, settings);

    match router.dispatch(&event).await {
        DispatchOutcome::ActionRegistered(outcome) => {
            println!("{:?}", outcome);
            ExitCode::SUCCESS
        }
        DispatchOutcome::RegistrationFailed(message) => {
            eprintln!("Action registration failed: {}", message);
            ExitCode::FAILURE
        }
        DispatchOutcome::JobRun(report) => print_report(&report),
        DispatchOutcome::Ignored { topic, reason } => {
            println!("Ignored {}: {}", topic, reason);
            ExitCode::SUCCESS
        }
    }
}

async fn cmd_run_job(settings: &Settings, job_id: &str, file_id: &str) -> ExitCode {
    let Some(api) = http_platform(settings) else {
        return ExitCode::FAILURE;
    };
    let report = JobOrchestrator::from_settings(api, settings)
        .run(job_id, file_id)
        .await;
    print_report(&report)
}

async fn cmd_register_actions(settings: &Settings, file_id: &str) -> ExitCode {
    let Some(api) = http_platform(settings) else {
        return ExitCode::FAILURE;
    };
    match FileActionRegistrar::from_settings(api, settings)
        .register(file_id)
        .await
    {
        Ok(outcome) => {
            println!("{:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Action registration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFixture {
    List(Vec<Record>),
    Page { records: Vec<Record> },
}

async fn cmd_simulate(
    settings: &Settings,
    path: PathBuf,
    space_id: &str,
    show_blueprint: bool,
) -> ExitCode {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let records = match serde_json::from_str::<RecordsFixture>(&text) {
        Ok(RecordsFixture::List(records)) | Ok(RecordsFixture::Page { records }) => records,
        Err(e) => {
            eprintln!("Invalid records fixture '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let platform = Arc::new(InMemoryPlatform::new().with_uploaded_file(
        "us_fl_simulated",
        space_id,
        records,
    ));
    let report = JobOrchestrator::from_settings(platform.clone(), settings)
        .run("us_jb_simulated", "us_fl_simulated")
        .await;

    if show_blueprint {
        for blueprint in platform.created_blueprints().await {
            match serde_json::to_string_pretty(&blueprint) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize blueprint: {}", e),
            }
        }
    }

    print_report(&report)
}

fn print_report(report: &JobReport) -> ExitCode {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if report.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
