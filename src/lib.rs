//! # Workbook agent
//!
//! Event-driven automation for a data-onboarding platform: when a file is
//! uploaded it offers a "create workbook" action, and when that job runs it
//! infers a blueprint from the file's records and materializes it as a new
//! workbook.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Platform events (file:created, job:ready)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [events]
//! ┌─────────────────────────────────────────────────────────┐
//! │   FileActionRegistrar          JobOrchestrator           │
//! │   (add action once)            (pipeline table)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!            ┌─────────────┼──────────────┐
//!            ▼ [jobs]      ▼ [inference]  ▼ [workbook]
//!     ack/complete/fail  records →     create / prune
//!                        Blueprint     workbooks
//!                          │
//!                          ▼ [platform]
//! ┌─────────────────────────────────────────────────────────┐
//! │      PlatformApi  (HttpPlatformApi | InMemoryPlatform)   │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod events;
pub mod inference;
pub mod jobs;
pub mod model;
pub mod pipeline;
pub mod platform;
pub mod workbook;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{InferenceMode, Settings};
    pub use crate::events::{DispatchOutcome, EventRouter, PlatformEvent};
    pub use crate::inference::{SchemaInferenceError, SchemaSynthesizer, TypeTable};
    pub use crate::model::{
        Blueprint, Cell, Constraint, FieldConfig, FieldDescriptor, FieldType, Record,
    };
    pub use crate::pipeline::{JobOrchestrator, JobReport, JobState};
    pub use crate::platform::{HttpPlatformApi, InMemoryPlatform, PlatformApi, PlatformApiExt};
}

pub use config::Settings;
pub use model::{Blueprint, Record};
