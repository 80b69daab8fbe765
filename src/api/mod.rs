//! Platform control-plane API client.
//!
//! This module talks HTTP + JSON to the data-onboarding platform. It knows
//! nothing about schema inference or job orchestration; those live behind the
//! [`crate::platform::PlatformApi`] seam.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Workbook agent (Rust + Tokio)                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                    ApiClient (async)                      │  │
//! │  │  - Bearer token auth                                      │  │
//! │  │  - {"data": ...} envelope unwrapping                      │  │
//! │  │  - Status → ApiError classification                       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │ HTTPS                             │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Platform API: files, workbooks, sheets/records, jobs     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod error;
pub mod protocol;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
