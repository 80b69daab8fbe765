//! Platform API seam.
//!
//! This module abstracts the control-plane operations the agent needs behind
//! an async trait, so that the pipeline can run against the real platform or
//! an in-process stand-in.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         PlatformApi                             │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  Remote calls (async)        │  Helpers (PlatformApiExt)  │  │
//! │  │  - get_file / update actions │  - wait_for_file_ready()   │  │
//! │  │  - get/create/list/delete    │    (bounded polling)       │  │
//! │  │    workbooks                 │                            │  │
//! │  │  - get_records               │                            │  │
//! │  │  - ack/complete/fail/get job │                            │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                 │                                   │
//!                 ▼                                   ▼
//!        HttpPlatformApi (ApiClient)         InMemoryPlatform (simulate, tests)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use workbook_agent::platform::{HttpPlatformApi, PlatformApi, PlatformApiExt};
//!
//! let platform = HttpPlatformApi::with_client(client);
//! let file = platform.wait_for_file_ready("us_fl_123", &settings.polling).await?;
//! let workbook = platform.get_workbook(file.workbook_id.as_deref().unwrap()).await?;
//! ```

mod http_provider;
mod memory;
mod provider;

pub use http_provider::HttpPlatformApi;
pub use memory::{InMemoryPlatform, Operation, PlatformCall};
pub use provider::{PlatformApi, PlatformApiExt};
