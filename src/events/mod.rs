//! Platform events.
//!
//! Decodes the JSON events delivered by the platform and routes them:
//!
//! ```text
//! file:created ──► FileActionRegistrar  (wait for file, add action once)
//! job:ready    ──► JobOrchestrator      (only for the configured job kind)
//! anything else ─► ignored
//! ```

mod event;
mod file_created;
mod router;

pub use event::{EventContext, EventError, PlatformEvent, TOPIC_FILE_CREATED, TOPIC_JOB_READY};
pub use file_created::{build_action, FileActionRegistrar, RegistrationOutcome};
pub use router::{DispatchOutcome, EventRouter};
