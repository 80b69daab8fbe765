//! Workbook lifecycle.
//!
//! Creates the generated workbook for a job and removes workbooks that were
//! left without sheets in the same space.

mod lifecycle;

pub use lifecycle::WorkbookLifecycle;
