//! # statin-report
//!
//! Batch report over discharge-summary notes.
//!
//! Renders the records produced by [`statin_loader`] as a summary CSV and
//! the matching SQL table definition, and reads the run configuration from
//! the environment.

#![warn(missing_docs)]

mod config;
mod output;
mod schema;

pub use config::ReportConfig;
pub use output::{summary_header, SummaryWriter};
pub use schema::render_schema;
