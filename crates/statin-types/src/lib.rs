//! # statin-types
//!
//! Type definitions for drug-exposure facts extracted from discharge-summary
//! notes.
//!
//! This crate holds the plain data shapes shared by the loader and the
//! report binary: section labels, dose values, chronic-disease flags, drug
//! group kinds, per-note records and run-level counters.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use statin_types::{DoseValue, DrugGroupKind, Section};
//!
//! let dose = DoseValue::from_parsed("20");
//! assert_eq!(dose.as_f64(), 20.0);
//! assert!(dose.is_mentioned());
//!
//! assert_eq!(DrugGroupKind::Statins.column_name(), "STATIN");
//! assert_eq!(Section::default(), Section::None);
//! ```

#![warn(missing_docs)]

mod dose;
mod group;
mod history;
mod record;
mod section;
mod summary;

// Re-export all public types at crate root
pub use dose::{DoseValue, DOSE_UNKNOWN_SENTINEL};
pub use group::DrugGroupKind;
pub use history::HistoryFlags;
pub use record::NoteRecord;
pub use section::Section;
pub use summary::RunSummary;
