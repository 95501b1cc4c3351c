//! # statin-loader
//!
//! Section classification and drug-mention extraction for discharge-summary
//! notes.
//!
//! Each note is read line by line. A section classifier decides, with no
//! lookahead, whether a line sits in the past-medical-history, admission
//! medications or discharge medications part of the note. History lines set
//! sticky chronic-disease flags; admission-medication lines are scanned for
//! vocabulary drugs and an optional dose.
//!
//! ```
//! use statin_loader::{NoteAggregator, NoteRow, VocabularyBuilder};
//! use statin_types::{DoseValue, DrugGroupKind};
//!
//! let mut builder = VocabularyBuilder::new();
//! builder.add_group(DrugGroupKind::Statins, "statins", "atorvastatin|lipitor".as_bytes())?;
//! builder.add_group(DrugGroupKind::StatinAlternatives, "alts", "".as_bytes())?;
//! builder.add_group(DrugGroupKind::Suppress, "suppress", "".as_bytes())?;
//! let vocab = builder.build()?;
//!
//! let note = NoteRow {
//!     category: "Discharge summary".to_string(),
//!     text: "Admission Medications:\nPatient takes lipitor".to_string(),
//!     ..Default::default()
//! };
//! let outcome = NoteAggregator::new(&vocab).process(&note);
//!
//! assert!(outcome.is_kept());
//! assert_eq!(outcome.record.doses, vec![DoseValue::Unknown]);
//! # Ok::<(), statin_loader::ExtractError>(())
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod history;
pub mod loader;
pub mod mention;
pub mod notes;
pub mod pipeline;
pub mod section;
pub mod types;
pub mod vocabulary;

pub use aggregator::{Disposition, NoteAggregator, NoteOutcome};
pub use loader::discover_note_files;
pub use mention::MentionExtractor;
pub use notes::{NoteReader, NoteRow};
pub use pipeline::{FileOutcome, Pipeline};
pub use section::{detect_header, LineClass, SectionClassifier};
pub use types::{DrugListFiles, ExtractConfig, ExtractError, ExtractResult};
pub use vocabulary::{DrugGroup, DrugTerm, SearchTerm, Vocabulary, VocabularyBuilder};

// Re-export statin-types for convenience
pub use statin_types;
