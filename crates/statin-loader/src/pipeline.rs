//! Run driver over a set of note files.
//!
//! Files are processed in the order given; within a file, rows are processed
//! in file order. Kept records are handed to a sink as they are finalized and
//! run-level counters are accumulated into a [`RunSummary`].
//!
//! With the `parallel` feature, files are processed concurrently but their
//! results are merged back in file order, so the sink sees exactly the same
//! sequence as in a sequential run.

use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use statin_types::{NoteRecord, RunSummary};

use crate::aggregator::{NoteAggregator, NoteOutcome};
use crate::notes::NoteReader;
use crate::types::{ExtractConfig, ExtractResult};
use crate::vocabulary::Vocabulary;

/// Outcomes of one note file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    /// Finalized discharge summaries, in row order.
    pub notes: Vec<NoteOutcome>,
    /// Rows skipped because of missing fields.
    pub skipped: usize,
}

/// Drives note files through a [`NoteAggregator`].
#[derive(Debug, Clone)]
pub struct Pipeline<'v> {
    aggregator: NoteAggregator<'v>,
    config: ExtractConfig,
}

impl<'v> Pipeline<'v> {
    /// Creates a pipeline over a loaded vocabulary.
    pub fn new(vocab: &'v Vocabulary, config: ExtractConfig) -> Self {
        Self {
            aggregator: NoteAggregator::new(vocab),
            config,
        }
    }

    /// Processes every row of one note file.
    ///
    /// Rows with missing fields are logged and skipped.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> ExtractResult<FileOutcome> {
        let path = path.as_ref();
        let reader = NoteReader::from_path(path)?;
        let mut outcome = FileOutcome::default();

        for row in reader {
            let note = match row {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!("Skipping note in {}: {}", path.display(), e);
                    outcome.skipped += 1;
                    continue;
                }
            };

            if self.config.discharge_only && !note.is_discharge_summary() {
                continue;
            }
            outcome.notes.push(self.aggregator.process(&note));
        }

        Ok(outcome)
    }

    /// Processes all files and feeds kept records to `sink`.
    ///
    /// A file that cannot be read is logged and skipped; an error from the
    /// sink aborts the run.
    pub fn run<F>(&self, files: &[PathBuf], mut sink: F) -> ExtractResult<RunSummary>
    where
        F: FnMut(&NoteRecord) -> ExtractResult<()>,
    {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        #[cfg(feature = "parallel")]
        let results: Vec<_> = files.par_iter().map(|p| self.process_file(p)).collect();
        #[cfg(not(feature = "parallel"))]
        let results = files.iter().map(|p| self.process_file(p));

        for (i, (path, result)) in files.iter().zip(results).enumerate() {
            if self.config.progress_interval > 0 && i % self.config.progress_interval == 0 {
                tracing::info!("{}.. {}", i, path.display());
            }
            let mut file_summary = RunSummary {
                files_processed: 1,
                ..Default::default()
            };

            match result {
                Ok(outcome) => {
                    file_summary.notes_skipped = outcome.skipped;
                    for note in outcome.notes {
                        for line in &note.ambiguous_lines {
                            tracing::debug!(row_id = %note.record.row_id, "?? {}", line);
                        }
                        file_summary.tally(&note.record, note.is_kept());
                        if let Some(record) = note.into_kept() {
                            sink(&record)?;
                        }
                    }
                }
                Err(e) => tracing::warn!("Could not read {}: {}", path.display(), e),
            }
            summary.absorb(&file_summary);
        }

        summary.elapsed_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }
}
