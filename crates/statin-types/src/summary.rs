//! Run-level counters.

use crate::{DrugGroupKind, NoteRecord};

/// Counters accumulated by the driver over a whole run.
///
/// Category tallies are applied to every discharge summary processed,
/// including the ones excluded from output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Note files read.
    pub files_processed: usize,
    /// Discharge summaries processed.
    pub notes_processed: usize,
    /// Records written to output.
    pub records_kept: usize,
    /// Records dropped because no admission-medications header was found.
    pub records_excluded: usize,
    /// Note rows skipped because of missing fields.
    pub notes_skipped: usize,
    /// Notes with at least one statin.
    pub on_statins: usize,
    /// Notes with a statin and a statin alternative.
    pub statins_and_alts: usize,
    /// Notes with a statin and a suppress-list drug.
    pub statins_and_suppress: usize,
    /// Notes with a statin alternative but no statin.
    pub alts_only: usize,
    /// Notes with a suppress-list drug but no statin.
    pub suppress_only: usize,
    /// Wall-clock time of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Records one finalized note.
    pub fn tally(&mut self, record: &NoteRecord, kept: bool) {
        self.notes_processed += 1;
        if kept {
            self.records_kept += 1;
        } else {
            self.records_excluded += 1;
        }

        let alts = record.takes(DrugGroupKind::StatinAlternatives);
        let suppress = record.takes(DrugGroupKind::Suppress);
        if record.takes(DrugGroupKind::Statins) {
            self.on_statins += 1;
            if alts {
                self.statins_and_alts += 1;
            }
            if suppress {
                self.statins_and_suppress += 1;
            }
        } else {
            if alts {
                self.alts_only += 1;
            }
            if suppress {
                self.suppress_only += 1;
            }
        }
    }

    /// Adds another summary's counters into this one.
    pub fn absorb(&mut self, other: &RunSummary) {
        self.files_processed += other.files_processed;
        self.notes_processed += other.notes_processed;
        self.records_kept += other.records_kept;
        self.records_excluded += other.records_excluded;
        self.notes_skipped += other.notes_skipped;
        self.on_statins += other.on_statins;
        self.statins_and_alts += other.statins_and_alts;
        self.statins_and_suppress += other.statins_and_suppress;
        self.alts_only += other.alts_only;
        self.suppress_only += other.suppress_only;
    }

    /// Files processed per second over the run.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            self.files_processed as f64 / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}
