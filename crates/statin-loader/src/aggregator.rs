//! Per-note aggregation.
//!
//! Feeds a note's lines through the section classifier and routes each line
//! to history-flag detection or drug-mention extraction depending on the
//! section in force, then finalizes one [`NoteRecord`].

use statin_types::{DoseValue, HistoryFlags, NoteRecord, Section};

use crate::history;
use crate::mention::MentionExtractor;
use crate::notes::NoteRow;
use crate::section::SectionClassifier;
use crate::vocabulary::Vocabulary;

/// Whether a finalized note goes to output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// An admission-medications header was found.
    Kept,
    /// No admission-medications header anywhere in the note.
    Excluded,
}

/// A finalized note plus what the driver needs to report about it.
#[derive(Debug, Clone)]
pub struct NoteOutcome {
    /// The finalized record (also built for excluded notes).
    pub record: NoteRecord,
    /// Output decision.
    pub disposition: Disposition,
    /// Lines flagged by the classifier as ambiguous medication mentions.
    pub ambiguous_lines: Vec<String>,
}

impl NoteOutcome {
    /// Returns true if the record goes to output.
    pub fn is_kept(&self) -> bool {
        self.disposition == Disposition::Kept
    }

    /// Returns the record if it goes to output.
    pub fn into_kept(self) -> Option<NoteRecord> {
        self.is_kept().then_some(self.record)
    }
}

/// Mutable state for one note while its lines are read.
#[derive(Debug)]
struct NoteSession {
    classifier: SectionClassifier,
    hist_found: bool,
    admit_found: bool,
    history: HistoryFlags,
    doses: Vec<DoseValue>,
    ambiguous_lines: Vec<String>,
}

impl NoteSession {
    fn new(term_count: usize) -> Self {
        Self {
            classifier: SectionClassifier::new(),
            hist_found: false,
            admit_found: false,
            history: HistoryFlags::default(),
            doses: vec![DoseValue::NotMentioned; term_count],
            ambiguous_lines: Vec::new(),
        }
    }

    fn feed_line(&mut self, line: &str, mentions: &MentionExtractor<'_>) {
        let class = self.classifier.classify_line(line);
        match class.header {
            Some(Section::History) => self.hist_found = true,
            Some(Section::AdmissionMedications) => self.admit_found = true,
            _ => {}
        }
        if class.ambiguous {
            self.ambiguous_lines.push(line.to_string());
        }

        match class.section {
            Section::History => self.history.merge(history::scan_line(line)),
            Section::AdmissionMedications => {
                mentions.scan_line(line, &mut self.doses);
            }
            Section::DischargeMedications | Section::None => {}
        }
    }
}

/// Turns notes into finalized records against a loaded vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct NoteAggregator<'v> {
    vocab: &'v Vocabulary,
    mentions: MentionExtractor<'v>,
}

impl<'v> NoteAggregator<'v> {
    /// Creates an aggregator over a loaded vocabulary.
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self {
            vocab,
            mentions: MentionExtractor::new(vocab),
        }
    }

    /// Processes every line of a note, in order, and finalizes the record.
    pub fn process(&self, note: &NoteRow) -> NoteOutcome {
        let mut session = NoteSession::new(self.vocab.len());
        for line in note.text.lines() {
            session.feed_line(line, &self.mentions);
        }

        let membership = self
            .vocab
            .groups()
            .iter()
            .map(|group| {
                session.doses[group.range.clone()]
                    .iter()
                    .filter(|dose| dose.is_mentioned())
                    .count()
            })
            .collect();

        let disposition = if session.admit_found {
            Disposition::Kept
        } else {
            Disposition::Excluded
        };

        NoteOutcome {
            record: NoteRecord {
                row_id: note.row_id.clone(),
                hadm_id: note.hadm_id.clone(),
                subject_id: note.subject_id.clone(),
                chartdate: note.chartdate.clone(),
                charttime: note.charttime.clone(),
                hist_found: session.hist_found,
                history: session.history,
                admit_found: session.admit_found,
                membership,
                doses: session.doses,
            },
            disposition,
            ambiguous_lines: session.ambiguous_lines,
        }
    }
}
