//! Finalized per-note record.

use crate::{DoseValue, DrugGroupKind, HistoryFlags};

/// One discharge summary after all of its lines have been processed.
///
/// Identifiers and timestamps are kept exactly as they appeared in the note
/// source. `membership` has one entry per drug group in load order and
/// `doses` has one entry per flat vocabulary index.
///
/// # Examples
///
/// ```
/// use statin_types::{DoseValue, DrugGroupKind, NoteRecord};
///
/// let record = NoteRecord {
///     membership: vec![1, 0, 2],
///     doses: vec![DoseValue::Dose(20.0)],
///     ..Default::default()
/// };
///
/// assert_eq!(record.membership_of(DrugGroupKind::Suppress), 2);
/// assert!(record.takes(DrugGroupKind::Statins));
/// assert!(!record.takes(DrugGroupKind::StatinAlternatives));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteRecord {
    /// Note row identifier.
    pub row_id: String,
    /// Hospital admission identifier.
    pub hadm_id: String,
    /// Patient identifier.
    pub subject_id: String,
    /// Chart date.
    pub chartdate: String,
    /// Chart time (often empty for discharge summaries).
    pub charttime: String,
    /// Whether a history header was seen.
    pub hist_found: bool,
    /// Chronic-disease flags from the history section.
    pub history: HistoryFlags,
    /// Whether an admission-medications header was seen.
    pub admit_found: bool,
    /// Count of mentioned terms per drug group.
    pub membership: Vec<usize>,
    /// Dose value per flat vocabulary index.
    pub doses: Vec<DoseValue>,
}

impl NoteRecord {
    /// Returns the membership count for a group (0 if absent).
    pub fn membership_of(&self, kind: DrugGroupKind) -> usize {
        self.membership.get(kind.position()).copied().unwrap_or(0)
    }

    /// Returns true if at least one term of the group was mentioned.
    pub fn takes(&self, kind: DrugGroupKind) -> bool {
        self.membership_of(kind) > 0
    }
}
