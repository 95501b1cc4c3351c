//! Chronic-disease history flags.

/// Sticky chronic-disease flags found in a note's history section.
///
/// Flags only ever go from `false` to `true` within a note.
///
/// # Examples
///
/// ```
/// use statin_types::HistoryFlags;
///
/// let mut flags = HistoryFlags::default();
/// flags.merge(HistoryFlags { diabetes: true, ..Default::default() });
/// flags.merge(HistoryFlags::default());
/// assert!(flags.diabetes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryFlags {
    /// Chronic kidney / renal disease.
    pub kidney: bool,
    /// Liver failure, cirrhosis, hepatitis and related.
    pub liver: bool,
    /// Coronary, carotid, peripheral vascular disease and related.
    pub heart: bool,
    /// Hypertension.
    pub hypertension: bool,
    /// Diabetes.
    pub diabetes: bool,
}

impl HistoryFlags {
    /// ORs `other` into `self`.
    pub fn merge(&mut self, other: HistoryFlags) {
        self.kidney |= other.kidney;
        self.liver |= other.liver;
        self.heart |= other.heart;
        self.hypertension |= other.hypertension;
        self.diabetes |= other.diabetes;
    }

    /// Flags in output column order: kidney, liver, heart, hypertension, diabetes.
    pub fn as_array(&self) -> [bool; 5] {
        [
            self.kidney,
            self.liver,
            self.heart,
            self.hypertension,
            self.diabetes,
        ]
    }
}
