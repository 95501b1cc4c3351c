//! Note section labels.

/// The semantic zone of a discharge summary a line belongs to.
///
/// Exactly one section is active per line. It persists across lines until a
/// header line switches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// No recognized header seen yet.
    #[default]
    None,
    /// Past medical / medication history.
    History,
    /// Medications on admission (home, pre-hospital, outpatient...).
    AdmissionMedications,
    /// Medications on discharge.
    DischargeMedications,
}

impl Section {
    /// Short label used in log output.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::History => "history",
            Self::AdmissionMedications => "admission-medications",
            Self::DischargeMedications => "discharge-medications",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
