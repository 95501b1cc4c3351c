//! Drug group kinds.
//!
//! The vocabulary is loaded from one alias file per group, always in the
//! order given by [`DrugGroupKind::ALL`]. Flat term indices depend on it.

/// The semantic role of a vocabulary group.
///
/// # Examples
///
/// ```
/// use statin_types::DrugGroupKind;
///
/// assert_eq!(DrugGroupKind::ALL[0], DrugGroupKind::Statins);
/// assert_eq!(DrugGroupKind::Suppress.file_name(), "suppress_list.txt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrugGroupKind {
    /// HMG-CoA reductase inhibitors.
    Statins,
    /// Non-statin lipid-lowering alternatives.
    StatinAlternatives,
    /// Drugs whose presence suppresses statin attribution.
    Suppress,
}

impl DrugGroupKind {
    /// All groups in load order.
    pub const ALL: [DrugGroupKind; 3] = [Self::Statins, Self::StatinAlternatives, Self::Suppress];

    /// Position of this group in load order.
    pub fn position(self) -> usize {
        match self {
            Self::Statins => 0,
            Self::StatinAlternatives => 1,
            Self::Suppress => 2,
        }
    }

    /// Default alias file name for this group.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Statins => "statin_list.txt",
            Self::StatinAlternatives => "statin_alts.txt",
            Self::Suppress => "suppress_list.txt",
        }
    }

    /// Membership column name in the summary output.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Statins => "STATIN",
            Self::StatinAlternatives => "STATIN_ALT",
            Self::Suppress => "SUPPRESS",
        }
    }
}

impl std::fmt::Display for DrugGroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Statins => "statins",
            Self::StatinAlternatives => "statin alternatives",
            Self::Suppress => "suppress list",
        };
        f.write_str(name)
    }
}
