//! Per-term dose value.
//!
//! A note records, for every vocabulary term, whether the drug was seen in
//! the admission-medications section and with which dose.

/// Output value for a drug that was mentioned without a readable dose.
pub const DOSE_UNKNOWN_SENTINEL: f64 = 9999.0;

/// Dose state of one vocabulary term within one note.
///
/// # Examples
///
/// ```
/// use statin_types::DoseValue;
///
/// assert_eq!(DoseValue::from_parsed("2.5"), DoseValue::Dose(2.5));
/// assert_eq!(DoseValue::from_parsed("2..5"), DoseValue::Unknown);
/// assert_eq!(DoseValue::NotMentioned.as_f64(), 0.0);
/// assert_eq!(DoseValue::Unknown.as_f64(), 9999.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoseValue {
    /// Not seen in this note's admission-medications section.
    #[default]
    NotMentioned,
    /// Seen, but no number followed the mention.
    Unknown,
    /// Seen with the given dose.
    Dose(f64),
}

impl DoseValue {
    /// Builds a dose from a captured number token.
    ///
    /// Tokens that do not parse as a float fall back to [`DoseValue::Unknown`].
    pub fn from_parsed(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Dose(value),
            _ => Self::Unknown,
        }
    }

    /// Returns the numeric form used in output: `0`, the sentinel, or the dose.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::NotMentioned => 0.0,
            Self::Unknown => DOSE_UNKNOWN_SENTINEL,
            Self::Dose(value) => value,
        }
    }

    /// Returns true if this value counts toward group membership.
    ///
    /// A captured dose of exactly zero does not count, matching its numeric form.
    pub fn is_mentioned(self) -> bool {
        self.as_f64() != 0.0
    }
}

/// Absent and unknown values print as integers (`0`, `9999`); a captured
/// dose always keeps its decimal point (`20.0`, `2.5`).
impl std::fmt::Display for DoseValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotMentioned => write!(f, "0"),
            Self::Unknown => write!(f, "{}", DOSE_UNKNOWN_SENTINEL as u32),
            Self::Dose(value) => write!(f, "{value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parsed_forms() {
        assert_eq!(DoseValue::from_parsed("20"), DoseValue::Dose(20.0));
        assert_eq!(DoseValue::from_parsed("2.5"), DoseValue::Dose(2.5));
        assert_eq!(DoseValue::from_parsed(".5"), DoseValue::Dose(0.5));
        assert_eq!(DoseValue::from_parsed(""), DoseValue::Unknown);
        assert_eq!(DoseValue::from_parsed("abc"), DoseValue::Unknown);
    }

    #[test]
    fn test_membership() {
        assert!(!DoseValue::NotMentioned.is_mentioned());
        assert!(DoseValue::Unknown.is_mentioned());
        assert!(DoseValue::Dose(40.0).is_mentioned());
        assert!(!DoseValue::Dose(0.0).is_mentioned());
    }

    #[test]
    fn test_display() {
        assert_eq!(DoseValue::NotMentioned.to_string(), "0");
        assert_eq!(DoseValue::Unknown.to_string(), "9999");
        assert_eq!(DoseValue::Dose(2.5).to_string(), "2.5");
        assert_eq!(DoseValue::Dose(20.0).to_string(), "20.0");
        assert_eq!(DoseValue::Dose(0.0).to_string(), "0.0");
    }
}
