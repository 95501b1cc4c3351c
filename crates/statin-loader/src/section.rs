//! Line-by-line section classification.
//!
//! Headers are recognized only on lines containing a colon. Three detectors
//! are tried in fixed order (history, discharge medications, admission
//! medications) and the first hit switches the current section. Any other
//! line, including an unrecognized colon line, leaves the section unchanged.

use std::sync::LazyLock;

use regex::Regex;
use statin_types::Section;

static HISTORY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)med(ical)?\s+hist(ory)?").unwrap());

static DISCHARGE_MEDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)medications|meds").unwrap());

static DISCHARGE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)disch(arge)?").unwrap());

static ADMISSION_MEDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)medication|meds").unwrap());

static ADMISSION_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)admission|admitting|home|nh|nmeds|pre(-|\s)?(hosp|op)|current|previous|outpatient|outpt|outside|^[^a-zA-Z]",
    )
    .unwrap()
});

static AMBIGUOUS_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)admission|discharge|transfer").unwrap());

/// Result of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    /// Section in force for this line (after any header switch).
    pub section: Section,
    /// The header recognized on this line, if any.
    pub header: Option<Section>,
    /// Mentions medications with an admission/discharge/transfer context
    /// but matched no header detector.
    pub ambiguous: bool,
}

/// Per-note section state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionClassifier {
    current: Section,
    previous: Section,
}

impl SectionClassifier {
    /// Creates a classifier in [`Section::None`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Section currently in force.
    pub fn current(&self) -> Section {
        self.current
    }

    /// Section in force before the last header switch.
    pub fn previous(&self) -> Section {
        self.previous
    }

    /// Classifies a line and updates the state.
    pub fn classify_line(&mut self, line: &str) -> LineClass {
        let header = detect_header(line);
        if let Some(section) = header {
            if section != self.current {
                tracing::trace!("Section {} -> {}", self.current, section);
            }
            self.previous = self.current;
            self.current = section;
        }

        let ambiguous =
            header.is_none() && ADMISSION_MEDS.is_match(line) && AMBIGUOUS_CONTEXT.is_match(line);

        LineClass {
            section: self.current,
            header,
            ambiguous,
        }
    }
}

/// Returns the section a header line opens, or `None` for non-header lines.
pub fn detect_header(line: &str) -> Option<Section> {
    if !line.contains(':') {
        return None;
    }

    if HISTORY_HEADER.is_match(line) {
        Some(Section::History)
    } else if DISCHARGE_MEDS.is_match(line) && DISCHARGE_QUALIFIER.is_match(line) {
        Some(Section::DischargeMedications)
    } else if ADMISSION_MEDS.is_match(line) && ADMISSION_QUALIFIER.is_match(line) {
        Some(Section::AdmissionMedications)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_headers() {
        assert_eq!(detect_header("Past Medical History:"), Some(Section::History));
        assert_eq!(detect_header("PMH/Med Hist:"), Some(Section::History));
        assert_eq!(
            detect_header("Discharge Medications:"),
            Some(Section::DischargeMedications)
        );
        assert_eq!(
            detect_header("Disch Meds:"),
            Some(Section::DischargeMedications)
        );
        assert_eq!(
            detect_header("Medications on Admission:"),
            Some(Section::AdmissionMedications)
        );
        assert_eq!(
            detect_header("Home medications:"),
            Some(Section::AdmissionMedications)
        );
        assert_eq!(
            detect_header("Pre-op meds:"),
            Some(Section::AdmissionMedications)
        );
        assert_eq!(
            detect_header("* medications:"),
            Some(Section::AdmissionMedications)
        );
        assert_eq!(detect_header("Allergies:"), None);
        assert_eq!(detect_header("Medications on Admission"), None);
    }

    #[test]
    fn test_singular_discharge_medication_is_not_a_header() {
        assert_eq!(detect_header("Discharge Medication:"), None);
        assert_eq!(
            detect_header("Discharge Medications:"),
            Some(Section::DischargeMedications)
        );
    }

    #[test]
    fn test_history_wins_over_admission_qualifier() {
        assert_eq!(
            detect_header("Home meds / Past Medical History:"),
            Some(Section::History)
        );
        assert_eq!(
            detect_header("Past medical history on admission medications:"),
            Some(Section::History)
        );
    }

    #[test]
    fn test_discharge_wins_over_admission() {
        assert_eq!(
            detect_header("Home medications on discharge:"),
            Some(Section::DischargeMedications)
        );
    }

    #[test]
    fn test_lines_without_colon_keep_section() {
        let mut classifier = SectionClassifier::new();
        classifier.classify_line("Admission Medications:");

        for line in [
            "Past Medical History",
            "Discharge Medications",
            "aspirin 81 mg",
            "",
            "   ",
        ] {
            let class = classifier.classify_line(line);
            assert_eq!(class.section, Section::AdmissionMedications);
            assert_eq!(class.header, None);
        }
    }

    #[test]
    fn test_unrecognized_colon_line_keeps_section() {
        let mut classifier = SectionClassifier::new();
        classifier.classify_line("Past Medical History:");
        let class = classifier.classify_line("Social History: lives alone");
        assert_eq!(class.section, Section::History);
        assert_eq!(class.header, None);
    }

    #[test]
    fn test_new_header_overrides_and_tracks_previous() {
        let mut classifier = SectionClassifier::new();
        assert_eq!(classifier.current(), Section::None);

        classifier.classify_line("Past Medical History:");
        classifier.classify_line("Medications on Admission:");
        assert_eq!(classifier.current(), Section::AdmissionMedications);
        assert_eq!(classifier.previous(), Section::History);

        classifier.classify_line("Discharge Medications:");
        assert_eq!(classifier.current(), Section::DischargeMedications);
        assert_eq!(classifier.previous(), Section::AdmissionMedications);
    }

    #[test]
    fn test_ambiguous_lines_are_flagged() {
        let mut classifier = SectionClassifier::new();
        let class = classifier.classify_line("Medications were reviewed prior to transfer");
        assert!(class.ambiguous);
        assert_eq!(class.section, Section::None);

        let header = classifier.classify_line("Medications on Admission:");
        assert!(!header.ambiguous);

        let inside = classifier.classify_line("meds held until discharge");
        assert!(inside.ambiguous);
        assert_eq!(inside.section, Section::AdmissionMedications);

        assert!(!classifier.classify_line("aspirin 81 mg").ambiguous);
    }
}
