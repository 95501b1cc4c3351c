//! Chronic-disease detection in history-section lines.

use std::sync::LazyLock;

use regex::Regex;
use statin_types::HistoryFlags;

static KIDNEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chronic kidney|chronic renal").unwrap());

static LIVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)liver failure|hepatic failure|cirrhosis|fatty liver|liver disease|hepatitis",
    )
    .unwrap()
});

static HEART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)heart disease|coronary artery|coronary disease|atherosclerotic|peripheral artery disease|peripheral vascular|carotid disease|carotid artery disease|myocardial infarction|heart attack|angina pectoris|pvd",
    )
    .unwrap()
});

static HYPERTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)hypertension").unwrap());

static DIABETES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)diabetes").unwrap());

/// Returns the disease flags mentioned on one line.
///
/// ```
/// use statin_loader::history::scan_line;
///
/// let flags = scan_line("HTN (hypertension), chronic kidney disease stage 3");
/// assert!(flags.hypertension && flags.kidney);
/// assert!(!flags.diabetes);
/// ```
pub fn scan_line(line: &str) -> HistoryFlags {
    HistoryFlags {
        kidney: KIDNEY.is_match(line),
        liver: LIVER.is_match(line),
        heart: HEART.is_match(line),
        hypertension: HYPERTENSION.is_match(line),
        diabetes: DIABETES.is_match(line),
    }
}
