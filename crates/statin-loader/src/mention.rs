//! Drug mention extraction for admission-medication lines.
//!
//! Each vocabulary search is tried against the line; a hit records the first
//! number following the mention as the dose, or the unknown-dose sentinel
//! when no number follows. Results overwrite whatever an earlier line wrote
//! for the same slot, so the last matching line of a note wins.

use std::sync::LazyLock;

use regex::Regex;
use statin_types::DoseValue;

use crate::vocabulary::Vocabulary;

/// Lines naming a topical or ocular route are ignored entirely.
static LOCAL_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ointment|cream|topical|creme|external|eye|ocular").unwrap()
});

/// Builds the mention query for an alias alternation.
///
/// The `drug` group matches the alternation; the optional `dose` group lazily
/// skips ahead to the first integer or decimal number on the line.
pub(crate) fn mention_query(pattern: &str) -> String {
    format!(r"(?i)(?P<drug>{pattern})(?:.*?(?P<dose>([0-9]*[.])?[0-9]+))?")
}

/// Scans admission-medication lines for vocabulary mentions.
#[derive(Debug, Clone, Copy)]
pub struct MentionExtractor<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> MentionExtractor<'v> {
    /// Creates an extractor over a loaded vocabulary.
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }

    /// Returns true if the line names a local route and must be skipped.
    pub fn is_local_route(line: &str) -> bool {
        LOCAL_ROUTE.is_match(line)
    }

    /// Applies one line to the dose vector.
    ///
    /// `doses` must have one entry per flat vocabulary index. Returns the
    /// number of searches that matched.
    pub fn scan_line(&self, line: &str, doses: &mut [DoseValue]) -> usize {
        if Self::is_local_route(line) {
            return 0;
        }

        let mut hits = 0;
        for term in self.vocab.search_terms() {
            let Some(caps) = term.query.captures(line) else {
                continue;
            };
            let value = match caps.name("dose") {
                Some(dose) => DoseValue::from_parsed(dose.as_str()),
                None => DoseValue::Unknown,
            };
            if let Some(slot) = doses.get_mut(term.slot) {
                *slot = value;
                hits += 1;
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::VocabularyBuilder;
    use statin_types::DrugGroupKind;

    fn vocab(statins: &str, alts: &str) -> Vocabulary {
        let mut builder = VocabularyBuilder::new();
        builder
            .add_group(DrugGroupKind::Statins, "statins", statins.as_bytes())
            .unwrap();
        builder
            .add_group(DrugGroupKind::StatinAlternatives, "alts", alts.as_bytes())
            .unwrap();
        builder
            .add_group(DrugGroupKind::Suppress, "suppress", "".as_bytes())
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_dose_follows_mention() {
        let vocab = vocab("atorvastatin|lipitor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        assert_eq!(extractor.scan_line("1. Atorvastatin 20mg daily", &mut doses), 1);
        assert_eq!(doses[0], DoseValue::Dose(20.0));
    }

    #[test]
    fn test_number_before_mention_is_not_a_dose() {
        let vocab = vocab("atorvastatin|lipitor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        extractor.scan_line("3. Lipitor at bedtime", &mut doses);
        assert_eq!(doses[0], DoseValue::Unknown);
    }

    #[test]
    fn test_decimal_dose() {
        let vocab = vocab("rosuvastatin|crestor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        extractor.scan_line("crestor 2.5 mg qhs", &mut doses);
        assert_eq!(doses[0], DoseValue::Dose(2.5));

        extractor.scan_line("crestor .5 mg qhs", &mut doses);
        assert_eq!(doses[0], DoseValue::Dose(0.5));
    }

    #[test]
    fn test_no_dose_yields_sentinel() {
        let vocab = vocab("atorvastatin|lipitor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        extractor.scan_line("Patient takes lipitor", &mut doses);
        assert_eq!(doses[0], DoseValue::Unknown);
        assert_eq!(doses[0].as_f64(), 9999.0);
    }

    #[test]
    fn test_last_line_wins() {
        let vocab = vocab("simvastatin|zocor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        extractor.scan_line("simvastatin 10 mg", &mut doses);
        extractor.scan_line("zocor 20 mg", &mut doses);
        assert_eq!(doses[0], DoseValue::Dose(20.0));

        extractor.scan_line("zocor daily", &mut doses);
        assert_eq!(doses[0], DoseValue::Unknown);
    }

    #[test]
    fn test_local_route_line_is_skipped() {
        let vocab = vocab("atorvastatin|lipitor\n", "");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        let hits = extractor.scan_line("Atorvastatin cream 40 applied topically", &mut doses);
        assert_eq!(hits, 0);
        assert_eq!(doses[0], DoseValue::NotMentioned);
    }

    #[test]
    fn test_several_generics_on_one_line() {
        let vocab = vocab("atorvastatin|lipitor\n", "ezetimibe|zetia\n");
        let extractor = MentionExtractor::new(&vocab);
        let mut doses = vec![DoseValue::NotMentioned; vocab.len()];

        // Each search takes the first number after its own mention.
        let hits = extractor.scan_line("vytorin (zetia 10 / lipitor 40)", &mut doses);
        assert_eq!(hits, 2);
        assert_eq!(doses[0], DoseValue::Dose(40.0));
        assert_eq!(doses[1], DoseValue::Dose(10.0));
    }

    #[test]
    fn test_mention_query_shape() {
        let re = Regex::new(&mention_query("atorvastatin|lipitor")).unwrap();
        let caps = re.captures("LIPITOR tablet 80").unwrap();
        assert_eq!(&caps["drug"], "LIPITOR");
        assert_eq!(&caps["dose"], "80");
    }
}
