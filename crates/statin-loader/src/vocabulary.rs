//! Drug vocabulary builder.
//!
//! Turns `generic|alias1|alias2` alias lists, one per drug group, into a
//! flat positional term index with contiguous group ranges, and compiles one
//! mention query per distinct generic.
//!
//! ```
//! use statin_loader::VocabularyBuilder;
//! use statin_types::DrugGroupKind;
//!
//! let mut builder = VocabularyBuilder::new();
//! builder.add_group(DrugGroupKind::Statins, "statins", "atorvastatin|lipitor\nsimvastatin|zocor\n".as_bytes())?;
//! builder.add_group(DrugGroupKind::StatinAlternatives, "alts", "ezetimibe|zetia\n".as_bytes())?;
//! builder.add_group(DrugGroupKind::Suppress, "suppress", "".as_bytes())?;
//! let vocab = builder.build()?;
//!
//! assert_eq!(vocab.generics(), vec!["atorvastatin", "simvastatin", "ezetimibe"]);
//! assert_eq!(vocab.group_range(DrugGroupKind::StatinAlternatives), Some(2..3));
//! assert_eq!(vocab.pattern_for("atorvastatin"), Some("atorvastatin|lipitor"));
//! # Ok::<(), statin_loader::ExtractError>(())
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;

use regex::Regex;
use statin_types::DrugGroupKind;

use crate::mention::mention_query;
use crate::types::{DrugListFiles, ExtractError, ExtractResult};

/// One flat vocabulary position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugTerm {
    /// Lowercase canonical name.
    pub generic: String,
    /// Alternation of the generic and its aliases.
    pub pattern: String,
    /// Flat index, unique across all groups.
    pub index: usize,
    /// The group this position belongs to.
    pub group: DrugGroupKind,
}

/// A group and its half-open range within the flat index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugGroup {
    /// Group role.
    pub kind: DrugGroupKind,
    /// Flat index range `start..end`.
    pub range: Range<usize>,
}

impl DrugGroup {
    /// Number of flat positions in this group.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns true if the group has no terms.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A compiled search for one distinct generic of one group.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    /// Generic name.
    pub generic: String,
    /// Flat index the result is written to.
    pub slot: usize,
    /// Compiled mention query (drug alternation plus optional dose).
    pub query: Regex,
}

/// The loaded vocabulary: flat terms, group ranges and compiled searches.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<DrugTerm>,
    groups: Vec<DrugGroup>,
    search: Vec<SearchTerm>,
}

impl Vocabulary {
    /// Loads the three alias files.
    ///
    /// # Errors
    /// Fails if any file is missing, unreadable, or contains a malformed line.
    pub fn load(files: &DrugListFiles) -> ExtractResult<Self> {
        files.require_all()?;

        let mut builder = VocabularyBuilder::new();
        for kind in DrugGroupKind::ALL {
            let path = files
                .path_for(kind)
                .ok_or_else(|| ExtractError::FileNotFound {
                    path: files.directory.join(kind.file_name()).display().to_string(),
                })?;
            let reader = BufReader::new(File::open(path)?);
            let count = builder.add_group(kind, &path.display().to_string(), reader)?;
            tracing::debug!("Loaded {} {} from {}", count, kind, path.display());
        }

        builder.build()
    }

    /// Total number of flat positions.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no terms were loaded.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All flat positions in load order.
    pub fn terms(&self) -> &[DrugTerm] {
        &self.terms
    }

    /// Generic names in flat order.
    pub fn generics(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.generic.as_str()).collect()
    }

    /// Groups in load order.
    pub fn groups(&self) -> &[DrugGroup] {
        &self.groups
    }

    /// Flat range of a group, if it was loaded.
    pub fn group_range(&self, kind: DrugGroupKind) -> Option<Range<usize>> {
        self.groups
            .iter()
            .find(|g| g.kind == kind)
            .map(|g| g.range.clone())
    }

    /// Alternation pattern for a generic (the last loaded definition wins).
    pub fn pattern_for(&self, generic: &str) -> Option<&str> {
        self.terms
            .iter()
            .rev()
            .find(|t| t.generic == generic)
            .map(|t| t.pattern.as_str())
    }

    /// Compiled searches in evaluation order.
    pub fn search_terms(&self) -> &[SearchTerm] {
        &self.search
    }
}

/// Accumulates groups in load order and builds a [`Vocabulary`].
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    groups: Vec<(DrugGroupKind, Vec<(String, String)>)>,
}

impl VocabularyBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one alias list and appends it as the next group.
    ///
    /// Returns the number of lines accepted.
    pub fn add_group<R: BufRead>(
        &mut self,
        kind: DrugGroupKind,
        source_name: &str,
        reader: R,
    ) -> ExtractResult<usize> {
        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = parse_alias_line(&line, source_name, i + 1)? {
                entries.push(entry);
            }
        }

        let count = entries.len();
        self.groups.push((kind, entries));
        Ok(count)
    }

    /// Assigns flat indices and compiles the mention queries.
    pub fn build(self) -> ExtractResult<Vocabulary> {
        let mut terms = Vec::new();
        let mut groups = Vec::with_capacity(self.groups.len());

        for (kind, entries) in &self.groups {
            let start = terms.len();
            for (generic, pattern) in entries {
                terms.push(DrugTerm {
                    generic: generic.clone(),
                    pattern: pattern.clone(),
                    index: terms.len(),
                    group: *kind,
                });
            }
            groups.push(DrugGroup {
                kind: *kind,
                range: start..terms.len(),
            });
        }

        // Every occurrence of a generic writes to its last flat position.
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for term in &terms {
            if let Some(previous) = slots.insert(term.generic.as_str(), term.index) {
                tracing::warn!(
                    "Generic '{}' appears at flat index {} and {}; results go to index {}",
                    term.generic,
                    previous,
                    term.index,
                    term.index
                );
            }
        }

        let mut search = Vec::new();
        for group in &groups {
            // Per group: one search per generic, at its first position, with its last pattern.
            let mut order: Vec<&str> = Vec::new();
            let mut patterns: HashMap<&str, &str> = HashMap::new();
            for term in &terms[group.range.clone()] {
                if patterns
                    .insert(term.generic.as_str(), term.pattern.as_str())
                    .is_none()
                {
                    order.push(term.generic.as_str());
                }
            }

            for generic in order {
                let pattern = patterns[generic];
                let query =
                    Regex::new(&mention_query(pattern)).map_err(|e| ExtractError::InvalidPattern {
                        generic: generic.to_string(),
                        message: e.to_string(),
                    })?;
                search.push(SearchTerm {
                    generic: generic.to_string(),
                    slot: slots[generic],
                    query,
                });
            }
        }

        Ok(Vocabulary {
            terms,
            groups,
            search,
        })
    }
}

/// Parses `generic|alias1|alias2` into `(generic, alternation)`.
///
/// Blank lines yield `None`; a line with an empty generic is an error.
fn parse_alias_line(
    line: &str,
    source_name: &str,
    line_number: usize,
) -> ExtractResult<Option<(String, String)>> {
    let lowered = line.trim().to_lowercase();
    if lowered.is_empty() {
        return Ok(None);
    }

    let mut names = lowered.split('|').map(str::trim);
    let generic = names.next().unwrap_or("");
    if generic.is_empty() {
        return Err(ExtractError::MalformedVocabularyLine {
            source_name: source_name.to_string(),
            line_number,
            line: line.to_string(),
        });
    }

    let mut alternatives = vec![generic];
    alternatives.extend(names.filter(|alias| !alias.is_empty()));

    Ok(Some((generic.to_string(), alternatives.join("|"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lists: [&str; 3]) -> ExtractResult<Vocabulary> {
        let mut builder = VocabularyBuilder::new();
        for (kind, text) in DrugGroupKind::ALL.into_iter().zip(lists) {
            builder.add_group(kind, &kind.to_string(), text.as_bytes())?;
        }
        builder.build()
    }

    #[test]
    fn test_group_ranges_are_contiguous() {
        let vocab = build([
            "atorvastatin|lipitor\nsimvastatin|zocor\nrosuvastatin|crestor\n",
            "ezetimibe|zetia\n",
            "warfarin|coumadin\namiodarone\n",
        ])
        .unwrap();

        let mut rebuilt = Vec::new();
        let mut expected_start = 0;
        for group in vocab.groups() {
            assert_eq!(group.range.start, expected_start);
            expected_start = group.range.end;
            rebuilt.extend(vocab.terms()[group.range.clone()].iter().map(|t| t.generic.clone()));
        }

        assert_eq!(expected_start, vocab.len());
        assert_eq!(rebuilt, vocab.generics());
        assert_eq!(vocab.group_range(DrugGroupKind::Statins), Some(0..3));
        assert_eq!(vocab.group_range(DrugGroupKind::Suppress), Some(4..6));
        for (i, term) in vocab.terms().iter().enumerate() {
            assert_eq!(term.index, i);
        }
    }

    #[test]
    fn test_lines_are_lowercased_and_blank_lines_skipped() {
        let vocab = build(["Atorvastatin|LIPITOR\n\n   \n", "", ""]).unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.pattern_for("atorvastatin"), Some("atorvastatin|lipitor"));
    }

    #[test]
    fn test_empty_aliases_are_dropped() {
        let vocab = build(["atorvastatin||lipitor|\r\n", "", ""]).unwrap();
        assert_eq!(vocab.pattern_for("atorvastatin"), Some("atorvastatin|lipitor"));
    }

    #[test]
    fn test_missing_generic_is_rejected() {
        let err = build(["atorvastatin\n|lipitor\n", "", ""]).unwrap_err();
        match err {
            ExtractError::MalformedVocabularyLine { line_number, .. } => {
                assert_eq!(line_number, 2)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = build(["atorvastatin|lip(itor\n", "", ""]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn test_duplicate_generic_uses_last_slot() {
        let vocab = build(["atorvastatin\nniacin\n", "niacin|niaspan\n", ""]).unwrap();

        // Both positions exist; contiguity is unaffected.
        assert_eq!(vocab.generics(), vec!["atorvastatin", "niacin", "niacin"]);
        let slots: Vec<_> = vocab
            .search_terms()
            .iter()
            .filter(|s| s.generic == "niacin")
            .map(|s| s.slot)
            .collect();
        assert_eq!(slots, vec![2, 2]);
        assert_eq!(vocab.pattern_for("niacin"), Some("niacin|niaspan"));
    }

    #[test]
    fn test_duplicate_within_group_searched_once_with_last_pattern() {
        let vocab = build(["lovastatin|mevacor\natorvastatin\nlovastatin|altoprev\n", "", ""]).unwrap();

        let generics: Vec<_> = vocab.search_terms().iter().map(|s| s.generic.as_str()).collect();
        assert_eq!(generics, vec!["lovastatin", "atorvastatin"]);
        assert!(vocab.search_terms()[0].query.is_match("altoprev 20"));
        assert!(!vocab.search_terms()[0].query.is_match("mevacor 20"));
        assert_eq!(vocab.search_terms()[0].slot, 2);
    }

    #[test]
    fn test_load_requires_all_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("statin_list.txt"), "atorvastatin|lipitor\n").unwrap();

        let files = DrugListFiles::in_dir(dir.path());
        let err = Vocabulary::load(&files).unwrap_err();
        assert!(matches!(err, ExtractError::RequiredFileMissing { .. }));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("statin_list.txt"), "atorvastatin|lipitor\n").unwrap();
        std::fs::write(dir.path().join("statin_alts.txt"), "ezetimibe|zetia\n").unwrap();
        std::fs::write(dir.path().join("suppress_list.txt"), "warfarin\n").unwrap();

        let vocab = Vocabulary::load(&DrugListFiles::in_dir(dir.path())).unwrap();
        assert_eq!(vocab.generics(), vec!["atorvastatin", "ezetimibe", "warfarin"]);
        assert_eq!(vocab.groups().len(), 3);
    }
}
