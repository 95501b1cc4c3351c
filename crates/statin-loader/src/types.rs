//! Loader-specific types: errors, configuration and input file sets.

use std::path::{Path, PathBuf};

use statin_types::DrugGroupKind;
use thiserror::Error;

/// Errors that can occur while loading vocabularies or reading notes.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O error reading an input file.
    #[error("IO error reading input: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Vocabulary line with no generic name before the first separator.
    #[error("Malformed vocabulary line {line_number} in {source_name}: '{line}'")]
    MalformedVocabularyLine {
        /// The vocabulary source (file path or group name).
        source_name: String,
        /// 1-based line number.
        line_number: usize,
        /// The offending line.
        line: String,
    },

    /// Alias alternation that does not compile as a regular expression.
    #[error("Invalid pattern for '{generic}': {message}")]
    InvalidPattern {
        /// The generic name owning the pattern.
        generic: String,
        /// The regex compiler's message.
        message: String,
    },

    /// Note row without a required column value.
    #[error("Note row {row} is missing field '{field}'")]
    MissingField {
        /// 1-based data row number within the file.
        row: usize,
        /// The missing column.
        field: &'static str,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required vocabulary file missing from the drug list directory.
    #[error("Required drug list not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The files that were missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Configuration for a note-processing run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Only process notes whose category is a discharge summary.
    pub discharge_only: bool,
    /// Log progress every this many note files (0 disables).
    pub progress_interval: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            discharge_only: true,
            progress_interval: 100,
        }
    }
}

/// The three vocabulary files, one per drug group.
#[derive(Debug, Clone, Default)]
pub struct DrugListFiles {
    /// Path to the statin alias list.
    pub statins: Option<PathBuf>,
    /// Path to the statin alternatives alias list.
    pub statin_alts: Option<PathBuf>,
    /// Path to the suppress alias list.
    pub suppress: Option<PathBuf>,
    /// Directory the files were resolved in.
    pub directory: PathBuf,
}

impl DrugListFiles {
    /// Resolves the default file names inside `dir`.
    ///
    /// Files that do not exist are left as `None`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let resolve = |kind: DrugGroupKind| {
            let path = dir.join(kind.file_name());
            path.is_file().then_some(path)
        };

        Self {
            statins: resolve(DrugGroupKind::Statins),
            statin_alts: resolve(DrugGroupKind::StatinAlternatives),
            suppress: resolve(DrugGroupKind::Suppress),
            directory: dir.to_path_buf(),
        }
    }

    /// Returns the path for a group.
    pub fn path_for(&self, kind: DrugGroupKind) -> Option<&Path> {
        match kind {
            DrugGroupKind::Statins => self.statins.as_deref(),
            DrugGroupKind::StatinAlternatives => self.statin_alts.as_deref(),
            DrugGroupKind::Suppress => self.suppress.as_deref(),
        }
    }

    /// Returns true if all three lists are present.
    pub fn has_required_files(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Returns the file names of missing lists.
    pub fn missing_files(&self) -> Vec<&'static str> {
        DrugGroupKind::ALL
            .iter()
            .filter(|kind| self.path_for(**kind).is_none())
            .map(|kind| kind.file_name())
            .collect()
    }

    /// Errors with [`ExtractError::RequiredFileMissing`] unless all lists are present.
    pub fn require_all(&self) -> ExtractResult<()> {
        if self.has_required_files() {
            return Ok(());
        }
        Err(ExtractError::RequiredFileMissing {
            file_type: self.missing_files().join(", "),
            directory: self.directory.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert!(config.discharge_only);
        assert_eq!(config.progress_interval, 100);
    }

    #[test]
    fn test_drug_list_files_missing() {
        let files = DrugListFiles {
            statins: Some(PathBuf::from("statin_list.txt")),
            statin_alts: None,
            suppress: None,
            directory: PathBuf::from("lists"),
        };

        assert!(!files.has_required_files());
        let missing = files.missing_files();
        assert_eq!(missing, vec!["statin_alts.txt", "suppress_list.txt"]);

        let err = files.require_all().unwrap_err();
        assert!(err.to_string().contains("statin_alts.txt, suppress_list.txt"));
    }

    #[test]
    fn test_in_dir_resolves_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("statin_list.txt"), "atorvastatin|lipitor\n").unwrap();
        std::fs::write(dir.path().join("suppress_list.txt"), "warfarin\n").unwrap();

        let files = DrugListFiles::in_dir(dir.path());
        assert!(files.statins.is_some());
        assert!(files.statin_alts.is_none());
        assert!(files.suppress.is_some());
        assert_eq!(files.missing_files(), vec!["statin_alts.txt"]);
    }
}
