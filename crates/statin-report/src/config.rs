//! Run configuration from environment variables.

use std::path::PathBuf;

const DEFAULT_NOTES_PATH: &str = "notes";
const DEFAULT_DRUGS_LIST_PATH: &str = ".";
const DEFAULT_SUMMARY_FILE: &str = "notes_output_full.csv";
const DEFAULT_SQL_FILE: &str = "notes_output.sql";

/// Input and output locations for a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory holding the note files (`NOTES_PATH`).
    pub notes_path: PathBuf,
    /// Directory holding the three drug lists (`DRUGS_LIST_PATH`).
    pub drugs_list_path: PathBuf,
    /// Summary CSV output (`SUMMARY_FILE`).
    pub summary_file: PathBuf,
    /// SQL schema output (`SQL_FILE`).
    pub sql_file: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_PATH),
            drugs_list_path: PathBuf::from(DEFAULT_DRUGS_LIST_PATH),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
            sql_file: PathBuf::from(DEFAULT_SQL_FILE),
        }
    }
}

impl ReportConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            notes_path: path("NOTES_PATH", defaults.notes_path),
            drugs_list_path: path("DRUGS_LIST_PATH", defaults.drugs_list_path),
            summary_file: path("SUMMARY_FILE", defaults.summary_file),
            sql_file: path("SQL_FILE", defaults.sql_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_lookup(|_| None);
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.summary_file, PathBuf::from("notes_output_full.csv"));
    }

    #[test]
    fn test_overrides() {
        let config = ReportConfig::from_lookup(|key| match key {
            "NOTES_PATH" => Some("/data/notes".to_string()),
            "SQL_FILE" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.notes_path, PathBuf::from("/data/notes"));
        assert_eq!(config.sql_file, PathBuf::from("notes_output.sql"));
    }
}
