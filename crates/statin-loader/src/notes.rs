//! Note file reader.
//!
//! Provides a streaming reader for comma-separated note exports with a
//! header row. Columns are looked up by name; only `category` and `text`
//! are required, identifiers and timestamps are carried through as text.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use csv::{Reader, ReaderBuilder, StringRecord};
use regex::Regex;
use serde::Deserialize;

use crate::types::{ExtractError, ExtractResult};

static DISCHARGE_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)discharge.*summary").unwrap());

const REQUIRED_COLUMNS: [&str; 2] = ["category", "text"];

/// Row as it appears in the file; every column is optional here.
#[derive(Debug, Deserialize)]
struct RawNoteRow {
    #[serde(default, alias = "ROW_ID")]
    row_id: Option<String>,
    #[serde(default, alias = "HADM_ID")]
    hadm_id: Option<String>,
    #[serde(default, alias = "SUBJECT_ID")]
    subject_id: Option<String>,
    #[serde(default, alias = "CHARTDATE")]
    chartdate: Option<String>,
    #[serde(default, alias = "CHARTTIME")]
    charttime: Option<String>,
    #[serde(default, alias = "CATEGORY")]
    category: Option<String>,
    #[serde(default, alias = "TEXT")]
    text: Option<String>,
}

/// One note with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteRow {
    /// Note row identifier.
    pub row_id: String,
    /// Hospital admission identifier.
    pub hadm_id: String,
    /// Patient identifier.
    pub subject_id: String,
    /// Chart date.
    pub chartdate: String,
    /// Chart time.
    pub charttime: String,
    /// Note category label.
    pub category: String,
    /// Free text.
    pub text: String,
}

impl NoteRow {
    /// Returns true if the category names a discharge summary.
    pub fn is_discharge_summary(&self) -> bool {
        DISCHARGE_SUMMARY.is_match(&self.category)
    }

    // An empty field is an empty string; only an absent column is an error.
    fn from_raw(raw: RawNoteRow) -> Self {
        Self {
            row_id: raw.row_id.unwrap_or_default(),
            hadm_id: raw.hadm_id.unwrap_or_default(),
            subject_id: raw.subject_id.unwrap_or_default(),
            chartdate: raw.chartdate.unwrap_or_default(),
            charttime: raw.charttime.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            text: raw.text.unwrap_or_default(),
        }
    }
}

/// A streaming reader over the rows of one note file.
///
/// When the header has no `category` or `text` column, every row is yielded
/// as [`ExtractError::MissingField`] so the caller can skip it and go on.
/// Empty values in a present column are read as empty strings.
pub struct NoteReader<R: Read> {
    reader: Reader<R>,
    headers: StringRecord,
    missing_column: Option<&'static str>,
    rows_read: usize,
}

impl NoteReader<BufReader<File>> {
    /// Opens a note file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header row is unreadable.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> NoteReader<R> {
    /// Creates a reader over any byte source.
    pub fn from_reader(reader: R) -> ExtractResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        // Handle UTF-8 BOM at start of file
        let mut headers = csv_reader.headers()?.clone();
        if let Some(first) = headers.get(0) {
            if first.starts_with('\u{feff}') {
                let cleaned: Vec<String> = headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| {
                        if i == 0 {
                            h.trim_start_matches('\u{feff}').to_string()
                        } else {
                            h.to_string()
                        }
                    })
                    .collect();
                headers = StringRecord::from(cleaned);
            }
        }

        let missing_column = REQUIRED_COLUMNS
            .into_iter()
            .find(|name| !headers.iter().any(|h| h.eq_ignore_ascii_case(name)));

        Ok(Self {
            reader: csv_reader,
            headers,
            missing_column,
            rows_read: 0,
        })
    }

    /// Returns the number of data rows read so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl<R: Read> Iterator for NoteReader<R> {
    type Item = ExtractResult<NoteRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                self.rows_read += 1;
                if let Some(field) = self.missing_column {
                    return Some(Err(ExtractError::MissingField {
                        row: self.rows_read,
                        field,
                    }));
                }
                Some(
                    record
                        .deserialize::<RawNoteRow>(Some(&self.headers))
                        .map(NoteRow::from_raw)
                        .map_err(ExtractError::from),
                )
            }
            Ok(false) => None, // End of file
            Err(e) => Some(Err(e.into())),
        }
    }
}
