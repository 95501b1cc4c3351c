//! Summary CSV rendering.

use std::io::Write;

use csv::{Writer, WriterBuilder};
use statin_loader::Vocabulary;
use statin_types::{DrugGroupKind, NoteRecord};

/// Fixed leading columns of the summary file.
const FIXED_COLUMNS: &[&str] = &[
    "ROW_ID",
    "HADM_ID",
    "SUBJECT_ID",
    "CHARTDATE",
    "CHARTTIME",
    "HIST_FOUND",
    "KIDNEY",
    "LIVER",
    "HEART",
    "HYPERTENSION",
    "DIABETES",
    "ADMIT_FOUND",
];

/// Full header: fixed columns, one membership column per group, one column per term.
pub fn summary_header(vocab: &Vocabulary) -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(vocab.groups().iter().map(|g| g.kind.column_name().to_string()))
        .chain(vocab.terms().iter().map(|t| t.generic.clone()))
        .collect()
}

fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

/// Writes kept records as summary CSV rows.
pub struct SummaryWriter<W: Write> {
    writer: Writer<W>,
    columns: usize,
    rows_written: usize,
}

impl<W: Write> SummaryWriter<W> {
    /// Creates a writer and emits the header row.
    pub fn new(inner: W, vocab: &Vocabulary) -> csv::Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        let header = summary_header(vocab);
        writer.write_record(&header)?;

        Ok(Self {
            writer,
            columns: header.len(),
            rows_written: 0,
        })
    }

    /// Writes one record.
    pub fn write_record(&mut self, record: &NoteRecord) -> csv::Result<()> {
        let mut row = Vec::with_capacity(self.columns);
        row.push(record.row_id.clone());
        row.push(record.hadm_id.clone());
        row.push(record.subject_id.clone());
        row.push(record.chartdate.clone());
        row.push(record.charttime.clone());
        row.push(flag(record.hist_found));
        row.extend(record.history.as_array().into_iter().map(flag));
        row.push(flag(record.admit_found));
        row.extend(DrugGroupKind::ALL.iter().map(|k| record.membership_of(*k).to_string()));
        row.extend(record.doses.iter().map(|d| d.to_string()));

        self.writer.write_record(&row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of records written (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> csv::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
