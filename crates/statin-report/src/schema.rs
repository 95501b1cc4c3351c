//! SQL table definition matching the summary CSV.

use std::fmt::Write;

use statin_loader::Vocabulary;

const TABLE_NAME: &str = "statins_all";
const SEARCH_PATH: &str = "mimiciii";

/// Integer columns following the identifiers and timestamps.
const FLAG_COLUMNS: &[&str] = &[
    "hist_found",
    "kidney",
    "liver",
    "heart",
    "hypertension",
    "diabetes",
    "admit_found",
];

/// Double-quotes a column name taken from a drug list.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders the `CREATE TABLE` statement for the summary file.
pub fn render_schema(vocab: &Vocabulary) -> String {
    let mut columns = vec![
        "row_id integer NOT NULL".to_string(),
        "hadm_id integer NOT NULL".to_string(),
        "subject_id integer NOT NULL".to_string(),
        "chartdate timestamp(0) without time zone".to_string(),
        "charttime timestamp(0) without time zone".to_string(),
    ];
    columns.extend(FLAG_COLUMNS.iter().map(|c| format!("{c} integer")));
    columns.extend(
        vocab
            .groups()
            .iter()
            .map(|g| format!("{} integer", g.kind.column_name().to_lowercase())),
    );
    columns.extend(
        vocab
            .terms()
            .iter()
            .map(|t| format!("{} integer", quote_identifier(&t.generic))),
    );
    columns.push(format!("CONSTRAINT {TABLE_NAME}_pk PRIMARY KEY (row_id)"));

    let mut sql = String::new();
    let _ = writeln!(sql, "SET search_path TO {SEARCH_PATH};");
    let _ = writeln!(sql, "CREATE TABLE {TABLE_NAME}\n(");
    let _ = writeln!(sql, "  {}", columns.join(",\n  "));
    sql.push_str(");\n");
    sql
}
