//! Statin exposure report binary.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use statin_loader::{
    discover_note_files, DrugListFiles, ExtractConfig, ExtractError, Pipeline, Vocabulary,
};
use statin_report::{render_schema, ReportConfig, SummaryWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ReportConfig::from_env();
    tracing::info!("Using ALL notes from {}", config.notes_path.display());
    tracing::info!("Using drugs from {}", config.drugs_list_path.display());

    // The run cannot proceed without its vocabulary
    let files = DrugListFiles::in_dir(&config.drugs_list_path);
    let vocab = Vocabulary::load(&files)?;
    for group in vocab.groups() {
        tracing::info!(
            "{}: {} terms at [{}, {})",
            group.kind,
            group.len(),
            group.range.start,
            group.range.end
        );
        tracing::debug!("{:?}", &vocab.generics()[group.range.clone()]);
    }

    let note_files = discover_note_files(&config.notes_path)?;
    tracing::info!("Discovered {} note files", note_files.len());

    let output = BufWriter::new(File::create(&config.summary_file)?);
    let mut writer = SummaryWriter::new(output, &vocab)?;

    let pipeline = Pipeline::new(&vocab, ExtractConfig::default());
    let summary = pipeline.run(&note_files, |record| {
        writer.write_record(record).map_err(ExtractError::from)
    })?;
    let rows_written = writer.rows_written();
    writer.into_inner()?.flush()?;

    let seconds = summary.elapsed_ms as f64 / 1000.0;
    tracing::info!(
        "Done analyzing {} documents in {:.2} seconds ({:.2} docs/sec)",
        summary.files_processed,
        seconds,
        summary.files_per_second()
    );
    tracing::info!(
        "Summary file is in {} ({} rows)",
        config.summary_file.display(),
        rows_written
    );
    tracing::info!(
        "Records Kept: {}, Excluded: {}, Skipped: {}",
        summary.records_kept,
        summary.records_excluded,
        summary.notes_skipped
    );
    tracing::info!(
        "On Statins: {}, On Statins and Alts: {}, On Statins and Supps: {}, On Alts only: {}, On suppress only {}",
        summary.on_statins,
        summary.statins_and_alts,
        summary.statins_and_suppress,
        summary.alts_only,
        summary.suppress_only
    );

    fs::write(&config.sql_file, render_schema(&vocab))?;
    tracing::info!("SQL schema written to {}", config.sql_file.display());

    Ok(())
}
