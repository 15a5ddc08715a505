//! Pipeline run with explicit stages.
//!
//! 1. **Fetch**: refresh the raw files from their URLs (best-effort)
//! 2. **Ingest**: read the required raw columns of both files
//! 3. **Select**: filter and deduplicate chronic indicators
//! 4. **Map**: attach causes to topics, drop incomplete rows
//! 5. **Normalize**: restrict mortality rows to mapped causes
//! 6. **Merge**: join, validate, project and sort
//! 7. **Output**: replace the SQLite table and the CSV export
//!
//! Each stage runs inside its own `info_span` and reports row counts.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use health_ingest::{FetchOptions, FetchOutcome, download_and_save, read_csv_table};
use health_model::PipelineConfig;
use health_output::{CsvExport, Sink, SqliteSink, replace_all};
use health_transform::{
    join_and_validate, map_topics, merged_records, normalize_causes, prepare_chronic,
    select_indicators,
};

use crate::types::{FetchSummary, PipelineReport, StageSummary};

fn stage(
    stage: &'static str,
    description: &'static str,
    rows_in: usize,
    rows_out: usize,
    start: Instant,
) -> StageSummary {
    let duration_ms = start.elapsed().as_millis();
    info!(stage, rows_in, rows_out, duration_ms, "{description}");
    StageSummary {
        stage,
        description,
        rows_in,
        rows_out,
        duration_ms,
    }
}

/// Downloads both raw files. Failures are logged and reported, never raised.
pub fn fetch_sources(config: &PipelineConfig) -> Vec<FetchSummary> {
    let span = info_span!("fetch");
    let _guard = span.enter();
    let options =
        FetchOptions::default().with_timeout(Duration::from_secs(config.sources.timeout_secs));
    let targets = [
        (
            "chronic",
            &config.sources.chronic_url,
            &config.sources.chronic_path,
        ),
        (
            "mortality",
            &config.sources.mortality_url,
            &config.sources.mortality_path,
        ),
    ];
    targets
        .into_iter()
        .map(|(source, url, path)| {
            match download_and_save(url, path, &options) {
                FetchOutcome::Saved { path, bytes } => FetchSummary {
                    source,
                    url: url.clone(),
                    path,
                    bytes: Some(bytes),
                    error: None,
                },
                FetchOutcome::Failed { url, reason } => FetchSummary {
                    source,
                    url,
                    path: path.clone(),
                    bytes: None,
                    error: Some(reason),
                },
            }
        })
        .collect()
}

fn read_source(path: &Path, columns: &[String], label: &str) -> Result<DataFrame> {
    read_csv_table(path, columns).with_context(|| format!("load {label} data"))
}

/// Runs every stage and replaces both sinks.
pub fn run_pipeline(config: &PipelineConfig, skip_fetch: bool) -> Result<PipelineReport> {
    config.validate().context("invalid configuration")?;

    let fetches = if skip_fetch {
        info!("fetch skipped");
        Vec::new()
    } else {
        fetch_sources(config)
    };

    let mut stages = Vec::new();

    let start = Instant::now();
    let chronic_raw = info_span!("ingest", source = "chronic").in_scope(|| {
        read_source(
            &config.sources.chronic_path,
            &config.columns.chronic,
            "chronic disease",
        )
    })?;
    let chronic_rows = chronic_raw.height();
    stages.push(stage(
        "ingest",
        "read chronic disease rows",
        chronic_rows,
        chronic_rows,
        start,
    ));

    let start = Instant::now();
    let mortality_raw = info_span!("ingest", source = "mortality").in_scope(|| {
        read_source(
            &config.sources.mortality_path,
            &config.columns.mortality,
            "mortality",
        )
    })?;
    let mortality_rows = mortality_raw.height();
    stages.push(stage(
        "ingest",
        "read mortality rows",
        mortality_rows,
        mortality_rows,
        start,
    ));

    let start = Instant::now();
    let selected = info_span!("select").in_scope(|| -> Result<DataFrame> {
        let chronic = prepare_chronic(chronic_raw).context("type chronic columns")?;
        select_indicators(&chronic).context("select chronic indicators")
    })?;
    stages.push(stage(
        "select",
        "filtered and deduplicated indicators",
        chronic_rows,
        selected.height(),
        start,
    ));

    let start = Instant::now();
    let mapped = info_span!("map")
        .in_scope(|| map_topics(&selected, &config.mapping, &config.columns.required_after_filter))
        .context("map topics to causes")?;
    stages.push(stage(
        "map",
        "attached causes to topics",
        selected.height(),
        mapped.height(),
        start,
    ));

    let start = Instant::now();
    let causes = info_span!("normalize")
        .in_scope(|| normalize_causes(mortality_raw, &config.mapping))
        .context("normalize mortality causes")?;
    stages.push(stage(
        "normalize",
        "restricted causes to mapped set",
        mortality_rows,
        causes.height(),
        start,
    ));

    let start = Instant::now();
    let merged = info_span!("merge")
        .in_scope(|| join_and_validate(&mapped, &causes, &config.columns.required_after_join))
        .context("join and validate")?;
    stages.push(stage(
        "merge",
        "joined indicators with causes",
        mapped.height(),
        merged.height(),
        start,
    ));

    let start = Instant::now();
    let records = merged_records(&merged).context("read merged rows")?;
    let rows_written = info_span!("output").in_scope(|| -> Result<usize> {
        let mut sqlite = SqliteSink::open(&config.output.database, &config.output.table)
            .with_context(|| format!("open {}", config.output.database.display()))?;
        let mut export = CsvExport::new(&config.output.csv);
        let mut sinks: [&mut dyn Sink; 2] = [&mut sqlite, &mut export];
        replace_all(&mut sinks, &records).context("write outputs")
    })?;
    stages.push(stage(
        "output",
        "replaced sqlite table and csv export",
        records.len(),
        rows_written,
        start,
    ));

    Ok(PipelineReport {
        fetches,
        stages,
        database: config.output.database.clone(),
        table: config.output.table.clone(),
        csv: config.output.csv.clone(),
        rows_written,
    })
}
