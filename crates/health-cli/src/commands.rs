use anyhow::{Context, Result};
use comfy_table::Table;

use health_cli::pipeline::{fetch_sources, run_pipeline};
use health_cli::types::VerifySummary;
use health_model::{MERGED_SCHEMA, PipelineConfig, create_table_sql};
use health_output::verify_database;

use crate::cli::{ConfigArgs, RunArgs, VerifyArgs};
use crate::summary::{apply_table_style, print_fetches, print_run_summary, print_verification};

fn load_config(args: &ConfigArgs) -> Result<PipelineConfig> {
    PipelineConfig::load_or_default(args.config.as_deref()).context("load configuration")
}

/// Applies per-run path overrides on top of the file configuration.
fn apply_run_overrides(config: &mut PipelineConfig, args: &RunArgs) {
    if let Some(path) = &args.chronic {
        config.sources.chronic_path = path.clone();
    }
    if let Some(path) = &args.mortality {
        config.sources.mortality_path = path.clone();
    }
    if let Some(path) = &args.database {
        config.output.database = path.clone();
    }
    if let Some(table) = &args.table {
        config.output.table = table.clone();
    }
    if let Some(path) = &args.csv {
        config.output.csv = path.clone();
    }
}

pub fn run_pipeline_command(args: &RunArgs) -> Result<i32> {
    let mut config = load_config(&args.config)?;
    apply_run_overrides(&mut config, args);
    let report = run_pipeline(&config, args.skip_fetch)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_run_summary(&report);
    }
    Ok(0)
}

pub fn run_fetch(args: &ConfigArgs) -> Result<i32> {
    let config = load_config(args)?;
    let fetches = fetch_sources(&config);
    print_fetches(&fetches);
    Ok(0)
}

pub fn run_verify(args: &VerifyArgs) -> Result<i32> {
    let mut config = load_config(&args.config)?;
    if let Some(path) = &args.database {
        config.output.database = path.clone();
    }
    if let Some(table) = &args.table {
        config.output.table = table.clone();
    }
    let report = verify_database(&config.output.database, &config.output.table)
        .with_context(|| format!("verify {}", config.output.database.display()))?;
    let summary = VerifySummary::from(&report);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_verification(&summary);
    }
    Ok(if summary.passed { 0 } else { 1 })
}

pub fn run_schema() -> Result<i32> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Nullable"]);
    apply_table_style(&mut table);
    for column in MERGED_SCHEMA {
        table.add_row(vec![
            column.name.to_string(),
            column.sql_type.to_string(),
            if column.required { "no" } else { "yes" }.to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!("{}", create_table_sql(health_model::DEFAULT_TABLE_NAME)?);
    Ok(0)
}

pub fn run_mapping(args: &ConfigArgs) -> Result<i32> {
    let config = load_config(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Topic", "Cause_Name"]);
    apply_table_style(&mut table);
    for (topic, cause) in config.mapping.iter() {
        table.add_row(vec![topic, cause]);
    }
    println!("{table}");
    Ok(0)
}
