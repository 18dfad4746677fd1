// src/cli.rs
use anyhow::{anyhow, Result, Context};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analysis::{self, AnalysisResult, Chart};
use crate::config::{AnalysisRequest, RecordStore, Settings};
use crate::error::AnalysisError;
use crate::file::{BatchItem, FileManager};
use crate::utils::format_gdp;

pub const USAGE: &str = "\
Usage:
  gdp-atlas [--dataset PATH]                          Open the dashboard
  gdp-atlas batch FILE.ron [--dataset PATH] [--plot]  Run a batch of analyses

Options:
  --dataset PATH   CSV dataset to load (overrides settings and batch file)
  --plot           Show the batch results in the dashboard afterwards
  -h, --help       Print this help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard { dataset: Option<PathBuf> },
    Batch { file: PathBuf, dataset: Option<PathBuf>, plot: bool },
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut batch_file = None;
    let mut is_batch = false;
    let mut dataset = None;
    let mut plot = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--dataset" => {
                let path = args.next().ok_or_else(|| anyhow!("--dataset requires a path"))?;
                dataset = Some(PathBuf::from(path));
            }
            "--plot" => plot = true,
            "batch" if !is_batch => is_batch = true,
            other if other.starts_with('-') => return Err(anyhow!("Unknown option: {}", other)),
            other if is_batch && batch_file.is_none() => batch_file = Some(PathBuf::from(other)),
            other => return Err(anyhow!("Unexpected argument: {}", other)),
        }
    }

    if is_batch {
        let file = batch_file.ok_or_else(|| anyhow!("batch requires a batch file"))?;
        Ok(Command::Batch { file, dataset, plot })
    } else if plot {
        Err(anyhow!("--plot is only valid with batch"))
    } else {
        Ok(Command::Dashboard { dataset })
    }
}

/// Load, validate and run a batch file, writing the report to `out`.
///
/// The whole document is validated before the dataset is read, so a bad
/// entry means nothing is evaluated.
pub fn run_batch<W: Write>(
    settings: &Settings,
    file: &Path,
    dataset: Option<PathBuf>,
    out: &mut W,
) -> Result<(RecordStore, Vec<Chart>)> {
    let file_manager = FileManager::new(settings.columns.clone());

    let batch = file_manager.load_batch(file)?;
    let items = batch.validate()
        .with_context(|| format!("Invalid batch file: {}", file.display()))?;
    log::info!("Batch file {} has {} analyses", file.display(), items.len());

    // Batch-relative dataset paths resolve against the batch file's directory
    let dataset_path = match (dataset, batch.dataset) {
        (Some(path), _) => path,
        (None, Some(path)) if path.is_relative() => file.parent()
            .map(|dir| dir.join(&path))
            .unwrap_or(path),
        (None, Some(path)) => path,
        (None, None) => settings.dataset.clone(),
    };

    let store = file_manager.load_dataset(&dataset_path)?;
    let charts = execute(&store, &items, out)?;
    Ok((store, charts))
}

/// Evaluate validated items in order. Unknown countries are reported and skipped.
pub fn execute<W: Write>(store: &RecordStore, items: &[BatchItem], out: &mut W) -> Result<Vec<Chart>> {
    let mut charts = Vec::with_capacity(items.len());

    if let Some(source) = store.source() {
        write!(out, "Dataset: {} ({} records", source.display(), store.len())?;
        if let Some((first, last)) = store.year_span() {
            write!(out, ", years {}-{}", first, last)?;
        }
        writeln!(out, ")")?;
        writeln!(out)?;
    }

    for (i, item) in items.iter().enumerate() {
        let position = format!("[{}/{}]", i + 1, items.len());

        match analysis::evaluate(store, &item.request) {
            Ok(result) => {
                writeln!(out, "{} {} ({})", position, result.title(), item.chart)?;
                write_result(out, &result)?;
                charts.push(Chart::new(result, item.chart));
            }
            Err(AnalysisError::CountryNotFound(country)) => {
                writeln!(out, "{} Country '{}' not found", position, country)?;
                log::warn!("Skipping trend for unknown country '{}'", country);
            }
            Err(e) => return Err(e.into()),
        }
        writeln!(out)?;
    }

    log_request_mix(items);
    Ok(charts)
}

fn write_result<W: Write>(out: &mut W, result: &AnalysisResult) -> Result<()> {
    const INDENT: &str = "      ";

    match result {
        AnalysisResult::Region(r) => {
            writeln!(out, "{}{}: {}", INDENT, r.operation.title(), format_gdp(r.value))?;
            for (country, value) in r.series.iter() {
                writeln!(out, "{}{:<32}{:>24}", INDENT, country, format_gdp(value))?;
            }
        }
        AnalysisResult::Trend(t) => {
            writeln!(
                out,
                "{}Average: {}  Total: {}",
                INDENT,
                format_gdp(t.average),
                format_gdp(t.total)
            )?;
            for (year, value) in t.series.iter() {
                writeln!(out, "{}{:<32}{:>24}", INDENT, year, format_gdp(value))?;
            }
        }
    }

    if result.is_empty() {
        writeln!(out, "{}No data available.", INDENT)?;
    }
    Ok(())
}

fn log_request_mix(items: &[BatchItem]) {
    let regions = items.iter()
        .filter(|item| matches!(item.request, AnalysisRequest::Region(_)))
        .count();
    log::info!(
        "Batch finished: {} region and {} trend analyses",
        regions,
        items.len() - regions
    );
}
