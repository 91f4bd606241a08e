//! Report from a summary cache.
//!
//! # Usage
//!
//! ```bash
//! kube-audit report --cache-file summary.json.zst --agg user -n 50
//! kube-audit report --cache-file summary.json --sort user --output by_user.csv
//! ```
//!
//! The cache is never modified, so it can be re-reported with different
//! aggregation and ignore options as often as needed.

use super::ReportOptions;
use crate::config::ReportConfig;
use crate::summary::aggregate::Aggregator;
use crate::summary::cache;
use crate::summary::report::Reporter;
use crate::summary::table::FrequencyTable;
use crate::utils::format::format_number;
use crate::utils::reader::create_file;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

pub fn run(cache_file: &str, options: &ReportOptions) -> Result<()> {
    let config = options.config()?;

    let cached = cache::load(Path::new(cache_file))
        .with_context(|| format!("Failed to read summary cache: {}", cache_file))?;

    eprintln!(
        "Loaded {} summarized events from {} (built {}{})",
        format_number(cached.table.len()),
        cache_file,
        cached.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        cached
            .source
            .as_deref()
            .map(|s| format!(" from {}", s))
            .unwrap_or_default()
    );

    emit(&cached.table, &config, options.output.as_deref())
}

/// Aggregates `table`, prints the ranked report and optionally writes CSV.
pub(crate) fn emit(table: &FrequencyTable, config: &ReportConfig, output: Option<&str>) -> Result<()> {
    let aggregator = Aggregator::from_config(config);
    let aggregated;
    let table = if aggregator.is_identity() {
        table
    } else {
        aggregated = aggregator.apply(table);
        &aggregated
    };

    let report = Reporter::from_config(config).rank(table);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    report.render(&mut out)?;
    out.flush()?;

    eprintln!(
        "\nShowing {} of {} rows ({} events)",
        format_number(report.rows.len()),
        format_number(report.total_rows),
        format_number(table.total())
    );

    if let Some(output) = output {
        let mut writer =
            create_file(output).with_context(|| format!("Failed to create {}", output))?;
        report
            .write_csv(&mut writer)
            .with_context(|| format!("Failed to write {}", output))?;
        writer.finish()?;
        eprintln!("Report written to: {}", output);
    }

    Ok(())
}
