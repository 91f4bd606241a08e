//! Command implementations for the `kube-audit` binary.
//!
//! - [`summarize`] - Parse an audit log, optionally cache the table, print a report
//! - [`report`] - Print a report from a previously written cache
//! - [`export`] - Write full-event counts (source IP and response included) to CSV
//!
//! Every command validates its options before touching the filesystem.

pub mod export;
pub mod report;
pub mod summarize;

use crate::config::{LogFormat, ReportConfig};
use crate::error::ConfigError;
use crate::summary::summarizer::Summarizer;
use crate::utils::progress::ProgressBar;
use crate::utils::reader::{open_file, Codec};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{BufReader, Read};
use std::path::Path;

/// Options shared by every command that prints a report.
#[derive(Debug, Clone, Args)]
pub struct ReportOptions {
    /// Comma-separated columns to aggregate across
    /// (user, verb, namespace, group, resource, subresource, name, uri)
    #[arg(long = "agg", value_name = "COLUMNS")]
    pub aggregate: Vec<String>,

    /// Comma-separated column=value pairs identifying rows to ignore
    #[arg(long, value_name = "COLUMN=VALUE")]
    pub ignore: Vec<String>,

    /// Number of rows to include in the report (0 for all)
    #[arg(short = 'n', long = "top", default_value = "0")]
    pub top: usize,

    /// Sort column: count or user, prefixed with '-' for descending order
    #[arg(long, default_value = "-count", allow_hyphen_values = true)]
    pub sort: String,

    /// Also write the report rows to this CSV file
    #[arg(short, long)]
    pub output: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            aggregate: Vec::new(),
            ignore: Vec::new(),
            top: 0,
            sort: "-count".to_string(),
            output: None,
        }
    }
}

impl ReportOptions {
    pub fn config(&self) -> Result<ReportConfig, ConfigError> {
        ReportConfig::from_args(&self.aggregate, &self.ignore, &self.sort, self.top)
    }
}

/// Opens `log_file` and hands a summarizer wired to a progress bar to `f`.
pub(crate) fn with_log<T, F>(log_file: &str, format: LogFormat, f: F) -> Result<T>
where
    F: FnOnce(Summarizer<'_>, BufReader<Box<dyn Read + Send>>) -> crate::error::Result<T>,
{
    let path = Path::new(log_file);
    let file =
        open_file(path).with_context(|| format!("Failed to open audit log: {}", log_file))?;

    eprintln!("Processing: {} ({} format)", log_file, format);

    // Decompressed size is unknown up front, so compressed logs get a spinner.
    let file_size = std::fs::metadata(path).ok().map(|m| m.len());
    let progress = match (Codec::from_path(path), file_size) {
        (Codec::Plain, Some(size)) => ProgressBar::new(size, "Summarizing"),
        _ => ProgressBar::new_spinner("Summarizing"),
    };

    let summarizer = Summarizer::new(format).with_progress(&progress);
    let result = f(summarizer, BufReader::new(file))
        .with_context(|| format!("Failed to summarize audit log: {}", log_file));

    progress.finish_with_message("Summarized");
    result
}
