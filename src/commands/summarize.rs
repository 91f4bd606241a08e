//! Summarize an audit log into a ranked report.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a JSON audit log and show the top 20 request shapes
//! kube-audit summarize kube-apiserver-audit.log -n 20
//!
//! # Legacy format, writing a cache for later re-aggregation
//! kube-audit summarize audit.log --log-type legacy --cache-file summary.json.zst
//!
//! # Collapse namespaces and names, ignore node traffic
//! kube-audit summarize audit.log --agg namespace,name --ignore user=system:kube-proxy
//! ```
//!
//! The whole log is parsed in one pass. Any malformed line aborts the run
//! without printing a partial report.

use super::{with_log, ReportOptions};
use crate::config::LogFormat;
use crate::summary::cache;
use crate::utils::format::format_number;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(
    log_file: &str,
    log_type: &str,
    cache_file: Option<&str>,
    options: &ReportOptions,
) -> Result<()> {
    let format: LogFormat = log_type.parse()?;
    let config = options.config()?;

    let (table, stats) = with_log(log_file, format, |summarizer, reader| {
        summarizer.summarize(reader)
    })?;

    eprintln!(
        "Read {} lines. Counted {} lines into {} unique events.",
        format_number(stats.lines_read),
        format_number(stats.lines_counted),
        format_number(stats.unique_events)
    );

    if let Some(cache_file) = cache_file {
        cache::save(&table, Some(log_file), Path::new(cache_file))
            .with_context(|| format!("Failed to write summary cache: {}", cache_file))?;
    }

    super::report::emit(&table, &config, options.output.as_deref())
}
