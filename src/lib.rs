//! # Kube Audit Tools
//!
//! Command-line tools for summarizing Kubernetes API server audit logs.
//!
//! ## Overview
//!
//! Audit logs record every API request, which makes them far too large to
//! read directly. This crate reduces a log to a frequency table of request
//! shapes (who did what to which resource) and then lets you slice that
//! table repeatedly without re-reading the log:
//!
//! 1. Each line is parsed into a [`Summary`](audit::types::Summary) key:
//!    user, verb, namespace, API group, resource, subresource, name and,
//!    for requests that are not resource paths, the raw URI.
//! 2. Identical keys are counted into a
//!    [`FrequencyTable`](summary::table::FrequencyTable).
//! 3. The table can be cached, then aggregated (columns cleared and counts
//!    re-summed), filtered (rows ignored) and rendered as a ranked report.
//!
//! ## Log Formats
//!
//! - **json** - one structured audit event per line, as written by the
//!   API server's JSON log backend
//! - **legacy** - `<timestamp> AUDIT: key="value" ...` lines from the old
//!   text backend; REST paths are decomposed to recover group, resource,
//!   name and subresource
//!
//! ## Architecture
//!
//! - [`audit`] - Record types, line parsers, URI decomposition
//! - [`summary`] - Frequency table, summarizer, aggregator, cache, reporter
//! - [`commands`] - Individual command implementations
//! - [`config`] - Validated run configuration
//! - [`error`] - Error types
//! - [`utils`] - File access, progress, formatting, logging
//!
//! ## Example Usage
//!
//! ```bash
//! # Top 20 request shapes
//! kube-audit summarize kube-apiserver-audit.log -n 20
//!
//! # Build a cache once, then slice it different ways
//! kube-audit summarize audit.log --log-type legacy --cache-file summary.json.zst
//! kube-audit report --cache-file summary.json.zst --agg namespace,name
//! kube-audit report --cache-file summary.json.zst --ignore user=system:apiserver --sort user
//!
//! # Full events with client IP and response code
//! kube-audit export audit.log.gz --output events.csv
//! ```

pub mod audit;
pub mod commands;
pub mod config;
pub mod error;
pub mod summary;
pub mod utils;
