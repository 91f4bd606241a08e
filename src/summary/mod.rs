//! Counting, aggregating, caching and reporting summarized events.
//!
//! - [`table`] - [`FrequencyTable`](table::FrequencyTable), the counted multiset of keys
//! - [`summarizer`] - Single pass over a log producing a table
//! - [`aggregate`] - Column aggregation and row ignoring over an existing table
//! - [`cache`] - Persisting a table so later runs skip parsing
//! - [`report`] - Sorting, truncating and rendering a table
//!
//! ## Example
//!
//! ```
//! use kube_audit_tools::config::{LogFormat, ReportConfig};
//! use kube_audit_tools::summary::aggregate::Aggregator;
//! use kube_audit_tools::summary::report::Reporter;
//! use kube_audit_tools::summary::summarizer::Summarizer;
//! use std::io::Cursor;
//!
//! let log = r#"t AUDIT: stage="ResponseComplete" method="get" user="alice" namespace="a" uri="/api/v1/namespaces/a/pods/x"
//! t AUDIT: stage="ResponseComplete" method="get" user="alice" namespace="b" uri="/api/v1/namespaces/b/pods/x"
//! "#;
//! let (table, _) = Summarizer::new(LogFormat::Legacy).summarize(Cursor::new(log)).unwrap();
//!
//! let config = ReportConfig::from_args(&["namespace"], &[], "-count", 10).unwrap();
//! let aggregated = Aggregator::from_config(&config).apply(&table);
//! let report = Reporter::from_config(&config).rank(&aggregated);
//! assert_eq!(report.rows[0].count, 2);
//! ```

pub mod aggregate;
pub mod cache;
pub mod report;
pub mod summarizer;
pub mod table;
