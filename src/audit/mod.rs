//! Core audit log parsing and data structures.
//!
//! ## Key Components
//!
//! - [`types`] - Structured audit records, the [`Summary`](types::Summary) key and column enum
//! - [`parser`] - Line parsers for the JSON and legacy `key=value` formats
//! - [`uri`] - REST path decomposition used by the legacy parser
//!
//! ## Example
//!
//! ```
//! use kube_audit_tools::audit::parser::parse_legacy_line;
//!
//! let line = r#"2020-01-01T00:00:00Z AUDIT: stage="ResponseComplete" method="get" user="alice" namespace="default" uri="/api/v1/namespaces/default/pods/foo""#;
//! let event = parse_legacy_line(line).unwrap().unwrap();
//! assert_eq!(event.summary.resource, "pods");
//! assert_eq!(event.summary.name, "foo");
//! ```

pub mod parser;
pub mod types;
pub mod uri;
