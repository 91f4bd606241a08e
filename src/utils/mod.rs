//! Utility functions and helpers.
//!
//! - [`reader`] - File reader/writer with transparent gzip/zstd handling
//! - [`progress`] - Progress bar shown while summarizing large logs
//! - [`format`] - Number formatting for reports
//! - [`logging`] - Diagnostic logging setup
//!
//! # Examples
//!
//! ```no_run
//! use kube_audit_tools::utils::reader::open_file;
//! use std::io::BufReader;
//!
//! // Automatically decompresses .gz and .zst files
//! let reader = open_file("audit.log.gz").unwrap();
//! let buf_reader = BufReader::new(reader);
//! ```

pub mod format;
pub mod logging;
pub mod progress;
pub mod reader;
