//! Single-pass log summarization.
//!
//! Reads a log start to end, parses every line with the configured
//! format, and counts identical keys. Any parse error aborts the run so a
//! corrupt log never yields a partial table.

use crate::audit::parser::parse_line;
use crate::audit::types::{AuditEvent, Summary};
use crate::config::LogFormat;
use crate::error::{AuditError, Result};
use crate::summary::table::FrequencyTable;
use crate::utils::progress::ProgressBar;
use std::hash::Hash;
use std::io::BufRead;
use tracing::{debug, info};

/// How many lines to read between progress bar updates.
const PROGRESS_INTERVAL: usize = 10_000;

/// Line counts from one summarization run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummarizeStats {
    /// Lines read from the log, blank ones included.
    pub lines_read: usize,
    /// Lines that produced a counted event.
    pub lines_counted: usize,
    /// Distinct keys in the resulting table.
    pub unique_events: usize,
}

/// Drives a line parser over a whole log.
pub struct Summarizer<'a> {
    format: LogFormat,
    progress: Option<&'a ProgressBar>,
}

impl<'a> Summarizer<'a> {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            progress: None,
        }
    }

    /// Report bytes consumed to `progress` while reading.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Counts lines by their [`Summary`].
    pub fn summarize<R: BufRead>(&self, reader: R) -> Result<(FrequencyTable, SummarizeStats)> {
        self.summarize_by(reader, |event| event.summary)
    }

    /// Counts lines by the full event, source IP and response included.
    pub fn summarize_events<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(FrequencyTable<AuditEvent>, SummarizeStats)> {
        self.summarize_by(reader, |event| event)
    }

    fn summarize_by<R, K, F>(&self, reader: R, key: F) -> Result<(FrequencyTable<K>, SummarizeStats)>
    where
        R: BufRead,
        K: Eq + Hash,
        F: Fn(AuditEvent) -> K,
    {
        let mut table = FrequencyTable::new();
        let mut stats = SummarizeStats::default();
        let mut bytes_read: u64 = 0;

        for line in reader.lines() {
            let line = line?;
            stats.lines_read += 1;
            bytes_read += line.len() as u64 + 1;

            if let Some(progress) = self.progress {
                if stats.lines_read % PROGRESS_INTERVAL == 0 {
                    progress.update(bytes_read);
                }
            }

            if line.trim().is_empty() {
                continue;
            }

            let event = parse_line(self.format, &line).map_err(|source| {
                debug!(line = stats.lines_read, "aborting summarization on unparseable line");
                AuditError::Parse {
                    line: stats.lines_read,
                    source,
                }
            })?;

            let Some(event) = event else {
                continue;
            };
            stats.lines_counted += 1;
            table.record(key(event));
        }

        if let Some(progress) = self.progress {
            progress.update(bytes_read);
        }

        stats.unique_events = table.len();
        info!(
            lines_read = stats.lines_read,
            lines_counted = stats.lines_counted,
            unique_events = stats.unique_events,
            format = %self.format,
            "Summarized audit log"
        );

        Ok((table, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LEGACY_LOG: &str = r#"2020-01-01T00:00:00Z AUDIT: id="1" stage="RequestReceived" method="get" user="alice" namespace="default" uri="/api/v1/namespaces/default/pods/foo"
2020-01-01T00:00:00Z AUDIT: id="1" stage="ResponseComplete" method="get" user="alice" namespace="default" uri="/api/v1/namespaces/default/pods/foo"
2020-01-01T00:00:01Z AUDIT: id="2" stage="ResponseComplete" method="get" user="alice" namespace="default" uri="/api/v1/namespaces/default/pods/foo"

2020-01-01T00:00:02Z AUDIT: id="3" stage="ResponseComplete" ip="10.0.0.9" method="list" user="bob" namespace="<none>" uri="/api/v1/nodes"
"#;

    #[test]
    fn test_summarize_legacy() {
        let (table, stats) = Summarizer::new(LogFormat::Legacy)
            .summarize(Cursor::new(LEGACY_LOG))
            .unwrap();

        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.lines_counted, 3);
        assert_eq!(stats.unique_events, 2);

        let alice = Summary {
            user: "alice".to_string(),
            verb: "get".to_string(),
            namespace: "default".to_string(),
            group: "core".to_string(),
            resource: "pods".to_string(),
            name: "foo".to_string(),
            ..Summary::default()
        };
        assert_eq!(table.get(&alice), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_summarize_events_keeps_ip() {
        let (table, _) = Summarizer::new(LogFormat::Legacy)
            .summarize_events(Cursor::new(LEGACY_LOG))
            .unwrap();

        let bob = table
            .iter()
            .find(|(event, _)| event.summary.user == "bob")
            .map(|(event, count)| (event.ip.clone(), *count));
        assert_eq!(bob, Some(("10.0.0.9".to_string(), 1)));
    }

    #[test]
    fn test_parse_error_aborts_with_line_number() {
        let log = "t AUDIT: user=\"a\"\nt AUDIT: user=\"b\" broken\n";
        let err = Summarizer::new(LogFormat::Legacy)
            .summarize(Cursor::new(log))
            .unwrap_err();

        assert!(matches!(err, AuditError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_json_parse_error_aborts() {
        let log = r#"{"verb":"get","requestURI":"/","user":{"username":"a"}}
not json
"#;
        let err = Summarizer::new(LogFormat::Json)
            .summarize(Cursor::new(log))
            .unwrap_err();
        assert!(matches!(err, AuditError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_log() {
        let (table, stats) = Summarizer::new(LogFormat::Json)
            .summarize(Cursor::new(""))
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(stats, SummarizeStats::default());
    }

    #[test]
    fn test_progress_reaches_end() {
        let progress = ProgressBar::hidden();
        Summarizer::new(LogFormat::Legacy)
            .with_progress(&progress)
            .summarize(Cursor::new(LEGACY_LOG))
            .unwrap();
        assert_eq!(progress.position(), LEGACY_LOG.len() as u64);
    }
}
