//! Line parsers for the two audit log formats.
//!
//! Both parsers return `Ok(None)` for lines that are valid but should not be
//! counted, and an error for lines that are structurally broken. The caller
//! treats any error as fatal to the whole log.

use super::types::{AuditEvent, AuditRecord};
use super::uri::decompose_uri;
use crate::config::LogFormat;
use crate::error::ParseError;

/// Stage value marking the final record of a request.
pub const RESPONSE_COMPLETE: &str = "ResponseComplete";

/// Parses one line in the given format.
pub fn parse_line(format: LogFormat, line: &str) -> Result<Option<AuditEvent>, ParseError> {
    match format {
        LogFormat::Json => parse_json_line(line).map(Some),
        LogFormat::Legacy => parse_legacy_line(line),
    }
}

/// Parses a structured (JSON) audit record.
pub fn parse_json_line(line: &str) -> Result<AuditEvent, ParseError> {
    let record: AuditRecord = serde_json::from_str(line)?;
    Ok(AuditEvent::from(record))
}

/// Parses a legacy `<timestamp> AUDIT: key=value ...` line.
///
/// Returns `Ok(None)` when the line carries a `stage` other than
/// [`RESPONSE_COMPLETE`], so a request logged at several stages is only
/// counted once.
pub fn parse_legacy_line(line: &str) -> Result<Option<AuditEvent>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ParseError::TooFewFields {
            line: line.to_string(),
        });
    }

    let mut event = AuditEvent::default();

    // Leading "<timestamp> AUDIT:" carries nothing we count on.
    for token in &fields[2..] {
        let Some((key, raw)) = token.split_once('=') else {
            return Err(ParseError::MissingSeparator {
                token: (*token).to_string(),
                line: line.to_string(),
            });
        };
        let value = normalize_value(raw);

        match key {
            "user" => event.summary.user = value.to_string(),
            "method" => event.summary.verb = value.to_string(),
            "namespace" => event.summary.namespace = value.to_string(),
            "ip" => event.ip = value.to_string(),
            "response" => event.response = value.to_string(),
            "uri" => decompose_uri(&mut event.summary, value),
            "stage" => {
                if value != RESPONSE_COMPLETE {
                    return Ok(None);
                }
            }
            _ => {}
        }
    }

    Ok(Some(event))
}

/// Strips one layer of double quotes and any query string.
fn normalize_value(raw: &str) -> &str {
    let value = raw.strip_prefix('"').unwrap_or(raw);
    let value = value.strip_suffix('"').unwrap_or(value);
    match value.split_once('?') {
        Some((head, _)) => head,
        None => value,
    }
}
