//! Run configuration.
//!
//! Everything here is built from raw command-line values and validated
//! before any file is opened. The resulting values are passed explicitly
//! to the summarizer, aggregator and reporter.

use crate::audit::types::{Field, Summary};
use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Audit log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One structured JSON record per line.
    #[default]
    Json,
    /// `<timestamp> AUDIT: key="value" ...` lines.
    Legacy,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "legacy" => Ok(Self::Legacy),
            other => Err(ConfigError::UnknownLogFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// Columns to clear before re-keying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationSpec {
    fields: BTreeSet<Field>,
}

impl AggregationSpec {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Builds the spec from comma-separated column lists.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, ConfigError> {
        let mut fields = BTreeSet::new();
        for value in values {
            for col in value.as_ref().split(',').filter(|c| !c.trim().is_empty()) {
                fields.insert(col.parse::<Field>()?);
            }
        }
        Ok(Self { fields })
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    /// Returns a copy of `summary` with the aggregated columns cleared.
    pub fn apply(&self, summary: &Summary) -> Summary {
        let mut collapsed = summary.clone();
        for field in &self.fields {
            collapsed.clear(*field);
        }
        collapsed
    }
}

/// Rows to drop, as `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSpec {
    rules: Vec<(Field, String)>,
}

impl IgnoreSpec {
    pub fn new(rules: impl IntoIterator<Item = (Field, String)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Builds the spec from comma-separated `column=value` lists.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, ConfigError> {
        let mut rules = Vec::new();
        for value in values {
            for rule in value.as_ref().split(',').filter(|r| !r.trim().is_empty()) {
                let (col, val) = rule
                    .split_once('=')
                    .ok_or_else(|| ConfigError::MalformedIgnore(rule.to_string()))?;
                let field = col
                    .parse::<Field>()
                    .map_err(|_| ConfigError::MalformedIgnore(rule.to_string()))?;
                rules.push((field, val.to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when any rule matches `summary`.
    pub fn matches(&self, summary: &Summary) -> bool {
        self.rules
            .iter()
            .any(|(field, value)| summary.get(*field) == value)
    }
}

/// Report sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Count,
    User,
}

/// Sort column plus direction. Parsed from `count`, `user`, or either
/// prefixed with `-` for descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Count,
            descending: true,
        }
    }
}

impl FromStr for SortSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let key = match name.to_ascii_lowercase().as_str() {
            "count" => SortKey::Count,
            "user" => SortKey::User,
            _ => return Err(ConfigError::UnknownSortField(s.to_string())),
        };
        Ok(Self { key, descending })
    }
}

/// Everything that shapes a report, independent of where the table came
/// from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    pub aggregation: AggregationSpec,
    pub ignore: IgnoreSpec,
    pub sort: SortSpec,
    /// Maximum rows to print; `None` prints everything.
    pub limit: Option<usize>,
}

impl ReportConfig {
    /// Validates raw option values. A `limit` of 0 means unlimited.
    pub fn from_args<S: AsRef<str>>(
        aggregate: &[S],
        ignore: &[S],
        sort: &str,
        limit: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            aggregation: AggregationSpec::parse(aggregate)?,
            ignore: IgnoreSpec::parse(ignore)?,
            sort: sort.parse()?,
            limit: (limit > 0).then_some(limit),
        })
    }
}
