//! Data structures for Kubernetes API server audit records.
//!
//! [`AuditRecord`] mirrors the JSON shape written by the structured audit
//! backend closely enough for serde to deserialize it directly. [`Summary`]
//! is the normalized key that identical requests are grouped under, and
//! [`AuditEvent`] is what the line parsers produce: a summary plus the
//! auxiliary source IP and response code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One structured audit record as written by the JSON log backend.
///
/// Only the fields needed for summarization are modelled; everything else
/// in the record is ignored by serde.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditRecord {
    pub user: UserInfo,
    pub verb: String,
    #[serde(rename = "requestURI")]
    pub request_uri: String,
    #[serde(rename = "objectRef")]
    pub object_ref: Option<ObjectReference>,
    /// Source addresses, oldest hop first.
    #[serde(rename = "sourceIPs", default)]
    pub source_ips: Vec<String>,
    #[serde(rename = "responseStatus")]
    pub response_status: Option<ResponseStatus>,
    pub stage: Option<String>,
}

/// Authenticated user that made the request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// The object a request targeted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectReference {
    #[serde(rename = "apiGroup")]
    pub api_group: String,
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub resource: String,
    pub subresource: String,
    pub name: String,
    pub namespace: String,
}

/// Outcome of the request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResponseStatus {
    pub code: Option<i32>,
}

impl AuditRecord {
    /// Closest hop that sent the request, if any was recorded.
    pub fn client_ip(&self) -> Option<&str> {
        self.source_ips.last().map(String::as_str)
    }

    /// Response code as a decimal string.
    pub fn response_code(&self) -> Option<String> {
        self.response_status
            .as_ref()?
            .code
            .map(|code| code.to_string())
    }
}

/// A column of [`Summary`] that can be aggregated away or filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    User,
    Verb,
    Namespace,
    Group,
    Resource,
    Subresource,
    Name,
    Uri,
}

impl Field {
    /// All columns in report order.
    pub const ALL: [Field; 8] = [
        Field::User,
        Field::Verb,
        Field::Namespace,
        Field::Group,
        Field::Resource,
        Field::Subresource,
        Field::Name,
        Field::Uri,
    ];

    /// Column heading used in reports.
    pub const fn title(self) -> &'static str {
        match self {
            Field::User => "User",
            Field::Verb => "Verb",
            Field::Namespace => "Namespace",
            Field::Group => "Group",
            Field::Resource => "Resource",
            Field::Subresource => "Subresource",
            Field::Name => "Name",
            Field::Uri => "URI",
        }
    }

    /// Lowercase name accepted on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::User => "user",
            Field::Verb => "verb",
            Field::Namespace => "namespace",
            Field::Group => "group",
            Field::Resource => "resource",
            Field::Subresource => "subresource",
            Field::Name => "name",
            Field::Uri => "uri",
        }
    }
}

impl FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized aggregation key for one request.
///
/// Two summaries are equal only when all eight columns match exactly. An
/// empty string means the column was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Summary {
    pub user: String,
    pub verb: String,
    pub namespace: String,
    pub group: String,
    pub resource: String,
    pub subresource: String,
    pub name: String,
    pub uri: String,
}

impl Summary {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::User => &self.user,
            Field::Verb => &self.verb,
            Field::Namespace => &self.namespace,
            Field::Group => &self.group,
            Field::Resource => &self.resource,
            Field::Subresource => &self.subresource,
            Field::Name => &self.name,
            Field::Uri => &self.uri,
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::User => self.user.clear(),
            Field::Verb => self.verb.clear(),
            Field::Namespace => self.namespace.clear(),
            Field::Group => self.group.clear(),
            Field::Resource => self.resource.clear(),
            Field::Subresource => self.subresource.clear(),
            Field::Name => self.name.clear(),
            Field::Uri => self.uri.clear(),
        }
    }

    /// Column values in report order.
    pub fn columns(&self) -> [&str; 8] {
        Field::ALL.map(|field| self.get(field))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.columns().join(" | "))
    }
}

/// Parsed audit line: the summary key plus fields only the full-event
/// export cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditEvent {
    pub summary: Summary,
    pub ip: String,
    pub response: String,
}

impl From<AuditRecord> for AuditEvent {
    fn from(record: AuditRecord) -> Self {
        let ip = record.client_ip().unwrap_or_default().to_string();
        let response = record.response_code().unwrap_or_default();

        let mut summary = Summary {
            user: record.user.username,
            verb: record.verb,
            uri: record.request_uri,
            ..Summary::default()
        };
        if let Some(obj) = record.object_ref {
            summary.group = obj.api_group;
            summary.resource = obj.resource;
            summary.subresource = obj.subresource;
            summary.name = obj.name;
            summary.namespace = obj.namespace;
        }

        Self {
            summary,
            ip,
            response,
        }
    }
}
