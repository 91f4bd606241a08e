//! REST path decomposition for legacy audit lines.
//!
//! Kubernetes request paths are positional rather than self-describing:
//!
//! ```text
//! /api/<version>/[namespaces/<ns>/]<resource>[/<name>[/<subresource>]]
//! /apis/<group>/<version>/[namespaces/<ns>/]<resource>[/<name>[/<subresource>]]
//! ```
//!
//! Where the resource segment sits depends on both the path convention
//! (core vs. named group) and whether the line carried a namespace.

use super::types::Summary;

/// Namespace value the legacy backend writes for cluster-scoped requests.
pub const NO_NAMESPACE: &str = "<none>";

/// Group recorded for requests under `/api`.
pub const CORE_GROUP: &str = "core";

/// Splits `uri` into group/resource/name/subresource on `summary`.
///
/// `summary.namespace` must already hold whatever namespace the line
/// carried before the `uri` key. Paths too short or not under `/api` or
/// `/apis` are stored verbatim in `summary.uri` instead.
pub fn decompose_uri(summary: &mut Summary, uri: &str) {
    let parts: Vec<&str> = uri.trim_matches('/').split('/').collect();
    if parts.len() < 3 {
        summary.uri = uri.to_string();
        return;
    }

    let namespaced = !summary.namespace.is_empty() && summary.namespace != NO_NAMESPACE;

    match parts[0] {
        "api" => {
            summary.group = CORE_GROUP.to_string();
            if namespaced && parts.len() > 4 {
                assign_from(summary, &parts, 4, 5, 6);
            } else {
                assign_from(summary, &parts, 2, 3, 4);
            }
        }
        "apis" => {
            summary.group = parts[1].to_string();
            if namespaced && parts.len() > 5 {
                assign_from(summary, &parts, 5, 6, 7);
            } else if parts.len() > 3 {
                // Skips the version segment for the name; kept as observed in
                // existing reports.
                assign_from(summary, &parts, 2, 4, 5);
            } else {
                summary.uri = uri.to_string();
            }
        }
        _ => summary.uri = uri.to_string(),
    }
}

fn assign_from(summary: &mut Summary, parts: &[&str], resource: usize, name: usize, sub: usize) {
    let segment = |idx: usize| parts.get(idx).map(|s| (*s).to_string());

    if let Some(resource) = segment(resource) {
        summary.resource = resource;
    }
    if let Some(name) = segment(name) {
        summary.name = name;
    }
    if let Some(sub) = segment(sub) {
        summary.subresource = sub;
    }
}
