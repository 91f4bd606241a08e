//! Summary cache persistence.
//!
//! Parsing a large audit log is the slow part of every run, so the
//! summarized table can be written once and re-aggregated from the cache
//! afterwards. The cache is a JSON document listing every key with its
//! count:
//!
//! ```json
//! {
//!   "version": 1,
//!   "created_at": "2026-10-19T12:00:00Z",
//!   "source": "kube-apiserver-audit.log",
//!   "entries": [
//!     {"summary": {"user": "alice", "verb": "get", ...}, "count": 3}
//!   ]
//! }
//! ```
//!
//! Files ending in `.gz` or `.zst` are compressed transparently.

use crate::audit::types::Summary;
use crate::error::CacheError;
use crate::summary::table::FrequencyTable;
use crate::utils::reader::{create_file, open_file};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::info;

/// Cache layout version written by this build.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    summary: Summary,
    count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheBlob {
    version: u32,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    entries: Vec<CacheEntry>,
}

/// A decoded cache with its provenance.
#[derive(Debug)]
pub struct CachedSummary {
    pub table: FrequencyTable,
    pub created_at: DateTime<Utc>,
    pub source: Option<String>,
}

/// Writes `table` to `writer`. Entries are sorted so identical tables
/// produce identical bytes apart from the timestamp.
pub fn encode<W: Write>(
    table: &FrequencyTable,
    source: Option<&str>,
    writer: W,
) -> Result<(), CacheError> {
    let mut entries: Vec<CacheEntry> = table
        .iter()
        .map(|(summary, &count)| CacheEntry {
            summary: summary.clone(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| a.summary.cmp(&b.summary));

    let blob = CacheBlob {
        version: CACHE_VERSION,
        created_at: Utc::now(),
        source: source.map(str::to_string),
        entries,
    };
    serde_json::to_writer(writer, &blob)?;
    Ok(())
}

/// Reads a cache written by [`encode`].
pub fn decode<R: Read>(reader: R) -> Result<CachedSummary, CacheError> {
    let blob: CacheBlob = serde_json::from_reader(reader)?;
    if blob.version != CACHE_VERSION {
        return Err(CacheError::Version {
            found: blob.version,
            expected: CACHE_VERSION,
        });
    }

    let mut table = FrequencyTable::new();
    for entry in blob.entries {
        if table.contains(&entry.summary) {
            return Err(CacheError::DuplicateEntry {
                key: entry.summary.to_string(),
            });
        }
        table.add(entry.summary, entry.count);
    }

    Ok(CachedSummary {
        table,
        created_at: blob.created_at,
        source: blob.source,
    })
}

/// Writes the cache to `path`, compressing by extension.
pub fn save(table: &FrequencyTable, source: Option<&str>, path: &Path) -> Result<(), CacheError> {
    let io_err = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = create_file(path).map_err(io_err)?;
    encode(table, source, &mut writer)?;
    writer.finish().map_err(io_err)?;

    info!(path = %path.display(), entries = table.len(), "Wrote summary cache");
    Ok(())
}

/// Reads the cache at `path`, decompressing by extension.
pub fn load(path: &Path) -> Result<CachedSummary, CacheError> {
    let reader = open_file(path).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cached = decode(BufReader::new(reader))?;

    info!(
        path = %path.display(),
        entries = cached.table.len(),
        created_at = %cached.created_at.to_rfc3339(),
        "Read summary cache"
    );
    Ok(cached)
}
