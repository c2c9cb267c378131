//! Per-analyzer result cache.
//!
//! Two files per analyzer under the project-local cache directory:
//! `<id>-meta.json` (path set, timestamp, tool version) and `<id>.data`
//! (raw analyzer output, opaque). The data file is written before the
//! metadata file, so metadata is only trustworthy when both exist and
//! parse. Anything stale or corrupt is deleted on sight and reported as a
//! miss — a corrupt cache is never served.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use lintmux_core::config::PRUNED_DIR_NAMES;
use lintmux_core::errors::CacheError;

/// Persisted cache metadata for one analyzer.
#[derive(Debug, Serialize, Deserialize)]
struct CacheMetadata {
    /// The exact path set the raw output was produced from, sorted.
    paths: Vec<String>,
    /// Seconds since the epoch when the producing run started reading its
    /// inputs. A file modified during a slow run lands at or past this.
    timestamp: f64,
    /// Version of the running tool that produced the entry.
    version: String,
}

/// On-disk run cache keyed by path set and newest observed mtime.
#[derive(Debug)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    /// Open (creating if needed) a cache directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| CacheError::DirectoryUnwritable {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Fetch cached raw output for `tool_id`, or `None` on a miss.
    ///
    /// A hit requires: both files exist and parse, the recorded version
    /// equals the running version, the recorded path set equals the
    /// requested one (unordered), and no file under any requested path has
    /// an mtime at or past the recorded timestamp. Any violation deletes
    /// the entry and misses.
    pub fn get(&self, tool_id: &str, version: &str, paths: &BTreeSet<PathBuf>) -> Option<String> {
        let meta_path = self.meta_path(tool_id);
        let data_path = self.data_path(tool_id);

        if !meta_path.exists() || !data_path.exists() {
            self.invalidate(tool_id);
            return None;
        }

        let meta: CacheMetadata = match std::fs::read_to_string(&meta_path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
        {
            Some(meta) => meta,
            None => {
                tracing::warn!(tool = tool_id, "corrupt cache metadata, healing");
                self.invalidate(tool_id);
                return None;
            }
        };

        if meta.version != version {
            tracing::debug!(
                tool = tool_id,
                cached = %meta.version,
                running = version,
                "cache version mismatch"
            );
            self.invalidate(tool_id);
            return None;
        }

        let requested: BTreeSet<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let recorded: BTreeSet<String> = meta.paths.iter().cloned().collect();
        if requested != recorded {
            tracing::debug!(tool = tool_id, "cache path set mismatch");
            self.invalidate(tool_id);
            return None;
        }

        let stale = paths
            .par_iter()
            .any(|path| modified_since(path, meta.timestamp));
        if stale {
            tracing::debug!(tool = tool_id, "cache inputs modified");
            self.invalidate(tool_id);
            return None;
        }

        match std::fs::read_to_string(&data_path) {
            Ok(raw) => {
                tracing::debug!(tool = tool_id, "cache hit");
                Some(raw)
            }
            Err(e) => {
                tracing::warn!(tool = tool_id, error = %e, "unreadable cache data, healing");
                self.invalidate(tool_id);
                None
            }
        }
    }

    /// Store raw output for `tool_id`. Any prior entry is deleted first;
    /// the data file is written before the metadata file so a crash
    /// between the two leaves a self-healing partial entry, not a lie.
    ///
    /// `started` is the instant the producing run began reading its
    /// inputs, not the time of this call: recording the earlier instant
    /// means a file modified while the run was in flight still invalidates
    /// the entry.
    pub fn put(
        &self,
        tool_id: &str,
        version: &str,
        paths: &BTreeSet<PathBuf>,
        raw_output: &str,
        started: SystemTime,
    ) -> Result<(), CacheError> {
        self.invalidate(tool_id);

        let data_path = self.data_path(tool_id);
        std::fs::write(&data_path, raw_output).map_err(|e| CacheError::WriteFailed {
            tool: tool_id.to_string(),
            message: e.to_string(),
        })?;

        let meta = CacheMetadata {
            paths: paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            timestamp: secs_since_epoch(started),
            version: version.to_string(),
        };
        let text = serde_json::to_string(&meta).map_err(|e| CacheError::WriteFailed {
            tool: tool_id.to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(self.meta_path(tool_id), text).map_err(|e| CacheError::WriteFailed {
            tool: tool_id.to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// Delete both files for `tool_id`. Missing files are fine.
    pub fn invalidate(&self, tool_id: &str) {
        for path in [self.meta_path(tool_id), self.data_path(tool_id)] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "cache cleanup failed");
                }
            }
        }
    }

    fn meta_path(&self, tool_id: &str) -> PathBuf {
        self.dir.join(format!("{tool_id}-meta.json"))
    }

    fn data_path(&self, tool_id: &str) -> PathBuf {
        self.dir.join(format!("{tool_id}.data"))
    }
}

/// True iff any file at or under `path` has an mtime at or past
/// `timestamp`. Walks with the fixed pruned directory names; anything
/// unreadable counts as modified (the cautious answer).
fn modified_since(path: &Path, timestamp: f64) -> bool {
    let walk = walkdir::WalkDir::new(path).into_iter().filter_entry(|e| {
        !e.file_type().is_dir()
            || e.file_name()
                .to_str()
                .map(|name| !PRUNED_DIR_NAMES.contains(&name))
                .unwrap_or(true)
    });

    for item in walk {
        let dent = match item {
            Ok(d) => d,
            Err(_) => return true,
        };
        let mtime = match dent.metadata().ok().and_then(|m| m.modified().ok()) {
            Some(t) => t,
            None => return true,
        };
        if secs_since_epoch(mtime) >= timestamp {
            return true;
        }
    }
    false
}

fn secs_since_epoch(t: SystemTime) -> f64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
