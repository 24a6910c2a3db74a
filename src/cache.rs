//! Bulk card snapshot download and local cache.
//!
//! Fetches the bulk-data index, compares the snapshot's `updated_at`
//! stamp against the local copy, and re-downloads when stale. The
//! snapshot is stored gzip-compressed; DuckDB reads the compressed file
//! directly.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config;
use crate::error::{DeckstackError, Result};

/// One snapshot descriptor from the bulk-data index.
#[derive(Debug, Clone, Deserialize)]
struct BulkEntry {
    #[serde(rename = "type")]
    kind: String,
    updated_at: String,
    download_uri: String,
}

#[derive(Debug, Deserialize)]
struct BulkIndex {
    data: Vec<BulkEntry>,
}

/// Downloads and caches the bulk card snapshot.
///
/// The snapshot is fetched lazily on first access and re-fetched when the
/// remote `updated_at` stamp moves past the cached one.
pub struct SnapshotCache {
    /// Directory where the snapshot and its stamp are stored.
    pub cache_dir: PathBuf,
    /// If true, never touch the network (use cached files only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
    remote: Option<BulkEntry>,
}

impl SnapshotCache {
    /// Create a new snapshot cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default
    /// cache directory. Creates the directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            timeout,
            client: None,
            remote: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> &Client {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()
                    .expect("failed to build HTTP client"),
            );
        }
        self.client.as_ref().unwrap()
    }

    /// Local path of the cached snapshot (whether or not it exists yet).
    pub fn snapshot_path(&self) -> PathBuf {
        self.cache_dir.join(config::SNAPSHOT_FILE)
    }

    /// Read the locally cached `updated_at` stamp.
    pub fn local_stamp(&self) -> Option<String> {
        let stamp_file = self.cache_dir.join(config::STAMP_FILE);
        if stamp_file.exists() {
            fs::read_to_string(&stamp_file)
                .ok()
                .map(|s| s.trim().to_string())
        } else {
            None
        }
    }

    /// Save an `updated_at` stamp next to the snapshot.
    fn save_stamp(&self, stamp: &str) {
        let stamp_file = self.cache_dir.join(config::STAMP_FILE);
        let _ = fs::write(stamp_file, stamp);
    }

    /// Fetch the snapshot descriptor from the bulk-data index.
    ///
    /// Returns `None` if offline or the index is unreachable. Caches the
    /// result for subsequent calls.
    fn remote_entry(&mut self) -> Result<Option<BulkEntry>> {
        if self.remote.is_some() {
            return Ok(self.remote.clone());
        }
        if self.offline {
            return Ok(None);
        }
        let client = self.client().clone();
        match client.get(config::BULK_INDEX_URL).send() {
            Ok(resp) => {
                let resp = resp.error_for_status()?;
                let index: BulkIndex = resp.json()?;
                let entry = index
                    .data
                    .into_iter()
                    .find(|e| e.kind == config::SNAPSHOT_KIND);
                if entry.is_none() {
                    eprintln!(
                        "Bulk-data index has no '{}' snapshot",
                        config::SNAPSHOT_KIND
                    );
                }
                self.remote = entry.clone();
                Ok(entry)
            }
            Err(e) => {
                eprintln!("Failed to fetch bulk-data index: {}", e);
                Ok(None)
            }
        }
    }

    /// The remote snapshot's `updated_at` stamp, if reachable.
    pub fn remote_stamp(&mut self) -> Result<Option<String>> {
        Ok(self.remote_entry()?.map(|e| e.updated_at))
    }

    /// Check if the local snapshot is out of date.
    ///
    /// Returns `true` if there is no local copy or the remote carries a
    /// different stamp. Returns `false` if up to date or the index is
    /// unreachable.
    pub fn is_stale(&mut self) -> Result<bool> {
        match self.local_stamp() {
            None => Ok(true),
            Some(local) => match self.remote_stamp()? {
                None => Ok(false), // Can't check, assume fresh
                Some(remote) => Ok(local != remote),
            },
        }
    }

    /// Download the snapshot, recompressing to the local `.json.gz`.
    ///
    /// Streams to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt snapshot behind.
    fn download_snapshot(&mut self, entry: &BulkEntry) -> Result<()> {
        let dest = self.snapshot_path();
        eprintln!("Downloading card snapshot {}", entry.download_uri);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension("gz.tmp");

        let client = self.client().clone();
        let result = (|| -> Result<()> {
            let mut resp = client
                .get(&entry.download_uri)
                .send()?
                .error_for_status()?;
            let file = fs::File::create(&tmp_dest)?;
            let mut encoder = GzEncoder::new(file, Compression::default());
            io::copy(&mut resp, &mut encoder)?;
            encoder.finish()?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Ensure the snapshot is cached locally, downloading if needed.
    ///
    /// # Returns
    ///
    /// Local filesystem path to the cached snapshot.
    pub fn ensure_snapshot(&mut self) -> Result<PathBuf> {
        let local_path = self.snapshot_path();

        if !local_path.exists() || self.is_stale()? {
            if self.offline {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(DeckstackError::NotFound(format!(
                    "Snapshot {} not cached and offline mode is enabled",
                    config::SNAPSHOT_FILE
                )));
            }
            let entry = self.remote_entry()?.ok_or_else(|| {
                DeckstackError::NotFound(
                    "Bulk-data index unreachable and no snapshot cached".to_string(),
                )
            })?;
            self.download_snapshot(&entry)?;
            self.save_stamp(&entry.updated_at);
        }

        Ok(local_path)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
