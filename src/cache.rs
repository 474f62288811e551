//! Publish cache for incremental builds.
//!
//! The public directory is copied verbatim into the output on every build.
//! Videos and phone photos make that copy the slowest part of a rebuild, so
//! this module lets the publish stage skip files whose content has not
//! changed since the last build.
//!
//! # Design
//!
//! The cache is keyed by output path (relative to the output root) and
//! stores the SHA-256 of the source bytes that were last copied there.
//! Content hashes rather than mtimes, so a `git checkout` does not force a
//! full copy.
//!
//! A cache hit requires:
//! 1. An entry for the output path with a matching hash exists
//! 2. The previously-written output file still exists on disk
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.publish-cache.json`, so it
//! travels with the output directory when `dist/` is cached in CI.
//!
//! ## Bypassing the cache
//!
//! `--no-cache` loads an empty manifest, so every file is copied again.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".publish-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk cache manifest mapping output paths to source content hashes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            _ => Self::empty(),
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// True when `output_path` was last written from content with `source_hash`
    /// and the file is still on disk.
    pub fn is_fresh(&self, output_path: &str, source_hash: &str, output_dir: &Path) -> bool {
        self.entries
            .get(output_path)
            .is_some_and(|h| h == source_hash)
            && output_dir.join(output_path).exists()
    }

    /// Record the content hash copied to an output path.
    pub fn insert(&mut self, output_path: String, source_hash: String) {
        self.entries.insert(output_path, source_hash);
    }

    /// Drop entries whose output path is not in `keep`.
    pub fn retain_paths(&mut self, keep: &[String]) {
        self.entries.retain(|path, _| keep.contains(path));
    }
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

/// SHA-256 hash of a byte slice, returned as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Summary of cache performance for a publish run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u32,
    pub copies: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn copy(&mut self) {
        self.copies += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.copies
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} copied ({} total)",
                self.hits,
                self.copies,
                self.total()
            )
        } else {
            write!(f, "{} copied", self.copies)
        }
    }
}

/// Resolve the cache manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
