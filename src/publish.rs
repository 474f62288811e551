//! Verbatim asset publishing.
//!
//! Stage 2 of the build pipeline. Every non-hidden file under the public
//! directory is copied to the same relative path in the output root: images,
//! videos, icons, fonts, `robots.txt`, anything. Pages reference media by the
//! same URL paths the scan stage recorded, so the copy must stay verbatim.
//!
//! ## Incremental copies
//!
//! Source files are hashed and compared against the [`CacheManifest`] in the
//! output directory; unchanged files whose output still exists are skipped.
//!
//! ## Parallel Processing
//!
//! Files are hashed and copied in parallel using [rayon](https://docs.rs/rayon).
//! Progress events are sent over an optional channel so the CLI can print as
//! files complete.

use crate::cache::{self, CacheManifest, CacheStats};
use crate::types;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Public directory not found: {0}")]
    MissingPublicDir(PathBuf),
    #[error("Public file collides with generated output: {0}")]
    ReservedPath(String),
}

/// Progress of a single file.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishEvent {
    /// Content changed (or no cache); file written.
    Copied { path: String, bytes: u64 },
    /// Output already up to date.
    Cached { path: String },
}

#[derive(Debug)]
pub struct PublishResult {
    /// Output-relative paths of every published file, sorted.
    pub files: Vec<String>,
    pub cache_stats: CacheStats,
}

/// Copy `public_dir` into `output_dir`.
pub fn publish(
    public_dir: &Path,
    output_dir: &Path,
    use_cache: bool,
    progress: Option<Sender<PublishEvent>>,
) -> Result<PublishResult, PublishError> {
    if !public_dir.is_dir() {
        return Err(PublishError::MissingPublicDir(public_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir)?;

    let sources = collect_sources(public_dir)?;
    let mut manifest = if use_cache {
        CacheManifest::load(output_dir)
    } else {
        CacheManifest::empty()
    };

    let outcomes: Vec<(String, String, bool)> = sources
        .par_iter()
        .map(|(rel, src)| -> Result<(String, String, bool), PublishError> {
            let hash = cache::hash_file(src)?;
            if manifest.is_fresh(rel, &hash, output_dir) {
                if let Some(tx) = &progress {
                    tx.send(PublishEvent::Cached { path: rel.clone() }).ok();
                }
                return Ok((rel.clone(), hash, false));
            }
            let dst = output_dir.join(rel);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            let bytes = fs::copy(src, &dst)?;
            if let Some(tx) = &progress {
                tx.send(PublishEvent::Copied {
                    path: rel.clone(),
                    bytes,
                })
                .ok();
            }
            Ok((rel.clone(), hash, true))
        })
        .collect::<Result<_, _>>()?;

    let mut stats = CacheStats::default();
    let mut files = Vec::with_capacity(outcomes.len());
    for (rel, hash, copied) in outcomes {
        if copied {
            stats.copy();
        } else {
            stats.hit();
        }
        manifest.insert(rel.clone(), hash);
        files.push(rel);
    }
    files.sort();
    manifest.retain_paths(&files);
    manifest.save(output_dir)?;

    Ok(PublishResult {
        files,
        cache_stats: stats,
    })
}

/// Non-hidden files under `public_dir` as `(output-relative path, source path)`.
/// Fails before anything is copied if a file sits on a generated output path.
fn collect_sources(public_dir: &Path) -> Result<Vec<(String, PathBuf)>, PublishError> {
    let mut sources = Vec::new();
    let walker = WalkDir::new(public_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(public_dir) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");
        if types::is_reserved_output(&rel) {
            return Err(PublishError::ReservedPath(rel));
        }
        sources.push((rel, entry.path().to_path_buf()));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn copies_every_public_file_verbatim() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let result = publish(&site.path().join("public"), out.path(), true, None).unwrap();

        assert!(result.files.contains(&"robots.txt".to_string()));
        assert!(result.files.contains(&"fonts/site.woff2".to_string()));
        assert!(result.files.contains(&"projeler/kaynak.mp4".to_string()));
        assert_eq!(
            fs::read(out.path().join("projeler/kaynak.mp4")).unwrap(),
            fs::read(site.path().join("public/projeler/kaynak.mp4")).unwrap()
        );
        assert_eq!(result.cache_stats.hits, 0);
        assert_eq!(result.cache_stats.copies as usize, result.files.len());
    }

    #[test]
    fn second_run_is_fully_cached() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let public = site.path().join("public");
        publish(&public, out.path(), true, None).unwrap();
        let second = publish(&public, out.path(), true, None).unwrap();

        assert_eq!(second.cache_stats.copies, 0);
        assert_eq!(second.cache_stats.hits as usize, second.files.len());
    }

    #[test]
    fn changed_file_is_copied_again() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let public = site.path().join("public");
        publish(&public, out.path(), true, None).unwrap();

        fs::write(public.join("robots.txt"), "User-agent: *\nDisallow: /\n").unwrap();
        let second = publish(&public, out.path(), true, None).unwrap();

        assert_eq!(second.cache_stats.copies, 1);
        assert!(
            fs::read_to_string(out.path().join("robots.txt"))
                .unwrap()
                .contains("Disallow")
        );
    }

    #[test]
    fn no_cache_copies_everything() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let public = site.path().join("public");
        publish(&public, out.path(), true, None).unwrap();
        let second = publish(&public, out.path(), false, None).unwrap();

        assert_eq!(second.cache_stats.hits, 0);
    }

    #[test]
    fn hidden_files_are_not_published() {
        let site = setup_site();
        write_file(&site.path().join("public/.DS_Store"), b"junk");
        let out = TempDir::new().unwrap();
        let result = publish(&site.path().join("public"), out.path(), true, None).unwrap();

        assert!(!result.files.iter().any(|f| f.contains(".DS_Store")));
        assert!(!out.path().join(".DS_Store").exists());
    }

    #[test]
    fn progress_events_are_sent() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let result = publish(&site.path().join("public"), out.path(), true, Some(tx)).unwrap();

        let events: Vec<PublishEvent> = rx.iter().collect();
        assert_eq!(events.len(), result.files.len());
        assert!(
            events
                .iter()
                .all(|e| matches!(e, PublishEvent::Copied { .. }))
        );
    }

    #[test]
    fn missing_public_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let result = publish(&tmp.path().join("public"), tmp.path(), true, None);
        assert!(matches!(result, Err(PublishError::MissingPublicDir(_))));
    }

    #[test]
    fn reserved_paths_fail_before_copying() {
        let site = setup_site();
        write_file(&site.path().join("public/_site/logo.png"), b"png");
        let out = TempDir::new().unwrap();
        let result = publish(&site.path().join("public"), out.path(), true, None);

        assert!(matches!(result, Err(PublishError::ReservedPath(p)) if p == "_site/logo.png"));
        assert!(!out.path().join("robots.txt").exists());
    }
}
