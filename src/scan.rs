//! Media discovery and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the public asset directory, keeps
//! every file whose extension marks it as an image or a video, and picks the
//! media that fills the prominent slots of the site (home hero, home project
//! cards, about cover).
//!
//! ## Directory Structure
//!
//! ```text
//! site/                        # Source root
//! ├── config.toml              # Site configuration (optional)
//! ├── about.md                 # About page intro (optional, markdown)
//! └── public/                  # Served verbatim, scanned recursively
//!     ├── Dükkan.jpg           # Storefront shot → about cover
//!     ├── window.svg           # Fallback image
//!     └── projeler/
//!         ├── 010-cati.jpg     # Numbered files sort first
//!         ├── 020-kapi.webp
//!         └── kaynak.mp4       # Video → gallery only
//! ```
//!
//! ## Ordering
//!
//! Numbered files (`NNN-name.ext`) come first, sorted by number. The rest
//! follow in URL order. The same order drives the gallery grid, the hero
//! pick and the project cards.
//!
//! ## Validation
//!
//! - The public directory must exist.
//! - No file may sit where generated output goes (`_site/`, a route's
//!   `index.html`).
//! - URL paths must be unique (two files can collide after `\` → `/`
//!   normalization on some platforms).
//! - Unreadable image headers are not errors; the item simply has no
//!   dimensions.

use crate::config::{self, MediaConfig, SiteConfig};
use crate::naming;
use crate::types::{self, Highlights, MediaItem, MediaKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Public directory not found: {0}")]
    MissingPublicDir(PathBuf),
    #[error("Two files map to the same URL: {0}")]
    DuplicateSource(String),
    #[error("Public file collides with generated output: {0}")]
    ReservedPath(String),
}

/// Manifest output from the scan stage, consumed by generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub media: Vec<MediaItem>,
    pub highlights: Highlights,
    /// Raw markdown from `about.md`, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn images(&self) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(|m| m.is_image())
    }

    pub fn videos(&self) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(|m| m.kind == MediaKind::Video)
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let public_dir = root.join(&config.public_dir);
    if !public_dir.is_dir() {
        return Err(ScanError::MissingPublicDir(public_dir));
    }

    let media = discover_media(&public_dir, &config.media)?;
    let highlights = pick_highlights(&media, &config);
    let about = read_about(root)?;

    Ok(Manifest {
        media,
        highlights,
        about,
        config,
    })
}

/// Walk `public_dir` and return every recognized media file in display order.
pub fn discover_media(public_dir: &Path, rules: &MediaConfig) -> Result<Vec<MediaItem>, ScanError> {
    let mut seen = HashSet::new();
    let mut media = Vec::new();

    let walker = WalkDir::new(public_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(public_dir) else {
            continue;
        };
        if types::is_reserved_output(&url_path(rel)) {
            return Err(ScanError::ReservedPath(rel.display().to_string()));
        }
        let Some(kind) = classify(path, rules) else {
            continue;
        };

        let src = url_path(rel);
        if !seen.insert(src.clone()) {
            return Err(ScanError::DuplicateSource(src));
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| name.clone());
        let parsed = naming::parse_entry_name(&stem);
        let dimensions = match kind {
            MediaKind::Image => read_dimensions(path),
            MediaKind::Video => None,
        };

        media.push(MediaItem {
            src,
            kind,
            label: naming::display_label(&stem),
            name,
            number: parsed.number,
            dimensions,
        });
    }

    media.sort_by(|a, b| {
        (a.number.unwrap_or(u32::MAX), &a.src).cmp(&(b.number.unwrap_or(u32::MAX), &b.src))
    });
    Ok(media)
}

/// Classify a file by its extension (case-insensitive).
pub fn classify(path: &Path, rules: &MediaConfig) -> Option<MediaKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let matches = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(&ext));
    if matches(&rules.image_extensions) {
        Some(MediaKind::Image)
    } else if matches(&rules.video_extensions) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Raster header dimensions; `None` for SVG or unreadable files.
fn read_dimensions(path: &Path) -> Option<(u32, u32)> {
    let is_svg = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        return None;
    }
    image::image_dimensions(path).ok()
}

/// Build the URL path for a file relative to the public dir.
///
/// Components are joined with `/` and characters that would break a URL
/// (space, `#`, `?`, `%`) are percent-encoded. Non-ASCII is left as-is.
pub fn url_path(rel: &Path) -> String {
    let mut url = String::new();
    for component in rel.components() {
        url.push('/');
        for c in component.as_os_str().to_string_lossy().chars() {
            match c {
                ' ' => url.push_str("%20"),
                '#' => url.push_str("%23"),
                '?' => url.push_str("%3F"),
                '%' => url.push_str("%25"),
                other => url.push(other),
            }
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

/// Choose hero, project and cover media.
pub fn pick_highlights(media: &[MediaItem], config: &SiteConfig) -> Highlights {
    let fallback = &config.media.fallback_image;
    let images: Vec<&MediaItem> = media.iter().filter(|m| m.is_image()).collect();

    let hero = images
        .first()
        .map(|m| m.src.clone())
        .unwrap_or_else(|| fallback.clone());

    let projects = images
        .iter()
        .take(config.home.project_count)
        .map(|m| m.src.clone())
        .collect();

    let cover = pick_cover(&images, &config.media).unwrap_or_else(|| fallback.clone());

    Highlights {
        hero,
        cover,
        projects,
    }
}

/// Pick the about-page cover: a storefront name wins outright, otherwise
/// the best-scoring image. Ties keep media order.
fn pick_cover(images: &[&MediaItem], rules: &MediaConfig) -> Option<String> {
    let by_name = images
        .iter()
        .copied()
        .find(|m| is_photo(m, rules) && is_cover_name(m, rules));
    if let Some(m) = by_name {
        return Some(m.src.clone());
    }

    let mut scored: Vec<(u32, &MediaItem)> = images
        .iter()
        .map(|m| (cover_score(m, rules), *m))
        .collect();
    // sort_by is stable, so equal scores keep media order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.first().map(|(_, m)| m.src.clone())
}

fn is_photo(item: &MediaItem, rules: &MediaConfig) -> bool {
    let ext = item.extension();
    rules
        .photo_extensions
        .iter()
        .any(|e| e.eq_ignore_ascii_case(&ext))
}

fn is_cover_name(item: &MediaItem, rules: &MediaConfig) -> bool {
    let stem = item
        .name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&item.name)
        .to_lowercase();
    rules.cover_names.iter().any(|n| n.to_lowercase() == stem)
}

/// +2 for a photo-like format, +3 for a name that looks like a shop photo.
fn cover_score(item: &MediaItem, rules: &MediaConfig) -> u32 {
    let name = item.name.to_lowercase();
    let mut score = 0;
    if is_photo(item, rules) {
        score += 2;
    }
    if rules
        .cover_keywords
        .iter()
        .any(|k| name.contains(&k.to_lowercase()))
    {
        score += 3;
    }
    score
}

/// Read `about.md` from the source root. Empty files count as absent.
fn read_about(root: &Path) -> Result<Option<String>, ScanError> {
    let path = root.join("about.md");
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}
