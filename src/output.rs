//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! The primary display for every entity (media item, page) is its semantic
//! identity: positional index and label. Filesystem paths are secondary
//! context on indented `Source:` lines, so the output reads as a content
//! inventory while still tracing back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Media
//! 001 cati (image, 8x6)
//!     Source: projeler/010-cati.jpg
//! 002 kaynak (video)
//!     Source: projeler/kaynak.mp4
//!
//! Highlights
//!     Hero: /projeler/010-cati.jpg
//!     Cover: /IMG-front.jpg
//!     Projects: 1
//!
//! Config
//!     config.toml
//!     about.md
//!     public/
//! ```
//!
//! ## Publish
//!
//! ```text
//!     projeler/kaynak.mp4 (12 B): copied
//!     robots.txt: cached
//! ```
//!
//! ## Generate
//!
//! ```text
//! Ana Sayfa → index.html
//! Hakkımızda → about/index.html
//!
//! Assets
//!     _site/style.0123456789.css
//!
//! Generated 5 pages, 3 assets, 4 gallery items
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::publish::PublishEvent;
use crate::scan::Manifest;
use crate::types::{MediaItem, MediaKind};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Byte count in the largest unit that keeps the number above 1.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Media header line: index, label, kind and dimensions when known.
///
/// ```text
/// 001 cati (image, 8x6)
/// 002 kaynak (video)
/// ```
fn media_line(index: usize, item: &MediaItem) -> String {
    let detail = match (item.kind, item.dimensions) {
        (MediaKind::Image, Some((w, h))) => format!("image, {w}x{h}"),
        (kind, _) => kind.as_str().to_string(),
    };
    format!("{} {} ({})", format_index(index), item.label, detail)
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing discovered media and picked highlights.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Media".to_string());
    if manifest.media.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, item) in manifest.media.iter().enumerate() {
        lines.push(media_line(i + 1, item));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            item.src.trim_start_matches('/')
        ));
    }

    lines.push(String::new());
    lines.push("Highlights".to_string());
    let highlights = &manifest.highlights;
    lines.push(format!("{}Hero: {}", indent(1), highlights.hero));
    lines.push(format!("{}Cover: {}", indent(1), highlights.cover));
    lines.push(format!("{}Projects: {}", indent(1), highlights.projects.len()));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if manifest.about.is_some() {
        lines.push(format!("{}about.md", indent(1)));
    }
    lines.push(format!("{}{}/", indent(1), manifest.config.public_dir));

    lines.push(String::new());
    lines.push(format!(
        "Found {} images, {} videos",
        manifest.images().count(),
        manifest.videos().count()
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Publish output
// ============================================================================

/// Format a single publish progress event.
pub fn format_publish_event(event: &PublishEvent) -> String {
    match event {
        PublishEvent::Copied { path, bytes } => {
            format!("{}{} ({}): copied", indent(1), path, format_bytes(*bytes))
        }
        PublishEvent::Cached { path } => format!("{}{}: cached", indent(1), path),
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output: page label → output file, then assets.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (route, file) in &report.pages {
        lines.push(format!("{} \u{2192} {}", route.label(), file));
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    for asset in &report.assets {
        lines.push(format!("{}{}", indent(1), asset));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} assets, {} gallery items",
        report.pages.len(),
        report.assets.len(),
        report.gallery_items
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
