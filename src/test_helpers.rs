//! Shared test utilities.
//!
//! Builds a small site directory on disk and provides lookups over the
//! scan manifest that panic with a readable message on a miss.
//!
//! ```rust
//! let tmp = setup_site();
//! let manifest = scan(tmp.path()).unwrap();
//! let item = find_media(&manifest, "/projeler/010-cati.jpg");
//! assert_eq!(item.label, "cati");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::MediaItem;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a site directory in a temp dir:
///
/// ```text
/// public/
/// ├── IMG-front.jpg         10x10 photo, keyword match
/// ├── robots.txt            not media
/// ├── window.svg            fallback image
/// ├── fonts/site.woff2      not media
/// └── projeler/
///     ├── 010-cati.jpg      8x6
///     ├── 020-kapi.PNG      upper-case extension
///     └── kaynak.mp4        video
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let public = tmp.path().join("public");

    write_jpeg(&public.join("IMG-front.jpg"), 10, 10);
    write_jpeg(&public.join("projeler/010-cati.jpg"), 8, 6);
    write_png(&public.join("projeler/020-kapi.PNG"), 6, 8);
    write_file(&public.join("projeler/kaynak.mp4"), b"\x00\x00\x00\x18ftypmp42");
    write_file(
        &public.join("window.svg"),
        br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><rect width="16" height="16"/></svg>"#,
    );
    write_file(&public.join("robots.txt"), b"User-agent: *\n");
    write_file(&public.join("fonts/site.woff2"), b"wOF2");
    tmp
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// Write a solid-color PNG regardless of the path's extension casing.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([30, 120, 60]))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

// =========================================================================
// Manifest lookups
// =========================================================================

/// Find a media item by URL. Panics if not found.
pub fn find_media<'a>(manifest: &'a Manifest, src: &str) -> &'a MediaItem {
    find_media_opt(manifest, src).unwrap_or_else(|| {
        let srcs = media_srcs(manifest);
        panic!("media '{src}' not found. Available: {srcs:?}")
    })
}

pub fn find_media_opt<'a>(manifest: &'a Manifest, src: &str) -> Option<&'a MediaItem> {
    manifest.media.iter().find(|m| m.src == src)
}

/// All media URLs in manifest order.
pub fn media_srcs(manifest: &Manifest) -> Vec<&str> {
    manifest.media.iter().map(|m| m.src.as_str()).collect()
}
