//! Shared types used across pipeline stages.
//!
//! The scan manifest is serialized to JSON between the scan and generate
//! stages, so everything here round-trips through serde.

use serde::{Deserialize, Serialize};

/// Detected kind of a media file, decided by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// A media descriptor: one discovered asset in the public directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// URL path rooted at `/` (e.g. `/projeler/010-kapi.jpg`)
    pub src: String,
    pub kind: MediaKind,
    /// Original file name including extension
    pub name: String,
    /// Display label derived from the filename
    pub label: String,
    /// Sort key from an `NNN-` prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Pixel dimensions read from the raster header, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

impl MediaItem {
    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    /// Lower-cased file extension without the dot.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    /// MIME type for `<source type=..>` on videos.
    pub fn mime_type(&self) -> String {
        let ext = self.extension();
        match (self.kind, ext.as_str()) {
            (MediaKind::Video, "mp4") => "video/mp4".to_string(),
            (MediaKind::Video, "webm") => "video/webm".to_string(),
            (MediaKind::Video, "ogg") => "video/ogg".to_string(),
            (MediaKind::Video, other) => format!("video/{other}"),
            (MediaKind::Image, "jpg") => "image/jpeg".to_string(),
            (MediaKind::Image, "svg") => "image/svg+xml".to_string(),
            (MediaKind::Image, other) => format!("image/{other}"),
        }
    }
}

/// Media picked at scan time for the prominent slots on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    /// Home page hero background
    pub hero: String,
    /// About page cover image
    pub cover: String,
    /// Home page project cards, in media order
    pub projects: Vec<String>,
}

/// A page of the site. Each route renders to `<slug>/index.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Services,
    Gallery,
    Contact,
}

impl Route {
    /// Navigation order.
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::About,
        Route::Services,
        Route::Gallery,
        Route::Contact,
    ];

    /// URL path used in links.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Services => "/services",
            Route::Gallery => "/gallery",
            Route::Contact => "/contact",
        }
    }

    /// Output file relative to the output root.
    pub fn output_file(self) -> String {
        match self {
            Route::Home => "index.html".to_string(),
            other => format!("{}/index.html", other.path().trim_start_matches('/')),
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Ana Sayfa",
            Route::About => "Hakkımızda",
            Route::Services => "Hizmetler",
            Route::Gallery => "Galeri",
            Route::Contact => "İletişim",
        }
    }
}

/// Output directory for generated, fingerprinted assets.
pub const ASSET_DIR: &str = "_site";

/// True when a public file at `rel` (slash-separated, relative to the
/// output root) would collide with generated output: anything under
/// [`ASSET_DIR`] or a route's `index.html`. Compared case-insensitively
/// so the check also holds on case-insensitive filesystems.
pub fn is_reserved_output(rel: &str) -> bool {
    let rel = rel.trim_start_matches('/').to_lowercase();
    let in_asset_dir = rel
        .strip_prefix(ASSET_DIR)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    in_asset_dir || Route::ALL.iter().any(|r| r.output_file() == rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            src: format!("/{name}"),
            kind,
            name: name.to_string(),
            label: name.to_string(),
            number: None,
            dimensions: None,
        }
    }

    #[test]
    fn route_output_files() {
        assert_eq!(Route::Home.output_file(), "index.html");
        assert_eq!(Route::Gallery.output_file(), "gallery/index.html");
        assert_eq!(Route::Contact.path(), "/contact");
    }

    #[test]
    fn reserved_outputs() {
        assert!(is_reserved_output("_site/logo.png"));
        assert!(is_reserved_output("_SITE/style.css"));
        assert!(is_reserved_output("index.html"));
        assert!(is_reserved_output("gallery/index.html"));
        assert!(is_reserved_output("/About/Index.html"));

        assert!(!is_reserved_output("_site_old/logo.png"));
        assert!(!is_reserved_output("about/cover.jpg"));
        assert!(!is_reserved_output("projeler/index.html"));
        assert!(!is_reserved_output("robots.txt"));
    }

    #[test]
    fn video_mime_types() {
        assert_eq!(item("a.MP4", MediaKind::Video).mime_type(), "video/mp4");
        assert_eq!(item("a.ogg", MediaKind::Video).mime_type(), "video/ogg");
        assert_eq!(item("a.svg", MediaKind::Image).mime_type(), "image/svg+xml");
    }

    #[test]
    fn media_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
    }
}
