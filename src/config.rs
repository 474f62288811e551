//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! carry the business's published details, so a site directory with nothing
//! but a `public/` folder already builds the full website. A `config.toml`
//! in the source root overrides any subset of keys:
//!
//! ```toml
//! # Only change the phone number
//! [contact]
//! phone = "+905550000000"
//! phone_display = "+90 555 000 0000"
//! ```
//!
//! Tables merge key by key; arrays (such as `services` or the extension
//! lists) replace the stock value entirely. Unknown keys are rejected to
//! catch typos early.
//!
//! Run `yesilada-site gen-config` for a fully documented file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Asset directory inside the source root, served verbatim and scanned for media.
    pub public_dir: String,
    /// Business name, tagline, page language.
    pub site: SiteInfo,
    /// Phone, email, address and map links.
    pub contact: ContactConfig,
    /// Home page copy and project card count.
    pub home: HomeConfig,
    /// About page copy.
    pub about: AboutConfig,
    /// Service cards, in display order.
    pub services: Vec<ServiceConfig>,
    /// Media discovery rules.
    pub media: MediaConfig,
    /// Gallery lightbox behavior.
    pub lightbox: LightboxConfig,
    /// Color palette.
    pub colors: ColorConfig,
    /// Parallel asset publishing.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            site: SiteInfo::default(),
            contact: ContactConfig::default(),
            home: HomeConfig::default(),
            about: AboutConfig::default(),
            services: default_services(),
            media: MediaConfig::default(),
            lightbox: LightboxConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// Upper bound on home page project cards.
const MAX_PROJECT_COUNT: usize = 24;

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lb = &self.lightbox;
        let numbers = [
            ("min_zoom", lb.min_zoom),
            ("max_zoom", lb.max_zoom),
            ("zoom_step", lb.zoom_step),
            ("wheel_sensitivity", lb.wheel_sensitivity),
            ("double_tap_zoom", lb.double_tap_zoom),
            ("swipe_threshold", lb.swipe_threshold),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "lightbox.{name} must be a finite number"
            )));
        }
        if lb.wheel_sensitivity < 0.0 {
            return Err(ConfigError::Validation(
                "lightbox.wheel_sensitivity must not be negative".into(),
            ));
        }
        if lb.min_zoom <= 0.0 {
            return Err(ConfigError::Validation(
                "lightbox.min_zoom must be greater than 0".into(),
            ));
        }
        if lb.max_zoom < lb.min_zoom {
            return Err(ConfigError::Validation(
                "lightbox.max_zoom must be >= lightbox.min_zoom".into(),
            ));
        }
        if lb.zoom_step <= 1.0 {
            return Err(ConfigError::Validation(
                "lightbox.zoom_step must be greater than 1".into(),
            ));
        }
        if lb.swipe_threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "lightbox.swipe_threshold must be greater than 0".into(),
            ));
        }
        if lb.double_tap_zoom < lb.min_zoom || lb.double_tap_zoom > lb.max_zoom {
            return Err(ConfigError::Validation(
                "lightbox.double_tap_zoom must lie between min_zoom and max_zoom".into(),
            ));
        }
        if self.home.project_count > MAX_PROJECT_COUNT {
            return Err(ConfigError::Validation(format!(
                "home.project_count must be at most {MAX_PROJECT_COUNT}"
            )));
        }
        if self.media.image_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "media.image_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self.media.image_extensions.iter().find(|e| {
            self.media
                .video_extensions
                .iter()
                .any(|v| v.eq_ignore_ascii_case(e))
        }) {
            return Err(ConfigError::Validation(format!(
                "extension '{ext}' is listed as both image and video"
            )));
        }
        if !self.contact.email.contains('@') {
            return Err(ConfigError::Validation(
                "contact.email must be an email address".into(),
            ));
        }
        Ok(())
    }
}

/// Business identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    /// `lang` attribute of every page.
    pub lang: String,
    /// `<meta name="description">` content.
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Yeşilada Demircilik".to_string(),
            tagline: "Güçlü Yapılar, Sağlam Çözümler".to_string(),
            lang: "tr".to_string(),
            description: "Demir kesim, kaynak, çelik konstrüksiyon ve özel demir tasarımları."
                .to_string(),
        }
    }
}

/// Contact details shown on the home and contact pages and in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Dialable number for the `tel:` link.
    pub phone: String,
    /// Number as displayed.
    pub phone_display: String,
    pub email: String,
    /// Address, one entry per line.
    pub address: Vec<String>,
    /// Link that opens the business in a maps service.
    pub maps_url: String,
    /// Embeddable maps URL for the contact page iframe.
    pub maps_embed_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+905418692080".to_string(),
            phone_display: "+90 541 869 2080".to_string(),
            email: "bakikuluz@gmail.com".to_string(),
            address: vec![
                "Kızılpınar Atatürk, 69. Sk No:6, 59500".to_string(),
                "Çerkezköy / Tekirdağ".to_string(),
            ],
            maps_url: "https://maps.google.com/maps?hl=tr&gl=tr&um=1&ie=UTF-8&fb=1&sa=X&ftid=0x14b5270003e3fd49:0x78af6a698e885299".to_string(),
            maps_embed_url: "https://www.google.com/maps?q=Cerkezkoy%20Ye%C5%9FilAda%20Demircilik&output=embed".to_string(),
        }
    }
}

/// Home page copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Paragraph in the "about us" band.
    pub summary: String,
    /// Number of project cards.
    pub project_count: usize,
    /// Caption under every project card.
    pub project_caption: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            summary: "Demir kesim, kaynak, çelik konstrüksiyon ve demircilik alanlarında tecrübeli \
                      ekibimizle endüstriyel ve mimari projelerinize profesyonel çözümler sunuyoruz. \
                      Dayanıklılık, hassas işçilik ve zamanında teslimat temel değerlerimizdir."
                .to_string(),
            project_count: 6,
            project_caption: "Endüstriyel çelik konstrüksiyon uygulaması".to_string(),
        }
    }
}

/// About page copy. A root-level `about.md` replaces `intro`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AboutConfig {
    pub intro: String,
    pub why_title: String,
    pub reasons: Vec<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            intro: "Yeşil Ada Demircilik; çatı ve çelik kaplama, çelik konstrüksiyon, kesim ve \
                    kaynak işlerinde güvenilir çözüm ortağınızdır. Deneyimli ekibimizle dayanıklı \
                    ve estetik uygulamalar sunuyoruz."
                .to_string(),
            why_title: "Neden Yeşil Ada?".to_string(),
            reasons: vec![
                "Uzman kadro ve titiz işçilik".to_string(),
                "Zamanında teslim ve şeffaf süreç".to_string(),
                "Endüstriyel ve mimari ihtiyaçlara uygun çözümler".to_string(),
            ],
        }
    }
}

/// Icon drawn next to a service title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceIcon {
    Industry,
    Gears,
    Wrench,
    Hammer,
}

/// One service card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
}

fn default_services() -> Vec<ServiceConfig> {
    let service = |title: &str, description: &str, icon| ServiceConfig {
        title: title.to_string(),
        description: description.to_string(),
        icon,
    };
    vec![
        service(
            "Demir Kesim",
            "CNC, lazer ve plazma ile hassas kesim",
            ServiceIcon::Industry,
        ),
        service(
            "Çelik Konstrüksiyon",
            "Sanayi tesisleri, platformlar, çatı sistemleri",
            ServiceIcon::Gears,
        ),
        service(
            "Kaynak İşleri",
            "MIG/TIG/Elektrod kaynak ve montaj",
            ServiceIcon::Wrench,
        ),
        service(
            "Özel Demir Tasarımları",
            "Korkuluk, kapı, ferforje, mimari uygulamalar",
            ServiceIcon::Hammer,
        ),
    ]
}

/// Media discovery rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Extensions classified as images (case-insensitive, no dot).
    pub image_extensions: Vec<String>,
    /// Extensions classified as videos.
    pub video_extensions: Vec<String>,
    /// Photo-like image extensions preferred for the about cover.
    pub photo_extensions: Vec<String>,
    /// File stems that win the about cover outright (storefront shots).
    pub cover_names: Vec<String>,
    /// Substrings that make a file a likely cover candidate.
    pub cover_keywords: Vec<String>,
    /// Image used when no media is found.
    pub fallback_image: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            image_extensions: strings(&["jpg", "jpeg", "png", "webp", "gif", "svg"]),
            video_extensions: strings(&["mp4", "webm", "ogg"]),
            photo_extensions: strings(&["jpg", "jpeg", "png", "webp"]),
            cover_names: strings(&["dukkan", "dükkan"]),
            cover_keywords: strings(&[
                "img", "wa", "front", "store", "dukkan", "dükkan", "yesil", "ada",
            ]),
            fallback_image: "/window.svg".to_string(),
        }
    }
}

/// Gallery lightbox behavior, shared by the Rust model and the shipped script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Smallest zoom factor (fit to screen).
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Multiplier per zoom-in key press or button click.
    pub zoom_step: f64,
    /// Exponential zoom per wheel delta pixel.
    pub wheel_sensitivity: f64,
    /// Zoom factor reached by double click / double tap.
    pub double_tap_zoom: f64,
    /// Minimum horizontal travel in pixels for a swipe to navigate.
    pub swipe_threshold: f64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 4.0,
            zoom_step: 1.25,
            wheel_sensitivity: 0.0015,
            double_tap_zoom: 2.0,
            swipe_threshold: 60.0,
        }
    }
}

/// Color palette, emitted as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background.
    pub background: String,
    /// Dark bands (home about section, footer).
    pub surface: String,
    /// Card background.
    pub card: String,
    /// Text on cards.
    pub card_text: String,
    /// Primary text on the page background.
    pub text: String,
    /// Muted text (footer, descriptions).
    pub text_muted: String,
    pub border: String,
    /// Buttons, icons, focus rings.
    pub accent: String,
    /// Translucent navbar background.
    pub header: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            surface: "#111827".to_string(),
            card: "#ffffff".to_string(),
            card_text: "#000000".to_string(),
            text: "#ffffff".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1f2937".to_string(),
            accent: "#dc2626".to_string(),
            header: "rgba(255, 255, 255, 0.8)".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel asset copy workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Yeşilada site configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Tables merge key by key; arrays replace the default list entirely.
# Unknown keys will cause an error.

# Directory inside the source root that is copied verbatim to the output
# and scanned for images and videos.
public_dir = "public"

[site]
name = "Yeşilada Demircilik"
tagline = "Güçlü Yapılar, Sağlam Çözümler"
lang = "tr"
description = "Demir kesim, kaynak, çelik konstrüksiyon ve özel demir tasarımları."

# ---------------------------------------------------------------------------
# Contact details (home, contact page, footer)
# ---------------------------------------------------------------------------
[contact]
phone = "+905418692080"          # used in the tel: link
phone_display = "+90 541 869 2080"
email = "bakikuluz@gmail.com"
address = ["Kızılpınar Atatürk, 69. Sk No:6, 59500", "Çerkezköy / Tekirdağ"]
maps_url = "https://maps.google.com/maps?hl=tr&gl=tr&um=1&ie=UTF-8&fb=1&sa=X&ftid=0x14b5270003e3fd49:0x78af6a698e885299"
maps_embed_url = "https://www.google.com/maps?q=Cerkezkoy%20Ye%C5%9FilAda%20Demircilik&output=embed"

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
summary = "Demir kesim, kaynak, çelik konstrüksiyon ve demircilik alanlarında tecrübeli ekibimizle endüstriyel ve mimari projelerinize profesyonel çözümler sunuyoruz. Dayanıklılık, hassas işçilik ve zamanında teslimat temel değerlerimizdir."
project_count = 6                # at most 24
project_caption = "Endüstriyel çelik konstrüksiyon uygulaması"

# ---------------------------------------------------------------------------
# About page (an about.md next to this file replaces `intro`)
# ---------------------------------------------------------------------------
[about]
intro = "Yeşil Ada Demircilik; çatı ve çelik kaplama, çelik konstrüksiyon, kesim ve kaynak işlerinde güvenilir çözüm ortağınızdır. Deneyimli ekibimizle dayanıklı ve estetik uygulamalar sunuyoruz."
why_title = "Neden Yeşil Ada?"
reasons = [
    "Uzman kadro ve titiz işçilik",
    "Zamanında teslim ve şeffaf süreç",
    "Endüstriyel ve mimari ihtiyaçlara uygun çözümler",
]

# ---------------------------------------------------------------------------
# Media discovery
# ---------------------------------------------------------------------------
[media]
image_extensions = ["jpg", "jpeg", "png", "webp", "gif", "svg"]
video_extensions = ["mp4", "webm", "ogg"]
# Photo-like formats score higher when picking the about cover.
photo_extensions = ["jpg", "jpeg", "png", "webp"]
# A file with one of these stems becomes the about cover outright.
cover_names = ["dukkan", "dükkan"]
# Names containing one of these score higher as cover candidates.
cover_keywords = ["img", "wa", "front", "store", "dukkan", "dükkan", "yesil", "ada"]
fallback_image = "/window.svg"

# ---------------------------------------------------------------------------
# Gallery lightbox
# ---------------------------------------------------------------------------
[lightbox]
min_zoom = 1.0
max_zoom = 4.0
zoom_step = 1.25                 # per key press / button click
wheel_sensitivity = 0.0015       # exponential zoom per wheel delta pixel
double_tap_zoom = 2.0
swipe_threshold = 60.0           # pixels of horizontal travel to change item

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#000000"
surface = "#111827"
card = "#ffffff"
card_text = "#000000"
text = "#ffffff"
text_muted = "#9ca3af"
border = "#1f2937"
accent = "#dc2626"
header = "rgba(255, 255, 255, 0.8)"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel asset copy workers. Omit to use every CPU core.
# max_processes = 4

# ---------------------------------------------------------------------------
# Services (array of tables; replaces the whole default list)
# icon: industry | gears | wrench | hammer
# ---------------------------------------------------------------------------
[[services]]
title = "Demir Kesim"
description = "CNC, lazer ve plazma ile hassas kesim"
icon = "industry"

[[services]]
title = "Çelik Konstrüksiyon"
description = "Sanayi tesisleri, platformlar, çatı sistemleri"
icon = "gears"

[[services]]
title = "Kaynak İşleri"
description = "MIG/TIG/Elektrod kaynak ve montaj"
icon = "wrench"

[[services]]
title = "Özel Demir Tasarımları"
description = "Korkuluk, kapı, ferforje, mimari uygulamalar"
icon = "hammer"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-card: {card};
    --color-card-text: {card_text};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-accent: {accent};
    --color-header: {header};
}}"#,
        background = colors.background,
        surface = colors.surface,
        card = colors.card,
        card_text = colors.card_text,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
        accent = colors.accent,
        header = colors.header,
    )
}
