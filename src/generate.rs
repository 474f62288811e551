//! HTML site generation.
//!
//! Stage 3 of the build pipeline. Takes the scan manifest and renders the
//! five pages of the site, each wrapped in the shared layout shell (navbar
//! and footer).
//!
//! ## Generated Pages
//!
//! | Route | File | Content |
//! |-------|------|---------|
//! | `/` | `index.html` | Hero, about blurb, services, projects, contact |
//! | `/about` | `about/index.html` | Cover image, intro, "why us" list |
//! | `/services` | `services/index.html` | Service cards with icons |
//! | `/contact` | `contact/index.html` | Contact card and embedded map |
//! | `/gallery` | `gallery/index.html` | Media grid and lightbox |
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and written under `_site/`
//! with a content fingerprint in the filename:
//! - `static/style.css`: utility and component styles (colors injected from config)
//! - `static/site.js`: navbar scroll state and in-view reveal animations
//! - `static/lightbox.js`: the gallery viewer, mirroring [`crate::lightbox`]
//!
//! ## Animations
//!
//! Page changes use cross-document view transitions. Sections fade up on
//! load (`.enter`) or when scrolled into view (`.reveal`, staggered through
//! the `--delay` custom property). Everything is disabled under
//! `prefers-reduced-motion`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::cache;
use crate::config::{self, ContactConfig, LightboxConfig, ServiceConfig, ServiceIcon, SiteConfig};
use crate::scan::Manifest;
use crate::types::{ASSET_DIR, MediaItem, MediaKind, Route};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SITE_JS: &str = include_str!("../static/site.js");
const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");

/// Length of the content hash embedded in asset filenames.
const FINGERPRINT_LEN: usize = 10;

/// A generated asset file.
#[derive(Debug, Clone)]
pub struct AssetFile {
    /// Path relative to the output root, e.g. `_site/style.0123456789.css`
    pub rel_path: String,
    pub content: String,
}

impl AssetFile {
    fn fingerprinted(stem: &str, ext: &str, content: String) -> Self {
        let hash = cache::hash_bytes(content.as_bytes());
        Self {
            rel_path: format!("{ASSET_DIR}/{stem}.{}.{ext}", &hash[..FINGERPRINT_LEN]),
            content,
        }
    }

    pub fn url(&self) -> String {
        format!("/{}", self.rel_path)
    }
}

/// The stylesheet and scripts every page links to.
#[derive(Debug, Clone)]
pub struct SiteAssets {
    pub css: AssetFile,
    pub site_js: AssetFile,
    pub lightbox_js: AssetFile,
}

impl SiteAssets {
    pub fn build(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            css: AssetFile::fingerprinted("style", "css", format!("{color_css}\n\n{CSS_STATIC}")),
            site_js: AssetFile::fingerprinted("site", "js", SITE_JS.to_string()),
            lightbox_js: AssetFile::fingerprinted("lightbox", "js", LIGHTBOX_JS.to_string()),
        }
    }

    fn files(&self) -> [&AssetFile; 3] {
        [&self.css, &self.site_js, &self.lightbox_js]
    }
}

/// Delete earlier fingerprinted builds of our own assets. Anything else in
/// the asset directory is left alone.
fn remove_stale_assets(asset_dir: &Path, current: &SiteAssets) -> std::io::Result<()> {
    const GENERATED: [(&str, &str); 3] =
        [("style.", ".css"), ("site.", ".js"), ("lightbox.", ".js")];
    let keep: Vec<String> = current
        .files()
        .iter()
        .filter_map(|f| f.rel_path.rsplit('/').next().map(str::to_string))
        .collect();

    for entry in fs::read_dir(asset_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let generated = GENERATED
            .iter()
            .any(|(prefix, suffix)| name.starts_with(prefix) && name.ends_with(suffix));
        if generated && !keep.contains(&name) && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// A rendered page ready to be written.
#[derive(Debug)]
pub struct RenderedPage {
    pub route: Route,
    pub html: String,
}

/// What the generate stage wrote, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub pages: Vec<(Route, String)>,
    pub assets: Vec<String>,
    pub gallery_items: usize,
}

/// Everything a page template needs.
struct PageContext<'a> {
    manifest: &'a Manifest,
    assets: &'a SiteAssets,
    year: i32,
}

impl PageContext<'_> {
    fn config(&self) -> &SiteConfig {
        &self.manifest.config
    }
}

pub fn generate(
    manifest_path: &Path,
    output_dir: &Path,
    year: i32,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let asset_dir = output_dir.join(ASSET_DIR);
    fs::create_dir_all(&asset_dir)?;

    let assets = SiteAssets::build(&manifest.config);
    remove_stale_assets(&asset_dir, &assets)?;
    let mut written_assets = Vec::new();
    for file in assets.files() {
        fs::write(output_dir.join(&file.rel_path), &file.content)?;
        written_assets.push(file.rel_path.clone());
    }

    let mut pages = Vec::new();
    for page in render_site(&manifest, &assets, year) {
        let rel = page.route.output_file();
        let path = output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, page.html)?;
        pages.push((page.route, rel));
    }

    Ok(GenerateReport {
        pages,
        assets: written_assets,
        gallery_items: manifest.media.len(),
    })
}

/// Render every route. Pure: no filesystem access.
pub fn render_site(manifest: &Manifest, assets: &SiteAssets, year: i32) -> Vec<RenderedPage> {
    let ctx = PageContext {
        manifest,
        assets,
        year,
    };
    Route::ALL
        .iter()
        .map(|&route| RenderedPage {
            route,
            html: render_page(route, &ctx).into_string(),
        })
        .collect()
}

fn render_page(route: Route, ctx: &PageContext) -> Markup {
    match route {
        Route::Home => render_home(ctx),
        Route::About => render_about(ctx),
        Route::Services => render_services(ctx),
        Route::Gallery => render_gallery(ctx),
        Route::Contact => render_contact(ctx),
    }
}

// ============================================================================
// Layout shell
// ============================================================================

/// Renders the base HTML document with navbar and footer around `content`.
fn base_document(
    ctx: &PageContext,
    route: Route,
    content: Markup,
    extra_script: Option<&str>,
) -> Markup {
    let site = &ctx.config().site;
    let title = match route {
        Route::Home => format!("{} | {}", site.name, site.tagline),
        other => format!("{} | {}", other.label(), site.name),
    };

    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.description);
                title { (title) }
                link rel="stylesheet" href=(ctx.assets.css.url());
                script { (PreEscaped("document.documentElement.classList.add('js');")) }
                script src=(ctx.assets.site_js.url()) defer {}
                @if let Some(src) = extra_script {
                    script src=(src) defer {}
                }
            }
            body {
                div.shell {
                    (site_header(ctx, route))
                    main.shell-main {
                        (content)
                    }
                    (site_footer(ctx))
                }
            }
        }
    }
}

/// Sticky navbar: brand, desktop links, CSS-only mobile menu.
fn site_header(ctx: &PageContext, current: Route) -> Markup {
    html! {
        header.site-header data-header {
            div.container-px.header-bar {
                a.brand href="/" { (ctx.config().site.name) }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Menüyü Aç" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                nav.site-nav {
                    @for route in Route::ALL {
                        @let is_current = route == current;
                        a.nav-link.current[is_current]
                            href=(route.path())
                            aria-current=[is_current.then_some("page")] {
                            (route.label())
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &PageContext) -> Markup {
    let config = ctx.config();
    html! {
        footer.site-footer {
            div.container-px.footer-grid {
                div {
                    h3.footer-brand { (config.site.name) }
                    p.muted { (config.site.tagline) }
                }
                div {
                    h4.footer-heading { "Bağlantılar" }
                    ul.footer-links {
                        @for route in Route::ALL {
                            li { a href=(route.path()) { (route.label()) } }
                        }
                    }
                }
                div.muted {
                    h4.footer-heading { "İletişim" }
                    p { "E-posta: " (config.contact.email) }
                    p { "Telefon: " (config.contact.phone_display) }
                }
            }
            div.container-px.footer-legal {
                "© " (ctx.year) " " (config.site.name) ". Tüm hakları saklıdır."
            }
        }
    }
}

// ============================================================================
// Shared components
// ============================================================================

fn section_heading(title: &str, subtitle: &str, level_one: bool) -> Markup {
    html! {
        @if level_one {
            h1.section-title { (title) }
        } @else {
            h2.section-title { (title) }
        }
        p.section-subtitle { (subtitle) }
    }
}

/// Phone, email and address card used on home and contact.
fn contact_card(contact: &ContactConfig, with_maps_link: bool) -> Markup {
    html! {
        div.card.contact-card {
            h3.card-title { "İletişim Bilgileri" }
            dl.contact-list {
                div {
                    dt { "Telefon" }
                    dd { a href={ "tel:" (contact.phone) } { (contact.phone_display) } }
                }
                div {
                    dt { "E-posta" }
                    dd { a href={ "mailto:" (contact.email) } { (contact.email) } }
                }
                div {
                    dt { "Adres" }
                    dd {
                        @for (i, line) in contact.address.iter().enumerate() {
                            @if i > 0 { br; }
                            (line)
                        }
                    }
                    @if with_maps_link {
                        dd {
                            a href=(contact.maps_url) target="_blank" rel="noopener noreferrer" {
                                "Google Haritalar’da görüntüle"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Service card. `idx` staggers the reveal animation.
fn service_card(service: &ServiceConfig, idx: usize, with_icon: bool) -> Markup {
    html! {
        div.card.reveal.lift style=(stagger(idx)) {
            @if with_icon {
                div.service-head {
                    span.service-icon { (service_icon(service.icon)) }
                    h3.card-title { (service.title) }
                }
            } @else {
                h3.card-title { (service.title) }
            }
            p.card-text { (service.description) }
        }
    }
}

fn stagger(idx: usize) -> String {
    format!("--delay: {:.2}s", idx as f64 * 0.05)
}

/// Inline SVG icons, drawn on a 24×24 grid with `currentColor`.
fn service_icon(icon: ServiceIcon) -> Markup {
    let body = match icon {
        ServiceIcon::Industry => {
            r#"<path d="M2 21V10l6 4V10l6 4V4h4v17z"/><path d="M6 17h2M11 17h2M16 17h2"/>"#
        }
        ServiceIcon::Gears => {
            r#"<circle cx="9" cy="9" r="3"/><path d="M9 3v2M9 13v2M3 9h2M13 9h2M4.8 4.8l1.4 1.4M11.8 11.8l1.4 1.4M4.8 13.2l1.4-1.4M11.8 6.2l1.4-1.4"/><circle cx="17" cy="17" r="2.5"/><path d="M17 12.5v2M17 19.5v2M12.5 17h2M19.5 17h2"/>"#
        }
        ServiceIcon::Wrench => {
            r#"<path d="M14.7 6.3a4 4 0 0 0 5 5L21 13l-8 8-3-3 8-8-1.3-1.3a4 4 0 0 0-5-5L14 6z"/><path d="M3 21l6-6"/>"#
        }
        ServiceIcon::Hammer => {
            r#"<path d="M14 4l6 6-3 3-6-6z"/><path d="M12 8L3 17l4 4 9-9"/>"#
        }
    };
    html! {
        svg.icon xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="1.8" stroke-linecap="round"
            stroke-linejoin="round" aria-hidden="true" {
            (PreEscaped(body))
        }
    }
}

/// Full-bleed hero with a faded background image.
fn hero(image: &str, alt: &str, content: Markup) -> Markup {
    html! {
        section.hero {
            div.hero-backdrop {
                img.hero-image src=(image) alt=(alt) fetchpriority="high";
                div.hero-fade {}
            }
            div.container-px.hero-body.enter {
                (content)
            }
        }
    }
}

fn media_image(item: &MediaItem, class: &str, lazy: bool) -> Markup {
    html! {
        img class=(class)
            src=(item.src)
            alt=(item.label)
            width=[item.dimensions.map(|d| d.0)]
            height=[item.dimensions.map(|d| d.1)]
            loading=[lazy.then_some("lazy")];
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &PageContext) -> Markup {
    let config = ctx.config();
    let highlights = &ctx.manifest.highlights;

    let projects: Vec<&str> = if highlights.projects.is_empty() {
        vec![config.media.fallback_image.as_str(); config.home.project_count]
    } else {
        highlights.projects.iter().map(String::as_str).collect()
    };

    let content = html! {
        (hero(&highlights.hero, "Çelik arka plan", html! {
            h1.hero-title { (config.site.name) }
            p.hero-lead { (config.site.tagline) }
            div.hero-actions {
                a.btn-primary href=(Route::Contact.path()) { "Bizimle İletişime Geçin" }
                a.btn-outline href=(Route::Services.path()) { "Hizmetlerimiz" }
            }
        }))

        section.band {
            div.container-px {
                h2.band-title { "Hakkımızda" }
                p.band-text { (config.home.summary) }
            }
        }

        section.container-px.section id="hizmetler" {
            (section_heading("Hizmetler", "İhtiyaçlarınıza özel profesyonel çözümler", false))
            div.grid.grid-4 {
                @for (idx, service) in config.services.iter().enumerate() {
                    (service_card(service, idx, false))
                }
            }
        }

        section.container-px.section {
            (section_heading("Referanslar / Projeler", "Tamamladığımız bazı çalışmalar", false))
            div.grid.grid-3 {
                @for (i, src) in projects.iter().enumerate() {
                    div.card.project-card.reveal style=(stagger(i)) {
                        div.project-media {
                            img src=(src) alt="Proje görseli" loading="lazy";
                        }
                        h3.project-title { "Proje #" (i + 1) }
                        p.card-text { (config.home.project_caption) }
                    }
                }
            }
        }

        section.container-px.section id="iletisim" {
            (section_heading("İletişim", "Bizimle iletişime geçin", false))
            div.grid.grid-contact {
                (contact_card(&config.contact, true))
            }
        }
    };

    base_document(ctx, Route::Home, content, None)
}

fn render_about(ctx: &PageContext) -> Markup {
    let config = ctx.config();
    let cover = &ctx.manifest.highlights.cover;

    let intro = match &ctx.manifest.about {
        Some(markdown) => {
            let parser = Parser::new(markdown);
            let mut body_html = String::new();
            md_html::push_html(&mut body_html, parser);
            html! { div.prose { (PreEscaped(body_html)) } }
        }
        None => html! { p.hero-lead { (config.about.intro) } },
    };

    let content = html! {
        (hero(cover, "Yeşil Ada dış cephe", html! {
            h1.hero-title { (Route::About.label()) }
            (intro)
            div.hero-actions {
                a.btn-primary href=(config.contact.maps_url) target="_blank" rel="noopener noreferrer" {
                    "Google Haritalar’da görüntüle"
                }
            }
        }))

        section.container-px.section {
            div.grid.grid-2 {
                div.cover-frame {
                    img src=(cover) alt="Atölye / Dükkan görüntüsü" loading="lazy";
                }
                div {
                    h2.band-title { (config.about.why_title) }
                    ul.reasons {
                        @for reason in &config.about.reasons {
                            li { (reason) }
                        }
                    }
                    div.hero-actions {
                        a.btn-outline-light href=(config.contact.maps_url) target="_blank" rel="noopener noreferrer" {
                            "Haritada Aç"
                        }
                    }
                }
            }
        }
    };

    base_document(ctx, Route::About, content, None)
}

fn render_services(ctx: &PageContext) -> Markup {
    let config = ctx.config();
    let content = html! {
        div.container-px.section.enter {
            (section_heading("Hizmetler", "İhtiyaçlarınıza özel profesyonel çözümler", true))
            div.grid.grid-3 {
                @for (idx, service) in config.services.iter().enumerate() {
                    (service_card(service, idx, true))
                }
            }
        }
    };
    base_document(ctx, Route::Services, content, None)
}

fn render_contact(ctx: &PageContext) -> Markup {
    let contact = &ctx.config().contact;
    let content = html! {
        div.container-px.section.enter {
            (section_heading("İletişim", "Bizimle iletişime geçin", true))
            div.grid.grid-contact {
                (contact_card(contact, false))
                div.map-frame {
                    iframe title="Harita"
                        src=(contact.maps_embed_url)
                        loading="lazy"
                        referrerpolicy="no-referrer-when-downgrade"
                        allowfullscreen {}
                }
            }
        }
    };
    base_document(ctx, Route::Contact, content, None)
}

fn render_gallery(ctx: &PageContext) -> Markup {
    let media = &ctx.manifest.media;
    let lightbox_src = ctx.assets.lightbox_js.url();

    let content = html! {
        div.container-px.section.enter {
            (section_heading("Galeri", "Projelerimizden seçkiler", true))
            @if media.is_empty() {
                p.empty-state { "Henüz görsel eklenmedi." }
            } @else {
                div.gallery-grid data-gallery {
                    @for (i, item) in media.iter().enumerate() {
                        (gallery_tile(item, i))
                    }
                }
                (lightbox_overlay(&ctx.config().lightbox))
            }
        }
    };

    let script = (!media.is_empty()).then_some(lightbox_src.as_str());
    base_document(ctx, Route::Gallery, content, script)
}

fn gallery_tile(item: &MediaItem, index: usize) -> Markup {
    html! {
        button.gallery-tile type="button"
            data-index=(index)
            data-kind=(item.kind.as_str())
            data-src=(item.src)
            data-label=(item.label)
            data-type=[(item.kind == MediaKind::Video).then(|| item.mime_type())]
            aria-label=(item.label) {
            @match item.kind {
                MediaKind::Image => {
                    (media_image(item, "tile-media", true))
                }
                MediaKind::Video => {
                    video.tile-media src=(item.src) muted playsinline preload="metadata" {}
                    span.tile-badge aria-hidden="true" { "▶" }
                }
            }
        }
    }
}

/// The viewer overlay. Settings travel to the script as data attributes.
fn lightbox_overlay(settings: &LightboxConfig) -> Markup {
    html! {
        div.lightbox id="lightbox" hidden
            role="dialog" aria-modal="true" aria-label="Galeri görüntüleyici"
            data-min-zoom=(settings.min_zoom)
            data-max-zoom=(settings.max_zoom)
            data-zoom-step=(settings.zoom_step)
            data-wheel-sensitivity=(settings.wheel_sensitivity)
            data-double-tap-zoom=(settings.double_tap_zoom)
            data-swipe-threshold=(settings.swipe_threshold) {
            div.lightbox-stage data-stage {}
            p.lightbox-caption data-caption {}
            button.lightbox-btn.lightbox-close type="button" data-action="close" aria-label="Kapat" { "×" }
            button.lightbox-btn.lightbox-prev type="button" data-action="prev" aria-label="Önceki" { "‹" }
            button.lightbox-btn.lightbox-next type="button" data-action="next" aria-label="Sonraki" { "›" }
            div.lightbox-toolbar {
                button.lightbox-btn type="button" data-action="zoom-out" aria-label="Uzaklaştır" { "−" }
                button.lightbox-btn type="button" data-action="zoom-reset" aria-label="Sıfırla" { "1:1" }
                button.lightbox-btn type="button" data-action="zoom-in" aria-label="Yakınlaştır" { "+" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
