//! # Yeşilada Site
//!
//! Static site generator for the Yeşilada Demircilik business site. The
//! `public/` directory is the media library: every image and video in it
//! ends up in the gallery, and the best candidates fill the home hero, the
//! project cards and the about cover.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      site/public  →  manifest.json   (filesystem → structured data)
//! 2. Publish   site/public  →  dist/           (verbatim, cached copy)
//! 3. Generate  manifest     →  dist/           (HTML pages + fingerprinted assets)
//! ```
//!
//! The scan manifest is human-readable JSON, so the generate stage can be
//! rerun and inspected on its own.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: discovers media, picks highlights, produces the manifest |
//! | [`publish`] | Stage 2: copies `public/` into the output with a content-hash cache |
//! | [`generate`] | Stage 3: renders the five pages with Maud |
//! | [`lightbox`] | Gallery viewer model mirrored by `static/lightbox.js` |
//! | [`config`] | `config.toml` loading, validation, merging and CSS generation |
//! | [`cache`] | Publish cache manifest and SHA-256 helpers |
//! | [`types`] | Shared types serialized between stages (`MediaItem`, `Route`) |
//! | [`naming`] | `NNN-name` filename convention and display labels |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Verbatim Media
//!
//! Media is served exactly as uploaded. There is no resizing or re-encoding;
//! the scan only reads raster headers so `<img>` tags can carry width and
//! height and avoid layout shift.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! checked at compile time and every interpolation is escaped.
//!
//! ## Hand-Written Stylesheet
//!
//! `static/style.css` is a small utility and component stylesheet embedded
//! at compile time. Colors come from config and are prepended as CSS custom
//! properties, so no CSS toolchain runs at build time.
//!
//! ## Tested Viewer Rules
//!
//! The lightbox clamping rules (zoom bounds, pan bounds, swipe threshold)
//! live in [`lightbox`] where they are unit tested. The page script applies
//! the same rules with the same settings.

pub mod cache;
pub mod config;
pub mod generate;
pub mod lightbox;
pub mod naming;
pub mod output;
pub mod publish;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
