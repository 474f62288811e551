//! Gallery lightbox model.
//!
//! The gallery page ships a small script (`static/lightbox.js`) that opens a
//! full-screen viewer over the grid. This module is the reference model of
//! that viewer: the same state, the same clamping rules and the same
//! thresholds, driven by the same [`LightboxConfig`] values that the page
//! hands to the script through `data-*` attributes.
//!
//! ## State
//!
//! | field | meaning |
//! |-------|---------|
//! | `active` | index of the open item, `None` when closed |
//! | `scale` | zoom factor, always within `[min_zoom, max_zoom]` |
//! | `offset` | pan translation in CSS pixels, `(0, 0)` at `min_zoom` |
//!
//! ## Inputs
//!
//! - **Wheel**: exponential zoom, `scale * e^(-delta_y * wheel_sensitivity)`.
//! - **Pinch**: zoom relative to the scale when the gesture started.
//! - **Drag**: pans only while zoomed in; clamped so the media edge never
//!   moves past the stage edge.
//! - **Swipe**: horizontal travel of at least `swipe_threshold` pixels moves
//!   to the neighbouring item, unless zoomed in (then the drag pans).
//! - **Keys**: `Escape`, `ArrowLeft`, `ArrowRight`, `+`/`=`, `-`, `0`.
//!
//! Navigation wraps around at both ends. Opening, closing and navigating
//! reset zoom and pan. Zoom and pan apply to images only; while a video is
//! open the scale stays at `min_zoom`.

use crate::config::LightboxConfig;
use crate::types::MediaKind;

/// Result of a finished swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Next,
    Prev,
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    settings: LightboxConfig,
    kinds: Vec<MediaKind>,
    active: Option<usize>,
    scale: f64,
    offset: (f64, f64),
    /// Last known stage size, used to re-clamp the offset after zooming.
    stage: (f64, f64),
}

impl Lightbox {
    /// Viewer over gallery items of the given kinds, in gallery order.
    pub fn new(settings: LightboxConfig, kinds: Vec<MediaKind>) -> Self {
        let scale = settings.min_zoom;
        Self {
            settings,
            kinds,
            active: None,
            scale,
            offset: (0.0, 0.0),
            stage: (0.0, 0.0),
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > self.settings.min_zoom
    }

    fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the open item can be zoomed and panned.
    pub fn active_is_image(&self) -> bool {
        self.active
            .and_then(|i| self.kinds.get(i))
            .is_some_and(|k| *k == MediaKind::Image)
    }

    /// Open item `index`. Out-of-range indexes open the last item; an empty
    /// gallery never opens.
    pub fn open(&mut self, index: usize) {
        if self.kinds.is_empty() {
            return;
        }
        self.active = Some(index.min(self.len() - 1));
        self.reset_zoom();
    }

    pub fn close(&mut self) {
        self.active = None;
        self.reset_zoom();
    }

    pub fn next(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + 1) % self.len());
            self.reset_zoom();
        }
    }

    pub fn prev(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + self.len() - 1) % self.len());
            self.reset_zoom();
        }
    }

    pub fn reset_zoom(&mut self) {
        self.scale = self.settings.min_zoom;
        self.offset = (0.0, 0.0);
    }

    /// Mouse wheel / trackpad scroll. Negative `delta_y` zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        let factor = (-delta_y * self.settings.wheel_sensitivity).exp();
        self.set_scale(self.scale * factor);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * self.settings.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / self.settings.zoom_step);
    }

    /// Two-finger pinch: `start_scale` is the scale when both fingers landed.
    pub fn pinch(&mut self, start_scale: f64, start_distance: f64, distance: f64) {
        if start_distance <= 0.0 || !distance.is_finite() {
            return;
        }
        self.set_scale(start_scale * distance / start_distance);
    }

    /// Double click / double tap.
    pub fn toggle_zoom(&mut self) {
        if self.is_zoomed() {
            self.reset_zoom();
        } else {
            self.set_scale(self.settings.double_tap_zoom);
        }
    }

    /// Drag by `(dx, dy)` inside a stage of `stage_w × stage_h` pixels.
    pub fn pan(&mut self, dx: f64, dy: f64, stage_w: f64, stage_h: f64) {
        if !self.is_zoomed() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if stage_w.is_finite() && stage_h.is_finite() {
            self.stage = (stage_w.max(0.0), stage_h.max(0.0));
        }
        self.offset = (self.offset.0 + dx, self.offset.1 + dy);
        self.clamp_offset();
    }

    /// Largest allowed offset on each axis at the current scale.
    pub fn pan_bounds(&self) -> (f64, f64) {
        let extra = (self.scale - 1.0).max(0.0) / 2.0;
        (self.stage.0 * extra, self.stage.1 * extra)
    }

    /// Finished one-finger gesture with total travel `(dx, dy)`.
    pub fn swipe(&mut self, dx: f64, dy: f64) -> Option<SwipeAction> {
        if !self.is_open() || self.is_zoomed() || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        if dx.abs() < self.settings.swipe_threshold || dx.abs() <= dy.abs() {
            return None;
        }
        if dx < 0.0 {
            self.next();
            Some(SwipeAction::Next)
        } else {
            self.prev();
            Some(SwipeAction::Prev)
        }
    }

    /// Keyboard shortcut. Returns whether the key was handled.
    pub fn key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowRight" => self.next(),
            "ArrowLeft" => self.prev(),
            "+" | "=" => self.zoom_in(),
            "-" => self.zoom_out(),
            "0" => self.reset_zoom(),
            _ => return false,
        }
        true
    }

    /// CSS transform applied to the media element.
    pub fn transform_css(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) scale({:.3})",
            self.offset.0, self.offset.1, self.scale
        )
    }

    fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() || !self.active_is_image() {
            return;
        }
        self.scale = scale.clamp(self.settings.min_zoom, self.settings.max_zoom);
        if self.is_zoomed() {
            self.clamp_offset();
        } else {
            self.offset = (0.0, 0.0);
        }
    }

    fn clamp_offset(&mut self) {
        let (max_x, max_y) = self.pan_bounds();
        self.offset = (
            self.offset.0.clamp(-max_x, max_x),
            self.offset.1.clamp(-max_y, max_y),
        );
    }
}
