// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pan/zoom state of the image viewer.
//!
//! The viewer starts in "fit" mode (zoom step 0), where the whole image plus
//! a 5% margin fits the viewport. Each wheel notch moves one zoom step; the
//! view never zooms out further than fit. Coordinates in image space are
//! pixels of the source image.

use egui::{pos2, vec2, Pos2, Rect, Vec2};

/// Scale factor applied per zoom-in step.
pub const ZOOM_IN_FACTOR: f32 = 1.25;

/// Scale factor applied per zoom-out step.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Margin added around the image when fitting, as a fraction of each side.
pub const FIT_MARGIN: f32 = 0.05;

/// Scale at and above which pixels are drawn nearest-neighbour.
pub const NEAREST_SCALE_THRESHOLD: f32 = 2.0;

/// Whether the middle mouse button pans the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    NoDrag,
    ScrollHandDrag,
}

/// Texture sampling used for the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resampling {
    Smooth,
    Nearest,
}

/// Viewer transform: image pixel `p` is drawn at `viewport.min + offset + p * scale`.
#[derive(Debug, Clone)]
pub struct ViewState {
    image_size: Option<Vec2>,
    viewport: Rect,
    zoom_steps: i32,
    scale: f32,
    offset: Vec2,
    drag_mode: DragMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            image_size: None,
            viewport: Rect::NOTHING,
            zoom_steps: 0,
            scale: 1.0,
            offset: Vec2::ZERO,
            drag_mode: DragMode::NoDrag,
        }
    }

    /// Show a new image (or nothing) and return to fit mode.
    pub fn set_image(&mut self, size: Option<(u32, u32)>) {
        self.zoom_steps = 0;
        self.image_size = size
            .filter(|&(w, h)| w > 0 && h > 0)
            .map(|(w, h)| vec2(w as f32, h as f32));
        self.drag_mode = if self.image_size.is_some() {
            DragMode::ScrollHandDrag
        } else {
            DragMode::NoDrag
        };
        self.fit_in_view();
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    /// Update the on-screen area. While in fit mode the image is refitted.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport {
            return;
        }
        let old_min = self.viewport.min;
        let was_empty = !self.viewport.is_positive();
        self.viewport = viewport;
        if self.zoom_steps == 0 || was_empty {
            self.fit_in_view();
        } else {
            // Keep the image where it was on screen when the panel moves
            self.offset += old_min - viewport.min;
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Scale the image (plus margin) to fill the viewport and center it.
    pub fn fit_in_view(&mut self) {
        self.zoom_steps = 0;
        let Some(size) = self.image_size else {
            self.scale = 1.0;
            self.offset = Vec2::ZERO;
            return;
        };
        if !self.viewport.is_positive() {
            return;
        }
        let padded = size * (1.0 + 2.0 * FIT_MARGIN);
        let view = self.viewport.size();
        self.scale = (view.x / padded.x).min(view.y / padded.y);
        self.offset = view * 0.5 - size * self.scale * 0.5;
    }

    /// Apply one wheel notch at `cursor` (screen space). Positive `delta` zooms in.
    pub fn wheel(&mut self, delta: f32, cursor: Pos2) {
        if !self.has_image() || delta == 0.0 {
            return;
        }
        let factor = if delta > 0.0 {
            self.zoom_steps += 1;
            ZOOM_IN_FACTOR
        } else {
            self.zoom_steps -= 1;
            ZOOM_OUT_FACTOR
        };

        match self.zoom_steps {
            steps if steps > 0 => self.zoom_about(cursor, factor),
            0 => self.fit_in_view(),
            _ => self.zoom_steps = 0,
        }
    }

    /// Zoom in one step about the viewport center.
    pub fn zoom_in(&mut self) {
        self.wheel(1.0, self.viewport.center());
    }

    /// Zoom out one step about the viewport center.
    pub fn zoom_out(&mut self) {
        self.wheel(-1.0, self.viewport.center());
    }

    /// Scale by `factor` keeping the image point under `cursor` fixed.
    fn zoom_about(&mut self, cursor: Pos2, factor: f32) {
        let anchor = cursor - self.viewport.min;
        self.offset = anchor - (anchor - self.offset) * factor;
        self.scale *= factor;
    }

    /// Pan by a screen-space delta. Ignored while dragging is disabled.
    pub fn pan_by(&mut self, delta: Vec2) {
        if self.drag_mode == DragMode::ScrollHandDrag {
            self.offset += delta;
        }
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Switch panning on or off. Panning can only be enabled with an image shown.
    pub fn toggle_drag_mode(&mut self) {
        if self.drag_mode != DragMode::NoDrag {
            self.drag_mode = DragMode::NoDrag;
        } else if self.has_image() {
            self.drag_mode = DragMode::ScrollHandDrag;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zoom_steps(&self) -> i32 {
        self.zoom_steps
    }

    /// Sampling for the current scale: smooth when shrinking or slightly enlarging.
    pub fn resampling(&self) -> Resampling {
        if self.scale < NEAREST_SCALE_THRESHOLD {
            Resampling::Smooth
        } else {
            Resampling::Nearest
        }
    }

    /// Screen rectangle covered by the image.
    pub fn image_rect(&self) -> Option<Rect> {
        let size = self.image_size?;
        let min = self.viewport.min + self.offset;
        Some(Rect::from_min_size(min, size * self.scale))
    }

    /// Map a screen position to image pixel coordinates.
    pub fn screen_to_image(&self, pos: Pos2) -> Pos2 {
        let local = (pos - self.viewport.min - self.offset) / self.scale;
        pos2(local.x, local.y)
    }

    /// Map image pixel coordinates to a screen position.
    #[cfg(test)]
    pub fn image_to_screen(&self, pos: Pos2) -> Pos2 {
        self.viewport.min + self.offset + pos.to_vec2() * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn view_with_image(w: u32, h: u32) -> ViewState {
        let mut view = ViewState::new();
        view.set_viewport(Rect::from_min_size(pos2(0.0, 0.0), vec2(1100.0, 550.0)));
        view.set_image(Some((w, h)));
        view
    }

    #[test]
    fn test_fit_includes_margin() {
        let view = view_with_image(1000, 500);
        // 1000x500 plus 5% on each side is 1100x550
        assert!(approx_eq(view.scale(), 1.0));
        let rect = view.image_rect().unwrap();
        assert!(approx_eq(rect.min.x, 50.0));
        assert!(approx_eq(rect.min.y, 25.0));
    }

    #[test]
    fn test_fit_uses_limiting_side() {
        let view = view_with_image(500, 500);
        // Height limits: 550 / 550
        assert!(approx_eq(view.scale(), 1.0));
        let rect = view.image_rect().unwrap();
        assert!(approx_eq(rect.center().x, 550.0));
    }

    #[test]
    fn test_wheel_zoom_in_and_back_to_fit() {
        let mut view = view_with_image(1000, 500);
        let center = view.viewport().center();

        view.wheel(1.0, center);
        assert_eq!(view.zoom_steps(), 1);
        assert!(approx_eq(view.scale(), 1.25));

        view.wheel(1.0, center);
        assert!(approx_eq(view.scale(), 1.5625));

        view.wheel(-1.0, center);
        assert_eq!(view.zoom_steps(), 1);
        assert!(approx_eq(view.scale(), 1.25));

        view.wheel(-1.0, center);
        assert_eq!(view.zoom_steps(), 0);
        assert!(approx_eq(view.scale(), 1.0));
    }

    #[test]
    fn test_cannot_zoom_out_past_fit() {
        let mut view = view_with_image(1000, 500);
        let center = view.viewport().center();
        view.wheel(-1.0, center);
        view.wheel(-1.0, center);
        assert_eq!(view.zoom_steps(), 0);
        assert!(approx_eq(view.scale(), 1.0));

        // A single notch in zooms immediately
        view.wheel(1.0, center);
        assert_eq!(view.zoom_steps(), 1);
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut view = view_with_image(1000, 500);
        let cursor = pos2(300.0, 200.0);
        let before = view.screen_to_image(cursor);
        view.wheel(1.0, cursor);
        let after = view.screen_to_image(cursor);
        assert!(approx_eq(before.x, after.x));
        assert!(approx_eq(before.y, after.y));
    }

    #[test]
    fn test_wheel_without_image_is_ignored() {
        let mut view = ViewState::new();
        view.set_viewport(Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)));
        view.wheel(1.0, pos2(50.0, 50.0));
        assert_eq!(view.zoom_steps(), 0);
        assert!(view.image_rect().is_none());
    }

    #[test]
    fn test_resampling_threshold() {
        let mut view = view_with_image(1000, 500);
        let center = view.viewport().center();
        assert_eq!(view.resampling(), Resampling::Smooth);
        // 1.25^3 = 1.95, 1.25^4 = 2.44
        for _ in 0..3 {
            view.wheel(1.0, center);
        }
        assert_eq!(view.resampling(), Resampling::Smooth);
        view.wheel(1.0, center);
        assert_eq!(view.resampling(), Resampling::Nearest);
    }

    #[test]
    fn test_drag_mode_follows_image() {
        let mut view = ViewState::new();
        assert_eq!(view.drag_mode(), DragMode::NoDrag);
        view.toggle_drag_mode();
        assert_eq!(view.drag_mode(), DragMode::NoDrag);

        view.set_image(Some((10, 10)));
        assert_eq!(view.drag_mode(), DragMode::ScrollHandDrag);
        view.toggle_drag_mode();
        assert_eq!(view.drag_mode(), DragMode::NoDrag);
        view.toggle_drag_mode();
        assert_eq!(view.drag_mode(), DragMode::ScrollHandDrag);

        view.set_image(None);
        assert_eq!(view.drag_mode(), DragMode::NoDrag);
    }

    #[test]
    fn test_pan_respects_drag_mode() {
        let mut view = view_with_image(1000, 500);
        let before = view.image_rect().unwrap().min;
        view.pan_by(vec2(10.0, -5.0));
        let moved = view.image_rect().unwrap().min;
        assert!(approx_eq(moved.x - before.x, 10.0));
        assert!(approx_eq(moved.y - before.y, -5.0));

        view.toggle_drag_mode();
        view.pan_by(vec2(10.0, 0.0));
        assert!(approx_eq(view.image_rect().unwrap().min.x, moved.x));
    }

    #[test]
    fn test_screen_image_roundtrip() {
        let mut view = view_with_image(1000, 500);
        view.wheel(1.0, pos2(123.0, 77.0));
        let image_point = pos2(400.0, 250.0);
        let screen = view.image_to_screen(image_point);
        let back = view.screen_to_image(screen);
        assert!(approx_eq(back.x, image_point.x));
        assert!(approx_eq(back.y, image_point.y));
    }
}
