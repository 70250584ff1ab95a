// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Brush settings for mask painting.

use image::Rgba;

pub const DEFAULT_BRUSH_SIZE: f32 = 32.0;
pub const MIN_BRUSH_SIZE: f32 = 1.0;
pub const MAX_BRUSH_SIZE: f32 = 256.0;

/// Wheel delta (in eighths of a degree, 120 per notch) per pixel of brush size.
const WHEEL_DELTA_PER_PIXEL: f32 = 20.0;

/// Colour painted with the primary button (masked region).
pub const MASK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Colour painted with the secondary button (unmasked region).
pub const ERASE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Mouse button that started a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintButton {
    /// Paints the mask colour.
    Primary,
    /// Erases back to white.
    Secondary,
}

impl PaintButton {
    pub fn color(self) -> Rgba<u8> {
        match self {
            PaintButton::Primary => MASK_COLOR,
            PaintButton::Secondary => ERASE_COLOR,
        }
    }
}

/// Round brush with a diameter in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE)
    }
}

impl Brush {
    pub fn new(size: f32) -> Self {
        Self {
            size: clamp_size(size),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = clamp_size(size);
    }

    /// Grow or shrink from a wheel delta; one notch (120) changes the size by 6 px.
    pub fn adjust_by_wheel(&mut self, angle_delta: f32) {
        self.set_size(self.size + angle_delta / WHEEL_DELTA_PER_PIXEL);
    }
}

fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        return DEFAULT_BRUSH_SIZE;
    }
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}
