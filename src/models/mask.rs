// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask raster layer.
//!
//! A mask has the same pixel dimensions as its image. White means unmasked,
//! black means masked. Brush strokes are composited as filled discs and
//! round-capped segments directly into the raster.

use image::{imageops, DynamicImage, Rgba, RgbaImage};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_to_segment(self, a: Point, b: Point) -> f32 {
        let (abx, aby) = (b.x - a.x, b.y - a.y);
        let (apx, apy) = (self.x - a.x, self.y - a.y);
        let len_sq = abx * abx + aby * aby;
        let t = if len_sq > 0.0 {
            ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (dx, dy) = (apx - abx * t, apy - aby * t);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaskLayer {
    pixels: RgbaImage,
}

impl MaskLayer {
    /// An empty (all white) mask.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, WHITE),
        }
    }

    /// Use a decoded mask file, resizing it when it doesn't match the image size.
    pub fn from_image(image: DynamicImage, width: u32, height: u32) -> Self {
        let mut pixels = image.to_rgba8();
        if pixels.dimensions() != (width, height) {
            log::warn!(
                "Mask is {}x{}, resizing to {}x{}",
                pixels.width(),
                pixels.height(),
                width,
                height
            );
            pixels = imageops::resize(&pixels, width, height, imageops::FilterType::Nearest);
        }
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Paint a filled disc of `diameter` pixels centered on `center`.
    pub fn stamp(&mut self, center: Point, diameter: f32, color: Rgba<u8>) {
        self.stroke(center, center, diameter, color);
    }

    /// Paint a segment with round caps: every pixel within `diameter / 2` of it.
    pub fn stroke(&mut self, from: Point, to: Point, diameter: f32, color: Rgba<u8>) {
        let radius = (diameter / 2.0).max(0.5);
        let (w, h) = (self.width() as i64, self.height() as i64);
        if w == 0 || h == 0 {
            return;
        }

        let min_x = ((from.x.min(to.x) - radius).floor() as i64).max(0);
        let max_x = ((from.x.max(to.x) + radius).ceil() as i64).min(w - 1);
        let min_y = ((from.y.min(to.y) - radius).floor() as i64).max(0);
        let max_y = ((from.y.max(to.y) + radius).ceil() as i64).min(h - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if center.distance_to_segment(from, to) <= radius {
                    self.pixels.put_pixel(x as u32, y as u32, color);
                }
            }
        }

        // A brush thinner than a pixel still marks the pixels under its ends
        for end in [from, to] {
            let (x, y) = (end.x.floor() as i64, end.y.floor() as i64);
            if (0..w).contains(&x) && (0..h).contains(&y) {
                self.pixels.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Swap masked and unmasked regions (difference against white).
    pub fn invert(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            *pixel = Rgba([255 - r, 255 - g, 255 - b, a]);
        }
    }

    /// True when nothing is masked.
    pub fn is_blank(&self) -> bool {
        self.pixels
            .pixels()
            .all(|p| p.0[0] == 255 && p.0[1] == 255 && p.0[2] == 255)
    }

    /// RGBA overlay that darkens the image where the mask is dark.
    ///
    /// Drawing black with alpha `opacity * (1 - luminance)` over the image
    /// gives the same result as multiplying the image by the mask at
    /// `opacity`.
    pub fn overlay_pixels(&self, opacity: f32) -> Vec<u8> {
        let opacity = opacity.clamp(0.0, 1.0);
        let mut overlay = Vec::with_capacity(self.pixels.len());
        for pixel in self.pixels.pixels() {
            let [r, g, b, _] = pixel.0;
            let luminance = (r as f32 + g as f32 + b as f32) / 3.0;
            let alpha = (opacity * (255.0 - luminance)).round() as u8;
            overlay.extend_from_slice(&[0, 0, 0, alpha]);
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::brush::{ERASE_COLOR, MASK_COLOR};

    fn is_masked(layer: &MaskLayer, x: u32, y: u32) -> bool {
        layer.pixels().get_pixel(x, y).0[0] == 0
    }

    #[test]
    fn test_blank_mask_is_white() {
        let layer = MaskLayer::blank(4, 3);
        assert_eq!(layer.width(), 4);
        assert_eq!(layer.height(), 3);
        assert!(layer.is_blank());
    }

    #[test]
    fn test_stamp_paints_disc() {
        let mut layer = MaskLayer::blank(20, 20);
        layer.stamp(Point::new(10.0, 10.0), 8.0, MASK_COLOR);

        assert!(is_masked(&layer, 10, 10));
        assert!(is_masked(&layer, 7, 10));
        assert!(!is_masked(&layer, 10, 15));
        // Corners of the bounding box lie outside the disc
        assert!(!is_masked(&layer, 6, 6));
        assert!(!layer.is_blank());
    }

    #[test]
    fn test_stroke_covers_segment() {
        let mut layer = MaskLayer::blank(40, 10);
        layer.stroke(Point::new(5.0, 5.0), Point::new(35.0, 5.0), 2.0, MASK_COLOR);
        for x in 5..35 {
            assert!(is_masked(&layer, x, 4) || is_masked(&layer, x, 5));
        }
        assert!(!is_masked(&layer, 20, 0));
        assert!(!is_masked(&layer, 20, 9));
    }

    #[test]
    fn test_secondary_color_erases() {
        let mut layer = MaskLayer::blank(20, 20);
        layer.stamp(Point::new(10.0, 10.0), 10.0, MASK_COLOR);
        layer.stamp(Point::new(10.0, 10.0), 12.0, ERASE_COLOR);
        assert!(layer.is_blank());
    }

    #[test]
    fn test_stamp_outside_bounds_is_clipped() {
        let mut layer = MaskLayer::blank(10, 10);
        layer.stamp(Point::new(-50.0, -50.0), 8.0, MASK_COLOR);
        assert!(layer.is_blank());
        layer.stamp(Point::new(-1.0, 5.0), 4.0, MASK_COLOR);
        assert!(is_masked(&layer, 0, 5));
    }

    #[test]
    fn test_tiny_brush_marks_pixel() {
        let mut layer = MaskLayer::blank(10, 10);
        layer.stamp(Point::new(3.0, 3.0), 1.0, MASK_COLOR);
        assert!(is_masked(&layer, 3, 3));
    }

    #[test]
    fn test_invert_twice_restores() {
        let mut layer = MaskLayer::blank(10, 10);
        layer.stamp(Point::new(5.0, 5.0), 4.0, MASK_COLOR);
        let original = layer.clone();

        layer.invert();
        assert!(!is_masked(&layer, 5, 5));
        assert!(is_masked(&layer, 0, 0));

        layer.invert();
        assert_eq!(layer, original);
    }

    #[test]
    fn test_from_image_resizes_to_target() {
        let small = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let layer = MaskLayer::from_image(small, 8, 6);
        assert_eq!((layer.width(), layer.height()), (8, 6));
        assert!(is_masked(&layer, 7, 5));
    }

    #[test]
    fn test_overlay_matches_multiply() {
        let mut layer = MaskLayer::blank(2, 1);
        layer.stamp(Point::new(0.5, 0.5), 1.0, MASK_COLOR);
        let overlay = layer.overlay_pixels(1.0);
        assert_eq!(overlay.len(), 8);
        assert_eq!(&overlay[0..4], &[0, 0, 0, 255]);
        // White pixel: untouched
        assert_eq!(&overlay[4..8], &[0, 0, 0, 0]);

        let half = layer.overlay_pixels(0.5);
        assert_eq!(half[3], 128);
    }
}
