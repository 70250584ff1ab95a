// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Freehand mask painting with undo/redo.
//!
//! Pointer-down stamps a disc, pointer-move draws a segment from the previous
//! point, and pointer-up records the layer into the bounded history. Methods
//! that change the mask in a way that should be persisted return `true`.

use super::brush::{Brush, PaintButton};
use super::history::{History, DEFAULT_CAPACITY};
use super::mask::{MaskLayer, Point};

#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    last: Point,
}

#[derive(Debug)]
pub struct MaskPainter {
    layer: Option<MaskLayer>,
    history: History<MaskLayer>,
    brush: Brush,
    stroke: Option<ActiveStroke>,
    draw_enabled: bool,
    /// Bumped on every pixel change so the display knows when to re-upload.
    revision: u64,
}

impl Default for MaskPainter {
    fn default() -> Self {
        Self::new(Brush::default(), DEFAULT_CAPACITY)
    }
}

impl MaskPainter {
    pub fn new(brush: Brush, history_capacity: usize) -> Self {
        Self {
            layer: None,
            history: History::new(history_capacity),
            brush,
            stroke: None,
            draw_enabled: true,
            revision: 0,
        }
    }

    /// Prepare a blank mask for a newly shown image (or none when it failed to load).
    pub fn set_image_size(&mut self, size: Option<(u32, u32)>) {
        self.stroke = None;
        match size {
            Some((w, h)) => {
                let layer = MaskLayer::blank(w, h);
                self.history.reset(layer.clone());
                self.layer = Some(layer);
            }
            None => {
                self.layer = None;
                self.history.clear();
            }
        }
        self.touch();
    }

    /// Replace the mask, or clear it to white with `None`. History starts over.
    pub fn set_mask(&mut self, mask: Option<MaskLayer>) {
        let Some(current) = self.layer.as_ref() else {
            return;
        };
        let layer = mask.unwrap_or_else(|| MaskLayer::blank(current.width(), current.height()));
        self.stroke = None;
        self.history.reset(layer.clone());
        self.layer = Some(layer);
        self.touch();
    }

    pub fn layer(&self) -> Option<&MaskLayer> {
        self.layer.as_ref()
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    pub fn draw_enabled(&self) -> bool {
        self.draw_enabled
    }

    /// Disabling drawing also closes a stroke in progress. Returns true when
    /// that stroke was recorded and the mask needs saving.
    pub fn set_draw_enabled(&mut self, enabled: bool) -> bool {
        self.draw_enabled = enabled;
        !enabled && self.finish_stroke()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a stroke with a disc under the pointer.
    pub fn pointer_down(&mut self, button: PaintButton, pos: Point) {
        if !self.draw_enabled {
            return;
        }
        let size = self.brush.size();
        if let Some(layer) = self.layer.as_mut() {
            layer.stamp(pos, size, button.color());
            self.stroke = Some(ActiveStroke { last: pos });
            self.touch();
        }
    }

    /// Extend the stroke in progress to `pos`.
    pub fn pointer_move(&mut self, button: PaintButton, pos: Point) {
        if !self.draw_enabled {
            return;
        }
        let size = self.brush.size();
        let (Some(stroke), Some(layer)) = (self.stroke.as_mut(), self.layer.as_mut()) else {
            return;
        };
        if stroke.last == pos {
            return;
        }
        layer.stroke(stroke.last, pos, size, button.color());
        stroke.last = pos;
        self.touch();
    }

    /// Finish the stroke and record it. Returns true when the mask was modified.
    pub fn pointer_up(&mut self) -> bool {
        self.finish_stroke()
    }

    fn finish_stroke(&mut self) -> bool {
        if self.stroke.take().is_none() {
            return false;
        }
        if let Some(layer) = self.layer.as_ref() {
            self.history.record(layer.clone());
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        log::info!("Mask undo");
        self.layer = Some(snapshot);
        self.touch();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        log::info!("Mask redo");
        self.layer = Some(snapshot);
        self.touch();
        true
    }

    /// Swap masked and unmasked regions as an undoable edit.
    pub fn invert(&mut self) -> bool {
        self.finish_stroke();
        let Some(layer) = self.layer.as_mut() else {
            return false;
        };
        layer.invert();
        self.history.record(layer.clone());
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
