// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image viewer and mask painting surface.
//!
//! This module draws the current image with its mask overlay under the
//! viewer's pan/zoom transform and turns pointer input into zoom, pan and
//! brush stroke actions.

use crate::models::brush::PaintButton;
use crate::models::mask::Point;
use crate::util::zoom::{DragMode, ViewState};
use egui::{Align2, Color32, CursorIcon, FontId, PointerButton, Pos2, Rect, Sense, Stroke};

const BACKGROUND: Color32 = Color32::from_gray(30);

/// egui reports `ln(zoom) * ZOOM_DELTA_POINTS` for a Ctrl + wheel scroll of that many points.
const ZOOM_DELTA_POINTS: f32 = 200.0;

/// Approximate points scrolled per wheel notch.
const WHEEL_NOTCH_POINTS: f32 = 50.0;

/// Wheel angle delta per notch (eighths of a degree).
const WHEEL_NOTCH_ANGLE: f32 = 120.0;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    BeginStroke(PaintButton, Point),
    ContinueStroke(PaintButton, Point),
    EndStroke,
    /// Brush size change as a wheel angle delta
    ResizeBrush(f32),
}

/// What the canvas needs to draw.
pub struct CanvasContent<'a> {
    pub image_texture: Option<&'a egui::TextureHandle>,
    pub mask_texture: Option<&'a egui::TextureHandle>,
    pub brush_size: f32,
    pub draw_enabled: bool,
    /// A stroke is in progress
    pub drawing: bool,
    /// The current image failed to decode
    pub load_error: bool,
    pub has_dataset: bool,
}

/// Display the viewer and handle mouse interactions.
pub fn show(ui: &mut egui::Ui, view: &mut ViewState, content: CanvasContent<'_>) -> Vec<CanvasAction> {
    let mut actions = Vec::new();

    let rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(rect, Sense::click_and_drag());
    view.set_viewport(rect);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let (Some(texture), Some(image_rect)) = (content.image_texture, view.image_rect()) else {
        show_placeholder(&painter, rect, &content);
        return actions;
    };

    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(texture.id(), image_rect, uv, Color32::WHITE);
    if let Some(mask) = content.mask_texture {
        painter.image(mask.id(), image_rect, uv, Color32::WHITE);
    }

    // Wheel: zoom, or resize the brush with Ctrl held while drawing is enabled
    if let Some(hover) = response.hover_pos() {
        let (scroll_y, zoom_delta) = ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta()));
        if zoom_delta != 1.0 {
            let points = zoom_delta.ln() * ZOOM_DELTA_POINTS;
            if content.draw_enabled {
                actions.push(CanvasAction::ResizeBrush(
                    points / WHEEL_NOTCH_POINTS * WHEEL_NOTCH_ANGLE,
                ));
            } else {
                view.wheel(points, hover);
            }
        } else if scroll_y != 0.0 {
            view.wheel(scroll_y, hover);
        }
    }

    // Middle button pans
    if response.dragged_by(PointerButton::Middle) && view.drag_mode() == DragMode::ScrollHandDrag {
        view.pan_by(response.drag_delta());
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    }

    if content.draw_enabled {
        collect_stroke_actions(ui, view, &response, content.drawing, &mut actions);

        if let Some(hover) = response.hover_pos() {
            let radius = content.brush_size * view.scale() / 2.0;
            painter.circle_stroke(hover, radius + 1.0, Stroke::new(1.0, Color32::from_black_alpha(160)));
            painter.circle_stroke(hover, radius, Stroke::new(1.0, Color32::from_white_alpha(200)));
            if !response.dragged_by(PointerButton::Middle) {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }
        }
    }

    actions
}

fn collect_stroke_actions(
    ui: &egui::Ui,
    view: &ViewState,
    response: &egui::Response,
    drawing: bool,
    actions: &mut Vec<CanvasAction>,
) {
    let (pressed, held, released, pointer) = ui.input(|i| {
        let pressed = if i.pointer.button_pressed(PointerButton::Primary) {
            Some(PaintButton::Primary)
        } else if i.pointer.button_pressed(PointerButton::Secondary) {
            Some(PaintButton::Secondary)
        } else {
            None
        };
        let held = if i.pointer.button_down(PointerButton::Secondary) {
            Some(PaintButton::Secondary)
        } else if i.pointer.button_down(PointerButton::Primary) {
            Some(PaintButton::Primary)
        } else {
            None
        };
        let released = i.pointer.button_released(PointerButton::Primary)
            || i.pointer.button_released(PointerButton::Secondary);
        (pressed, held, released, i.pointer.interact_pos())
    });

    let Some(pointer) = pointer else {
        return;
    };
    let image_pos = view.screen_to_image(pointer);
    let point = Point::new(image_pos.x, image_pos.y);

    let mut stroking = drawing;
    if !drawing && response.hovered() {
        if let Some(button) = pressed {
            actions.push(CanvasAction::BeginStroke(button, point));
            stroking = true;
        }
    }
    if stroking {
        if let Some(button) = held {
            actions.push(CanvasAction::ContinueStroke(button, point));
        }
        if released {
            actions.push(CanvasAction::EndStroke);
        }
    }
}

fn show_placeholder(painter: &egui::Painter, rect: Rect, content: &CanvasContent<'_>) {
    let (headline, hint) = if content.load_error {
        ("Error loading image", "Use Previous / Next to continue")
    } else if content.has_dataset {
        ("No images", "This folder has no .png, .jpg or .jpeg files")
    } else {
        ("Open a folder to begin labelling", "File → Open Folder... (Ctrl+O)")
    };
    painter.text(
        rect.center() - egui::vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        headline,
        FontId::proportional(20.0),
        Color32::from_gray(200),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 14.0),
        Align2::CENTER_CENTER,
        hint,
        FontId::proportional(14.0),
        Color32::from_gray(130),
    );
}
