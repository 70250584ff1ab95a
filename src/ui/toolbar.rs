// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask toolbar.
//!
//! This module provides the brush controls and the common mask operations
//! (undo/redo, clear, invert) above the viewer.

use crate::models::brush::{Brush, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    SetDrawEnabled(bool),
    BrushChanged,
    Undo,
    Redo,
    ClearMask,
    InvertMask,
    FitView,
}

/// State the toolbar reflects.
pub struct ToolbarState {
    pub draw_enabled: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Display the toolbar with the brush and mask controls.
pub fn show(ui: &mut egui::Ui, brush: &mut Brush, state: ToolbarState) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let mut draw_enabled = state.draw_enabled;
        if ui.toggle_value(&mut draw_enabled, "🖌 Draw").changed() {
            action = ToolbarAction::SetDrawEnabled(draw_enabled);
        }

        let mut size = brush.size();
        let slider = egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE)
            .logarithmic(true)
            .suffix(" px")
            .text("Brush");
        if ui.add_enabled(state.draw_enabled, slider).changed() {
            brush.set_size(size);
            action = ToolbarAction::BrushChanged;
        }

        ui.separator();

        if ui.add_enabled(state.can_undo, egui::Button::new("⟲ Undo")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(state.can_redo, egui::Button::new("⟳ Redo")).clicked() {
            action = ToolbarAction::Redo;
        }
        if ui.button("Clear").clicked() {
            action = ToolbarAction::ClearMask;
        }
        if ui.button("Invert").clicked() {
            action = ToolbarAction::InvertMask;
        }

        ui.separator();

        if ui.button("Fit").clicked() {
            action = ToolbarAction::FitView;
        }

        ui.separator();

        let hint = if state.draw_enabled {
            "Left-drag paints the mask, right-drag erases, Ctrl+wheel resizes the brush, middle-drag pans"
        } else {
            "Drawing disabled: wheel zooms, middle-drag pans"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
