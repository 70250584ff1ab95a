// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Previous / next buttons.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Previous,
    Next,
}

pub fn show(ui: &mut egui::Ui, enabled: bool) -> NavAction {
    let mut action = NavAction::None;
    ui.add_enabled_ui(enabled, |ui| {
        ui.columns(2, |columns| {
            let size = egui::vec2(columns[0].available_width(), 40.0);
            if columns[0]
                .add(egui::Button::new("Previous (Ctrl+Left)").min_size(size))
                .clicked()
            {
                action = NavAction::Previous;
            }
            if columns[1]
                .add(egui::Button::new("Next (Ctrl+Right)").min_size(size))
                .clicked()
            {
                action = NavAction::Next;
            }
        });
    });
    action
}
