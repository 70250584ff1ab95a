// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image title and the delete button.

/// Display the title. Returns true when the delete button was clicked.
pub fn show(ui: &mut egui::Ui, title: &str, can_delete: bool) -> bool {
    let mut delete = false;
    ui.horizontal(|ui| {
        let button_width = 40.0;
        let title_width = (ui.available_width() - button_width - ui.spacing().item_spacing.x).max(0.0);
        ui.allocate_ui(egui::vec2(title_width, 40.0), |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).size(14.0));
            });
        });

        let button = egui::Button::new(egui::RichText::new("🗑").size(18.0).color(egui::Color32::WHITE))
            .fill(egui::Color32::from_rgb(200, 40, 40))
            .min_size(egui::vec2(button_width, button_width));
        if ui
            .add_enabled(can_delete, button)
            .on_hover_text("Delete image (Delete)")
            .clicked()
        {
            delete = true;
        }
    });
    delete
}
