// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption and tag editors.
//!
//! An editor is only shown once its sidecar file exists; until then an
//! "Add" button creates it.

use crate::io::sidecar::TextKind;
use std::path::PathBuf;

/// Text of one sidecar as edited in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub kind: TextKind,
    /// File the text was loaded from, `None` until it exists
    pub path: Option<PathBuf>,
    pub text: String,
}

impl TextField {
    pub fn empty(kind: TextKind) -> Self {
        Self {
            kind,
            path: None,
            text: String::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_some()
    }

    fn placeholder(&self) -> &'static str {
        match self.kind {
            TextKind::Caption => "A photograph of a ...",
            TextKind::Tags => "vector art, red highlights, ...",
        }
    }

    fn rows(&self) -> usize {
        match self.kind {
            TextKind::Caption => 4,
            TextKind::Tags => 3,
        }
    }

    fn add_label(&self) -> &'static str {
        match self.kind {
            TextKind::Caption => "Add Caption 📝",
            TextKind::Tags => "Add Tags 🏷",
        }
    }
}

/// Result of editor interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationAction {
    None,
    Create(TextKind),
    Edited(TextKind),
}

/// Display the caption and tag editors.
pub fn show(ui: &mut egui::Ui, enabled: bool, fields: [&mut TextField; 2]) -> AnnotationAction {
    let mut action = AnnotationAction::None;

    ui.add_enabled_ui(enabled, |ui| {
        let mut missing = Vec::new();
        for field in fields {
            if !field.exists() {
                missing.push((field.kind, field.add_label()));
                continue;
            }
            let (hint, rows) = (field.placeholder(), field.rows());
            let editor = egui::TextEdit::multiline(&mut field.text)
                .hint_text(hint)
                .desired_rows(rows)
                .desired_width(f32::INFINITY);
            if ui.add(editor).changed() {
                action = AnnotationAction::Edited(field.kind);
            }
        }

        if !missing.is_empty() {
            ui.columns(missing.len(), |columns| {
                for (column, (kind, label)) in columns.iter_mut().zip(missing) {
                    let button = egui::Button::new(label).min_size(egui::vec2(column.available_width(), 0.0));
                    if column.add(button).clicked() {
                        action = AnnotationAction::Create(kind);
                    }
                }
            });
        }
    });

    action
}
