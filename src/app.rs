// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the labeling window: it owns the dataset cursor,
//! the viewer and mask painter, the caption/tag editors, and writes every
//! edit straight back to the image's sidecar files.

use crate::config::{self, AppSettings, SaveSchedule};
use crate::io::dataset::{Dataset, Navigation};
use crate::io::media;
use crate::io::sidecar::{MaskSave, Sidecars, TextKind};
use crate::io::trash;
use crate::models::brush::Brush;
use crate::models::painter::MaskPainter;
use crate::ui::annotations::{self, AnnotationAction, TextField};
use crate::ui::canvas::{self, CanvasAction, CanvasContent};
use crate::ui::navigation::{self, NavAction};
use crate::ui::toolbar::{self, ToolbarAction, ToolbarState};
use crate::ui::header;
use crate::util::format::{format_aspect, format_size};
use crate::util::zoom::{DragMode, Resampling, ViewState};
use egui::{Key, Modifiers, PointerButton};
use std::path::{Path, PathBuf};

/// Seconds a status message stays visible.
const STATUS_SECONDS: f64 = 3.0;

/// The decoded image kept around so the texture can be re-uploaded with other filtering.
struct DisplayedImage {
    color: egui::ColorImage,
    texture: egui::TextureHandle,
    filter: Resampling,
}

struct StatusMessage {
    text: String,
    is_error: bool,
    expires_at: Option<f64>,
}

/// Commands that can come from the menu, the keyboard or the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    OpenFolder,
    SelectIndex,
    Quit,
    Undo,
    Redo,
    ClearMask,
    InvertMask,
    SetDrawEnabled(bool),
    Previous,
    Next,
    Delete,
    FitView,
    ZoomIn,
    ZoomOut,
    ToggleDragMode,
}

fn texture_options(filter: Resampling) -> egui::TextureOptions {
    match filter {
        Resampling::Smooth => egui::TextureOptions::LINEAR,
        Resampling::Nearest => egui::TextureOptions::NEAREST,
    }
}

/// Main application state.
pub struct LabelerApp {
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    settings_save: SaveSchedule,

    dataset: Dataset,
    /// Folder to open on the first frame
    pending_folder: Option<PathBuf>,

    view: ViewState,
    painter: MaskPainter,
    image: Option<DisplayedImage>,
    load_error: bool,
    mask_texture: Option<egui::TextureHandle>,
    /// Painter revision and filter the mask texture was built from
    mask_uploaded: Option<(u64, Resampling)>,

    title: String,
    caption: TextField,
    tags: TextField,

    /// Index being picked in the "Select Image Index" window
    index_dialog: Option<usize>,
    status: Option<StatusMessage>,
}

impl LabelerApp {
    /// Create the application, opening `folder` on the first frame if given.
    pub fn new(settings: AppSettings, settings_path: Option<PathBuf>, folder: Option<PathBuf>) -> Self {
        let painter = MaskPainter::new(Brush::new(settings.brush_size), settings.history_capacity);
        Self {
            settings,
            settings_path,
            settings_save: SaveSchedule::default(),
            dataset: Dataset::default(),
            pending_folder: folder,
            view: ViewState::new(),
            painter,
            image: None,
            load_error: false,
            mask_texture: None,
            mask_uploaded: None,
            title: String::new(),
            caption: TextField::empty(TextKind::Caption),
            tags: TextField::empty(TextKind::Tags),
            index_dialog: None,
            status: None,
        }
    }

    fn set_status(&mut self, ctx: &egui::Context, text: impl Into<String>) {
        let now = ctx.input(|i| i.time);
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            expires_at: Some(now + STATUS_SECONDS),
        });
    }

    /// Log an error and keep it in the status line until the next message.
    fn report_error(&mut self, context: &str, error: anyhow::Error) {
        log::error!("{}: {:#}", context, error);
        self.status = Some(StatusMessage {
            text: format!("{context}: {error:#}"),
            is_error: true,
            expires_at: None,
        });
    }

    fn current_sidecars(&self) -> Option<Sidecars> {
        self.dataset.current().map(Sidecars::for_image)
    }

    fn open_folder_dialog(&mut self, ctx: &egui::Context) {
        if let Some(folder) = rfd::FileDialog::new().set_title("Select Folder").pick_folder() {
            self.open_folder(&folder, ctx);
        }
    }

    /// Scan a folder and show its first image.
    pub fn open_folder(&mut self, folder: &Path, ctx: &egui::Context) {
        match Dataset::open(folder) {
            Ok(dataset) => {
                self.dataset = dataset;
                self.settings.last_folder = Some(folder.to_path_buf());
                self.settings_save.mark(ctx.input(|i| i.time));
                self.display_image(ctx);
            }
            Err(e) => self.report_error("Failed to open folder", e),
        }
    }

    fn clear_display(&mut self) {
        self.title.clear();
        self.image = None;
        self.load_error = false;
        self.view.set_image(None);
        self.painter.set_image_size(None);
        self.mask_texture = None;
        self.mask_uploaded = None;
        self.caption = TextField::empty(TextKind::Caption);
        self.tags = TextField::empty(TextKind::Tags);
    }

    /// Load the current image, its mask and its text sidecars.
    fn display_image(&mut self, ctx: &egui::Context) {
        let Some(path) = self.dataset.current().map(Path::to_path_buf) else {
            self.clear_display();
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_size = format_size(media::file_size(&path));

        self.mask_texture = None;
        self.mask_uploaded = None;

        match media::load_image(&path) {
            Ok(loaded) => {
                let (w, h) = (loaded.width, loaded.height);
                self.title = format!(
                    "{name}    {}\n{w}x{h} {}    {file_size}",
                    self.dataset.position_label(),
                    format_aspect(w, h)
                );
                self.view.set_image(Some((w, h)));
                self.painter.set_image_size(Some((w, h)));

                let color = egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &loaded.pixels);
                let filter = self.view.resampling();
                let texture = ctx.load_texture("dataset_image", color.clone(), texture_options(filter));
                self.image = Some(DisplayedImage { color, texture, filter });
                self.load_error = false;

                match Sidecars::for_image(&path).load_mask(w, h) {
                    Ok(Some(mask)) => self.painter.set_mask(Some(mask)),
                    Ok(None) => {}
                    Err(e) => self.report_error("Failed to load mask", e),
                }
                log::info!("Showing {} ({}x{})", path.display(), w, h);
            }
            Err(e) => {
                log::error!("{:#}", e);
                self.title = format!("{name}\nError loading image    {file_size}");
                self.image = None;
                self.load_error = true;
                self.view.set_image(None);
                self.painter.set_image_size(None);
            }
        }

        self.display_annotations();
    }

    /// Reload the caption and tag editors from disk.
    fn display_annotations(&mut self) {
        let Some(sidecars) = self.current_sidecars() else {
            return;
        };
        self.caption = self.load_text(&sidecars, TextKind::Caption);
        self.tags = self.load_text(&sidecars, TextKind::Tags);
    }

    fn load_text(&mut self, sidecars: &Sidecars, kind: TextKind) -> TextField {
        match sidecars.read(kind) {
            Ok(Some(sidecar)) => TextField {
                kind,
                path: Some(sidecar.path),
                text: sidecar.text,
            },
            Ok(None) => TextField::empty(kind),
            Err(e) => {
                self.report_error(&format!("Failed to read {}", kind.label()), e);
                TextField::empty(kind)
            }
        }
    }

    fn create_text(&mut self, kind: TextKind) {
        let Some(sidecars) = self.current_sidecars() else {
            return;
        };
        if let Err(e) = sidecars.create(kind) {
            self.report_error(&format!("Failed to create {}", kind.label()), e);
        }
        self.display_annotations();
    }

    /// Autosave an edited caption or tag list.
    fn save_text(&mut self, kind: TextKind) {
        let Some(sidecars) = self.current_sidecars() else {
            return;
        };
        let field = match kind {
            TextKind::Caption => &mut self.caption,
            TextKind::Tags => &mut self.tags,
        };
        let result = sidecars.write(kind, field.path.as_deref(), &field.text);
        match result {
            Ok(path) => field.path = Some(path),
            Err(e) => self.report_error(&format!("Failed to save {}", kind.label()), e),
        }
    }

    /// Autosave the mask after a stroke or mask operation.
    fn save_mask(&mut self) {
        let (Some(sidecars), Some(layer)) = (self.current_sidecars(), self.painter.layer()) else {
            return;
        };
        match sidecars.save_mask(layer) {
            Ok(MaskSave::Written) => log::debug!("Mask saved"),
            Ok(MaskSave::Removed) => log::info!("Mask is empty, removed file"),
            Ok(MaskSave::Skipped) => {}
            Err(e) => self.report_error("Failed to save mask", e),
        }
    }

    fn navigate(&mut self, ctx: &egui::Context, forward: bool) {
        let result = if forward {
            self.dataset.next()
        } else {
            self.dataset.prev()
        };
        match result {
            Navigation::Empty => return,
            Navigation::Wrapped => {
                let text = if forward {
                    "Wrapped around to the first image"
                } else {
                    "Wrapped around to the last image"
                };
                log::info!("{}", text);
                self.set_status(ctx, text);
            }
            Navigation::Moved => {}
        }
        self.display_image(ctx);
    }

    /// Move the current image and its sidecars to the trash.
    fn delete_current(&mut self, ctx: &egui::Context) {
        let Some(path) = self.dataset.current().map(Path::to_path_buf) else {
            return;
        };
        match trash::delete_image(&path) {
            Ok(files) => {
                self.dataset.remove_current();
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                self.set_status(ctx, format!("Moved {} ({} files) to trash", name, files.len()));
                self.display_image(ctx);
            }
            Err(e) => self.report_error("Failed to delete image", e),
        }
    }

    fn run(&mut self, command: Command, ctx: &egui::Context) {
        match command {
            Command::OpenFolder => self.open_folder_dialog(ctx),
            Command::SelectIndex => {
                if !self.dataset.is_empty() {
                    self.index_dialog = Some(self.dataset.index());
                }
            }
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::Undo => {
                if self.painter.undo() {
                    self.save_mask();
                }
            }
            Command::Redo => {
                if self.painter.redo() {
                    self.save_mask();
                }
            }
            Command::ClearMask => {
                if self.painter.layer().is_some() {
                    self.painter.set_mask(None);
                    self.save_mask();
                }
            }
            Command::InvertMask => {
                if self.painter.invert() {
                    self.save_mask();
                }
            }
            Command::SetDrawEnabled(enabled) => {
                if self.painter.set_draw_enabled(enabled) {
                    self.save_mask();
                }
            }
            Command::Previous => self.navigate(ctx, false),
            Command::Next => self.navigate(ctx, true),
            Command::Delete => self.delete_current(ctx),
            Command::FitView => self.view.fit_in_view(),
            Command::ZoomIn => self.view.zoom_in(),
            Command::ZoomOut => self.view.zoom_out(),
            Command::ToggleDragMode => self.view.toggle_drag_mode(),
        }
    }

    /// Keyboard shortcuts and the mouse back/forward buttons.
    fn collect_shortcuts(&self, ctx: &egui::Context) -> Vec<Command> {
        // Keys a focused text editor needs for itself
        let typing = ctx.wants_keyboard_input();
        let ctrl_shift = Modifiers::COMMAND | Modifiers::SHIFT;

        ctx.input_mut(|i| {
            let mut commands = Vec::new();
            if i.consume_key(Modifiers::COMMAND, Key::O) {
                commands.push(Command::OpenFolder);
            }
            if i.consume_key(Modifiers::COMMAND, Key::I) {
                commands.push(Command::SelectIndex);
            }
            if i.consume_key(ctrl_shift, Key::M) {
                commands.push(Command::InvertMask);
            }
            if !typing {
                // Ctrl+Shift+Z must be consumed before Ctrl+Z, which also matches it
                if i.consume_key(ctrl_shift, Key::Z) || i.consume_key(Modifiers::COMMAND, Key::Y) {
                    commands.push(Command::Redo);
                } else if i.consume_key(Modifiers::COMMAND, Key::Z) {
                    commands.push(Command::Undo);
                }
                if i.consume_key(Modifiers::COMMAND, Key::ArrowLeft) {
                    commands.push(Command::Previous);
                }
                if i.consume_key(Modifiers::COMMAND, Key::ArrowRight) {
                    commands.push(Command::Next);
                }
                if i.consume_key(Modifiers::NONE, Key::Delete) {
                    commands.push(Command::Delete);
                }
            }
            if i.pointer.button_pressed(PointerButton::Extra1) {
                commands.push(Command::Previous);
            }
            if i.pointer.button_pressed(PointerButton::Extra2) {
                commands.push(Command::Next);
            }
            commands
        })
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;
        let has_image = self.painter.layer().is_some();

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open Folder...").shortcut_text("Ctrl+O")).clicked() {
                    command = Some(Command::OpenFolder);
                    ui.close_menu();
                }
                let has_images = !self.dataset.is_empty();
                if ui
                    .add_enabled(has_images, egui::Button::new("Select Image Index...").shortcut_text("Ctrl+I"))
                    .clicked()
                {
                    command = Some(Command::SelectIndex);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    command = Some(Command::Quit);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(self.painter.can_undo(), egui::Button::new("Undo").shortcut_text("Ctrl+Z"))
                    .clicked()
                {
                    command = Some(Command::Undo);
                    ui.close_menu();
                }
                if ui
                    .add_enabled(self.painter.can_redo(), egui::Button::new("Redo").shortcut_text("Ctrl+Shift+Z"))
                    .clicked()
                {
                    command = Some(Command::Redo);
                    ui.close_menu();
                }
                ui.separator();
                if ui
                    .add_enabled(!self.dataset.is_empty(), egui::Button::new("Delete Image").shortcut_text("Delete"))
                    .clicked()
                {
                    command = Some(Command::Delete);
                    ui.close_menu();
                }
            });

            ui.menu_button("Mask", |ui| {
                if ui.add_enabled(has_image, egui::Button::new("Clear Mask")).clicked() {
                    command = Some(Command::ClearMask);
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_image, egui::Button::new("Invert Mask").shortcut_text("Ctrl+Shift+M"))
                    .clicked()
                {
                    command = Some(Command::InvertMask);
                    ui.close_menu();
                }
                ui.separator();
                let mut enabled = self.painter.draw_enabled();
                if ui.checkbox(&mut enabled, "Draw Enabled").changed() {
                    command = Some(Command::SetDrawEnabled(enabled));
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit in View").clicked() {
                    command = Some(Command::FitView);
                    ui.close_menu();
                }
                if ui.button("Zoom In").clicked() {
                    command = Some(Command::ZoomIn);
                    ui.close_menu();
                }
                if ui.button("Zoom Out").clicked() {
                    command = Some(Command::ZoomOut);
                    ui.close_menu();
                }
                ui.separator();
                let mut pan = self.view.drag_mode() == DragMode::ScrollHandDrag;
                if ui.add_enabled(self.view.has_image(), egui::Checkbox::new(&mut pan, "Middle-drag Pans")).changed() {
                    command = Some(Command::ToggleDragMode);
                }
            });
        });

        command
    }

    fn index_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut index) = self.index_dialog else {
            return;
        };
        let max = self.dataset.len().saturating_sub(1);
        let mut open = true;
        let mut decided = None;

        egui::Window::new("Set Current Image Index")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.add(egui::Slider::new(&mut index, 0..=max).text("Index"));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(Key::Enter)) {
                        decided = Some(true);
                    }
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(Key::Escape)) {
                        decided = Some(false);
                    }
                });
            });

        match decided {
            Some(true) => {
                self.index_dialog = None;
                self.dataset.set_index(index);
                self.display_image(ctx);
            }
            Some(false) => self.index_dialog = None,
            None if !open => self.index_dialog = None,
            None => self.index_dialog = Some(index),
        }
    }

    /// Keep the image and mask textures in step with the zoom level and the painter.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let filter = self.view.resampling();

        if let Some(image) = self.image.as_mut() {
            if image.filter != filter {
                image.texture.set(image.color.clone(), texture_options(filter));
                image.filter = filter;
            }
        }

        let wanted = (self.painter.revision(), filter);
        if self.mask_uploaded == Some(wanted) {
            return;
        }
        self.mask_uploaded = Some(wanted);

        let Some(layer) = self.painter.layer() else {
            self.mask_texture = None;
            return;
        };
        let size = [layer.width() as usize, layer.height() as usize];
        let overlay = egui::ColorImage::from_rgba_unmultiplied(size, &layer.overlay_pixels(self.settings.mask_opacity));
        match self.mask_texture.as_mut() {
            Some(texture) => texture.set(overlay, texture_options(filter)),
            None => {
                self.mask_texture = Some(ctx.load_texture("mask_overlay", overlay, texture_options(filter)));
            }
        }
    }

    /// Write settings once changes have settled and no pointer button is held.
    fn save_settings(&mut self, ctx: &egui::Context) {
        if !self.settings_save.is_pending() {
            return;
        }
        let (now, pointer_down) = ctx.input(|i| (i.time, i.pointer.any_down()));
        let busy = pointer_down || self.painter.is_drawing();
        if !self.settings_save.take_due(now, busy) {
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(config::SAVE_DELAY_SECONDS));
            return;
        }
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(e) = config::save_to_path(&self.settings, path) {
            log::warn!("Failed to save settings: {:#}", e);
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);
        if self.status.as_ref().and_then(|s| s.expires_at).is_some_and(|t| now > t) {
            self.status = None;
        }

        ui.horizontal(|ui| {
            match &self.status {
                Some(status) if status.is_error => {
                    ui.colored_label(egui::Color32::from_rgb(230, 90, 90), &status.text);
                }
                Some(status) => {
                    ui.label(&status.text);
                }
                None if self.dataset.folder().is_some() => {
                    ui.label("Ready");
                }
                None => {
                    ui.label("No folder loaded");
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.view.has_image() {
                    let pan = match self.view.drag_mode() {
                        DragMode::ScrollHandDrag => "pan on",
                        DragMode::NoDrag => "pan off",
                    };
                    ui.label(format!(
                        "Zoom {:.0}%  |  Brush {:.0}px  |  {}",
                        self.view.scale() * 100.0,
                        self.painter.brush().size(),
                        pan
                    ));
                }
            });
        });

        if self.status.as_ref().is_some_and(|s| s.expires_at.is_some()) {
            ui.ctx().request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(folder) = self.pending_folder.take() {
            self.open_folder(&folder, ctx);
        }

        let mut commands = self.collect_shortcuts(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            if let Some(command) = self.menu_bar(ui) {
                commands.push(command);
            }
        });

        // Title and delete button
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if header::show(ui, &self.title, !self.dataset.is_empty()) {
                commands.push(Command::Delete);
            }
        });

        // Mask toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                let state = ToolbarState {
                    draw_enabled: self.painter.draw_enabled(),
                    can_undo: self.painter.can_undo(),
                    can_redo: self.painter.can_redo(),
                };
                toolbar::show(ui, self.painter.brush_mut(), state)
            })
            .inner;
        match toolbar_action {
            ToolbarAction::None => {}
            ToolbarAction::SetDrawEnabled(enabled) => commands.push(Command::SetDrawEnabled(enabled)),
            ToolbarAction::BrushChanged => {
                self.settings.brush_size = self.painter.brush().size();
                self.settings_save.mark(ctx.input(|i| i.time));
            }
            ToolbarAction::Undo => commands.push(Command::Undo),
            ToolbarAction::Redo => commands.push(Command::Redo),
            ToolbarAction::ClearMask => commands.push(Command::ClearMask),
            ToolbarAction::InvertMask => commands.push(Command::InvertMask),
            ToolbarAction::FitView => commands.push(Command::FitView),
        }

        // Status line and navigation (bottom-most first)
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));

        let nav_action = egui::TopBottomPanel::bottom("navigation")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                navigation::show(ui, !self.dataset.is_empty())
            })
            .inner;
        match nav_action {
            NavAction::Previous => commands.push(Command::Previous),
            NavAction::Next => commands.push(Command::Next),
            NavAction::None => {}
        }

        // Caption and tag editors
        let has_current = self.dataset.current().is_some();
        let annotation_action = egui::TopBottomPanel::bottom("annotations")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                annotations::show(ui, has_current, [&mut self.caption, &mut self.tags])
            })
            .inner;
        match annotation_action {
            AnnotationAction::Create(kind) => self.create_text(kind),
            AnnotationAction::Edited(kind) => self.save_text(kind),
            AnnotationAction::None => {}
        }

        // Viewer (center)
        let canvas_actions = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let content = CanvasContent {
                    image_texture: self.image.as_ref().map(|i| &i.texture),
                    mask_texture: self.mask_texture.as_ref(),
                    brush_size: self.painter.brush().size(),
                    draw_enabled: self.painter.draw_enabled(),
                    drawing: self.painter.is_drawing(),
                    load_error: self.load_error,
                    has_dataset: self.dataset.folder().is_some(),
                };
                canvas::show(ui, &mut self.view, content)
            })
            .inner;

        for action in canvas_actions {
            match action {
                CanvasAction::BeginStroke(button, point) => self.painter.pointer_down(button, point),
                CanvasAction::ContinueStroke(button, point) => self.painter.pointer_move(button, point),
                CanvasAction::EndStroke => {
                    if self.painter.pointer_up() {
                        self.save_mask();
                    }
                }
                CanvasAction::ResizeBrush(delta) => {
                    self.painter.brush_mut().adjust_by_wheel(delta);
                    self.settings.brush_size = self.painter.brush().size();
                    self.settings_save.mark(ctx.input(|i| i.time));
                }
            }
        }

        for command in commands {
            self.run(command, ctx);
        }

        self.index_dialog(ctx);
        self.sync_textures(ctx);

        self.save_settings(ctx);
    }
}
