//! Reading mode panel using egui_commonmark

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::core::workspace::{FileLeaf, LeafId, MarkdownLeaf};
use crate::plugin::api::MarkdownView;

/// Rendered, read-only markdown
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show a markdown leaf in reading mode
    pub fn show(ui: &mut egui::Ui, id: LeafId, view: &mut MarkdownLeaf, cache: &mut CommonMarkCache) {
        let offset = view.state().scroll_offset;

        let output = egui::ScrollArea::vertical()
            .id_salt(("preview_scroll", id))
            .vertical_scroll_offset(offset)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                CommonMarkViewer::new().show(ui, cache, view.document.body());
            });

        view.state_mut().scroll_offset = output.state.offset.y;
    }

    /// Placeholder for files the app cannot render
    pub fn show_file(ui: &mut egui::Ui, view: &FileLeaf) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label(egui::RichText::new(view.path.display().to_string()).monospace());
            ui.label("This file type cannot be displayed here.");
            ui.add_space(10.0);
            if ui.button("Open in default app").clicked() {
                if let Err(e) = open::that(&view.path) {
                    tracing::error!("Failed to open {}: {}", view.path.display(), e);
                }
            }
        });
    }
}
