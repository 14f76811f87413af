//! Source mode editor panel

use eframe::egui;

use crate::core::workspace::{LeafId, MarkdownLeaf};
use crate::plugin::api::MarkdownView;

/// Editable markdown source
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor for a markdown leaf in source mode
    pub fn show(ui: &mut egui::Ui, id: LeafId, view: &mut MarkdownLeaf, font_size: f32) {
        let offset = view.state().scroll_offset;

        let output = egui::ScrollArea::vertical()
            .id_salt(("editor_scroll", id))
            .vertical_scroll_offset(offset)
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut view.document.content)
                    .id_salt(("editor", id))
                    .font(egui::FontId::monospace(font_size))
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui)
            });

        let text = output.inner;
        if text.response.changed() {
            view.document.modified = true;
        }

        let state = view.state_mut();
        state.scroll_offset = output.state.offset.y;
        if let Some(range) = text.cursor_range {
            state.cursor = Some(range.primary.index);
        }
    }

    /// Shown when no tab is open, or the active tab is empty
    pub fn show_welcome(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading("Force Read Mode");
            ui.add_space(20.0);

            ui.label("Open a vault and pick a note from the explorer to get started.");
            ui.add_space(10.0);

            ui.label("Keyboard shortcuts:");
            ui.label("  Ctrl+S - Save");
            ui.label("  Ctrl+E - Toggle reading / source mode");
            ui.label("  Ctrl+P - Command palette");
            ui.label("  Ctrl+T - New tab");
            ui.label("  Ctrl+W - Close tab");
            ui.label("  Ctrl+B - Toggle sidebar");
        });
    }
}
