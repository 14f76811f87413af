//! File tree panel for vault navigation

use std::path::PathBuf;

use eframe::egui;

use crate::app::ForceReadApp;
use crate::core::file_system::FileNode;

/// File tree panel
pub struct FileTreePanel;

impl FileTreePanel {
    /// Show the file tree panel
    pub fn show(ui: &mut egui::Ui, app: &mut ForceReadApp) {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Explorer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("\u{21BB}").on_hover_text("Refresh").clicked() {
                        app.file_tree.refresh();
                    }
                });
            });

            ui.separator();

            let mut clicked: Option<PathBuf> = None;
            egui::ScrollArea::vertical()
                .id_salt("file_tree_scroll")
                .show(ui, |ui| match &app.file_tree.root {
                    Some(root) => {
                        let active = app.workspace.active_leaf().and_then(|l| l.file());
                        for child in &root.children {
                            Self::show_node(ui, child, active, &mut clicked);
                        }
                    }
                    None => {
                        ui.label("No vault open");
                        ui.add_space(10.0);
                        if ui.button("Open Vault...").clicked() {
                            if let Some(path) = rfd::FileDialog::new().pick_folder() {
                                clicked = Some(path);
                            }
                        }
                    }
                });

            if let Some(path) = clicked {
                if path.is_dir() {
                    app.open_vault(path);
                } else {
                    app.open_file(&path);
                }
            }
        });
    }

    fn show_node(
        ui: &mut egui::Ui,
        node: &FileNode,
        active: Option<&std::path::Path>,
        clicked: &mut Option<PathBuf>,
    ) {
        if node.is_dir {
            egui::CollapsingHeader::new(format!("\u{1F4C1} {}", node.name))
                .id_salt(&node.path)
                .default_open(false)
                .show(ui, |ui| {
                    for child in &node.children {
                        Self::show_node(ui, child, active, clicked);
                    }
                });
        } else {
            let icon = if node.is_markdown() { "\u{1F4DD}" } else { "\u{1F4C4}" };
            let is_active = active == Some(node.path.as_path());
            if ui
                .selectable_label(is_active, format!("{} {}", icon, node.name))
                .clicked()
            {
                *clicked = Some(node.path.clone());
            }
        }
    }
}
