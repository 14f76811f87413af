//! Tab strip above the editor area

use eframe::egui;

use crate::app::ForceReadApp;
use crate::core::workspace::{LeafContent, LeafId};
use crate::plugin::api::MarkdownView;

enum TabAction {
    Activate(LeafId),
    Close(LeafId),
    New,
    ToggleMode,
}

/// Tab strip with a reading/source switch for the active tab
pub struct TabBar;

impl TabBar {
    pub fn show(ui: &mut egui::Ui, app: &mut ForceReadApp) {
        let mut action = None;
        let active = app.workspace.active_id();

        ui.horizontal(|ui| {
            for leaf in app.workspace.leaves() {
                let is_active = active == Some(leaf.id);
                if ui.selectable_label(is_active, leaf.title()).clicked() {
                    action = Some(TabAction::Activate(leaf.id));
                }
                if ui.small_button("\u{2715}").on_hover_text("Close").clicked() {
                    action = Some(TabAction::Close(leaf.id));
                }
                ui.separator();
            }
            if ui.button("+").on_hover_text("New tab").clicked() {
                action = Some(TabAction::New);
            }

            if let Some(LeafContent::Markdown(view)) = app.workspace.active_leaf().map(|l| &l.content) {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let next = view.mode().toggled();
                    if ui
                        .button(view.mode().label())
                        .on_hover_text(format!("Switch to {} mode (Ctrl+E)", next.label().to_lowercase()))
                        .clicked()
                    {
                        action = Some(TabAction::ToggleMode);
                    }
                });
            }
        });

        match action {
            Some(TabAction::Activate(id)) => app.workspace.activate(id),
            Some(TabAction::Close(id)) => app.close_leaf(id),
            Some(TabAction::New) => {
                app.workspace.new_tab();
            }
            Some(TabAction::ToggleMode) => app.toggle_active_mode(),
            None => {}
        }
    }
}
