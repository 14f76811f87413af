//! Settings tab for the force read mode plugin

use super::matcher::FolderMatch;
use super::settings::{format_path_list, ForceReadSettings};

/// A single edit made in the settings tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsChange {
    /// Raw text of the folder list
    FolderPaths(String),
    /// Raw text of the exact file list
    FilePaths(String),
    RestoreSourceMode(bool),
    FolderMatch(FolderMatch),
}

/// Edit buffers backing the multi-line inputs
#[derive(Debug, Clone, Default)]
pub struct SettingsTab {
    folder_text: String,
    file_text: String,
}

fn folder_input_id() -> egui::Id {
    egui::Id::new("force_read_folder_paths")
}

fn file_input_id() -> egui::Id {
    egui::Id::new("force_read_file_paths")
}

impl SettingsTab {
    pub fn new(settings: &ForceReadSettings) -> Self {
        Self {
            folder_text: format_path_list(&settings.target_folder_paths),
            file_text: format_path_list(&settings.target_file_paths),
        }
    }

    /// Render the tab and report every edit made this frame
    pub fn show(&mut self, ui: &mut egui::Ui, settings: &ForceReadSettings) -> Vec<SettingsChange> {
        let mut changes = Vec::new();

        ui.label(egui::RichText::new("Target folders").strong());
        ui.label("Documents inside these folders always open in reading mode. One path per line.");
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.folder_text)
                .id(folder_input_id())
                .hint_text("Archive\nJournal/2023")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            changes.push(SettingsChange::FolderPaths(self.folder_text.clone()));
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Target files").strong());
        ui.label("These exact documents always open in reading mode. One path per line.");
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.file_text)
                .id(file_input_id())
                .hint_text("README.md\nProjects/plan.md")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            changes.push(SettingsChange::FilePaths(self.file_text.clone()));
        }

        ui.add_space(8.0);
        let mut restore = settings.restore_source_mode;
        if ui
            .checkbox(&mut restore, "Restore source mode")
            .on_hover_text("Switch every other document back to source mode")
            .changed()
        {
            changes.push(SettingsChange::RestoreSourceMode(restore));
        }

        let mut legacy = settings.folder_match == FolderMatch::Prefix;
        if ui
            .checkbox(&mut legacy, "Legacy prefix matching")
            .on_hover_text("Match folders as plain text prefixes, so \"notes\" also covers \"notes-archive\"")
            .changed()
        {
            let policy = if legacy {
                FolderMatch::Prefix
            } else {
                FolderMatch::SeparatorSafe
            };
            changes.push(SettingsChange::FolderMatch(policy));
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect};

    /// Centres of the restore and legacy checkboxes, read from the layout
    type Checkboxes = [Pos2; 2];

    fn run_frame(
        ctx: &egui::Context,
        tab: &mut SettingsTab,
        settings: &ForceReadSettings,
        events: Vec<Event>,
        focus: Option<egui::Id>,
    ) -> (Vec<SettingsChange>, Checkboxes) {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let mut changes = Vec::new();
        let mut checkboxes = [Pos2::ZERO; 2];
        let _ = ctx.run(input, |ctx| {
            if let Some(id) = focus {
                ctx.memory_mut(|m| m.request_focus(id));
            }
            egui::CentralPanel::default().show(ctx, |ui| {
                changes = tab.show(ui, settings);
                let gap = ui.spacing().item_spacing.y;
                let row = ui.spacing().interact_size.y;
                let x = ui.min_rect().left() + 6.0;
                let legacy = ui.cursor().top() - gap - row / 2.0;
                checkboxes = [Pos2::new(x, legacy - row - gap), Pos2::new(x, legacy)];
            });
        });
        (changes, checkboxes)
    }

    fn click(ctx: &egui::Context, tab: &mut SettingsTab, settings: &ForceReadSettings, at: Pos2) -> Vec<SettingsChange> {
        let button = |pressed| Event::PointerButton {
            pos: at,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        };
        let (pressed, _) = run_frame(ctx, tab, settings, vec![Event::PointerMoved(at), button(true)], None);
        assert!(pressed.is_empty());
        run_frame(ctx, tab, settings, vec![button(false)], None).0
    }

    #[test]
    fn test_new_fills_buffers_from_settings() {
        let settings = ForceReadSettings {
            target_folder_paths: vec!["Archive".into(), "Journal/2023".into()],
            target_file_paths: vec!["README.md".into()],
            ..Default::default()
        };
        let tab = SettingsTab::new(&settings);
        assert_eq!(tab.folder_text, "Archive\nJournal/2023");
        assert_eq!(tab.file_text, "README.md");
    }

    #[test]
    fn test_idle_frame_reports_nothing() {
        let ctx = egui::Context::default();
        let settings = ForceReadSettings::default();
        let mut tab = SettingsTab::new(&settings);

        let (changes, _) = run_frame(&ctx, &mut tab, &settings, Vec::new(), None);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_typing_reports_raw_text() {
        let ctx = egui::Context::default();
        let settings = ForceReadSettings::default();
        let mut tab = SettingsTab::new(&settings);
        run_frame(&ctx, &mut tab, &settings, Vec::new(), None);

        let (changes, _) = run_frame(
            &ctx,
            &mut tab,
            &settings,
            vec![Event::Text("Archive".into())],
            Some(folder_input_id()),
        );
        assert_eq!(changes, vec![SettingsChange::FolderPaths("Archive".into())]);

        let (changes, _) = run_frame(
            &ctx,
            &mut tab,
            &settings,
            vec![Event::Text("a.md".into())],
            Some(file_input_id()),
        );
        assert_eq!(changes, vec![SettingsChange::FilePaths("a.md".into())]);
        assert_eq!(tab.folder_text, "Archive");
    }

    #[test]
    fn test_checkboxes_map_to_changes() {
        let ctx = egui::Context::default();
        let mut settings = ForceReadSettings::default();
        let mut tab = SettingsTab::new(&settings);
        let (_, [restore, legacy]) = run_frame(&ctx, &mut tab, &settings, Vec::new(), None);

        let changes = click(&ctx, &mut tab, &settings, legacy);
        assert_eq!(changes, vec![SettingsChange::FolderMatch(FolderMatch::Prefix)]);
        settings.folder_match = FolderMatch::Prefix;

        let changes = click(&ctx, &mut tab, &settings, legacy);
        assert_eq!(changes, vec![SettingsChange::FolderMatch(FolderMatch::SeparatorSafe)]);
        settings.folder_match = FolderMatch::SeparatorSafe;

        let changes = click(&ctx, &mut tab, &settings, restore);
        assert_eq!(changes, vec![SettingsChange::RestoreSourceMode(true)]);
    }
}
