//! Command palette listing plugin commands

use eframe::egui;

use crate::plugin::api::PluginCommand;

/// Commands whose label contains every word of `query`, ignoring case
pub fn filter_commands<'a>(query: &str, commands: &'a [PluginCommand]) -> Vec<&'a PluginCommand> {
    let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    commands
        .iter()
        .filter(|command| {
            let name = command.name.to_lowercase();
            words.iter().all(|word| name.contains(word.as_str()))
        })
        .collect()
}

/// Palette window state
#[derive(Debug, Default)]
pub struct CommandPalette {
    pub open: bool,
    query: String,
}

impl CommandPalette {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.query.clear();
    }

    /// Show the palette. Returns the id of the command the user picked.
    pub fn show(&mut self, ctx: &egui::Context, commands: &[PluginCommand]) -> Option<String> {
        if !self.open {
            return None;
        }

        let mut chosen = None;
        let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        egui::Window::new("Command palette")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 60.0])
            .default_width(420.0)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("Type a command...")
                        .desired_width(f32::INFINITY),
                );
                response.request_focus();

                let matches = filter_commands(&self.query, commands);
                ui.separator();
                if matches.is_empty() {
                    ui.weak("No matching commands");
                }
                for command in &matches {
                    if ui.selectable_label(false, &command.name).clicked() {
                        chosen = Some(command.id.clone());
                    }
                }

                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    chosen = chosen.take().or_else(|| matches.first().map(|c| c.id.clone()));
                }
            });

        if chosen.is_some() {
            close = true;
        }
        if close {
            self.open = false;
            self.query.clear();
        }
        chosen
    }
}
