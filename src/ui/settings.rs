//! Settings window: editor options, plugin switches and plugin settings tabs

use eframe::egui;

use crate::core::config::AppConfig;
use crate::plugin::api::ViewMode;
use crate::plugin::manager::PluginManager;

pub struct SettingsWindow;

impl SettingsWindow {
    /// Show the window while `open` is set. Returns true when `config` changed.
    pub fn show(ctx: &egui::Context, open: &mut bool, config: &mut AppConfig, plugins: &mut PluginManager) -> bool {
        let mut config_changed = false;

        egui::Window::new("Settings")
            .open(open)
            .default_width(480.0)
            .vscroll(true)
            .show(ctx, |ui| {
                ui.heading("Editor");
                ui.horizontal(|ui| {
                    ui.label("New tabs open in");
                    for mode in [ViewMode::Source, ViewMode::Preview] {
                        if ui
                            .radio_value(&mut config.editor.default_mode, mode, mode.label())
                            .changed()
                        {
                            config_changed = true;
                        }
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Font size");
                    if ui
                        .add(egui::Slider::new(&mut config.editor.font_size, 8.0..=32.0))
                        .changed()
                    {
                        config_changed = true;
                    }
                });

                ui.separator();
                ui.heading("Plugins");
                for (manifest, enabled) in plugins.plugin_list() {
                    let mut on = enabled;
                    let hover = format!("{}\nv{} by {}", manifest.description, manifest.version, manifest.author);
                    if ui.checkbox(&mut on, &manifest.name).on_hover_text(hover).changed() {
                        let id = manifest.id;
                        if on {
                            plugins.enable_plugin(&id);
                            config.plugins.disabled_plugins.retain(|p| p != &id);
                        } else {
                            plugins.disable_plugin(&id);
                            config.plugins.disabled_plugins.push(id);
                        }
                        config_changed = true;
                    }
                }

                ui.separator();
                plugins.show_settings(ui);
            });

        config_changed
    }
}
