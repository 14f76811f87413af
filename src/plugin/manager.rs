//! Plugin manager for loading and managing plugins

use std::path::{Path, PathBuf};

use super::api::{Notice, Plugin, PluginCommand, PluginContext, PluginManifest, Workspace};
use super::force_read::ForceReadPlugin;
use super::storage::{JsonFileStorage, PluginStorage};

struct PluginEntry {
    plugin: Box<dyn Plugin>,
    enabled: bool,
}

/// Plugin manager
pub struct PluginManager {
    /// Registered plugins in registration order
    plugins: Vec<PluginEntry>,
    /// Root directory for per-plugin data
    data_dir: PathBuf,
    /// Notices raised by plugins, waiting to be shown
    notices: Vec<Notice>,
}

impl PluginManager {
    /// Create a new plugin manager with no plugins
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            plugins: Vec::new(),
            data_dir,
            notices: Vec::new(),
        }
    }

    /// Create a manager with every built-in plugin registered
    pub fn with_builtin(data_dir: PathBuf) -> Self {
        let mut manager = Self::new(data_dir);
        manager.register(Box::new(ForceReadPlugin::new()));
        manager
    }

    /// Register a plugin without enabling it
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        tracing::info!("Registered plugin: {} v{}", plugin.name(), plugin.manifest().version);
        self.plugins.push(PluginEntry {
            plugin,
            enabled: false,
        });
    }

    /// Enable every registered plugin not listed in `disabled`
    pub fn enable_all_except(&mut self, disabled: &[String]) {
        let ids: Vec<String> = self
            .plugins
            .iter()
            .map(|entry| entry.plugin.id().to_string())
            .filter(|id| !disabled.contains(id))
            .collect();
        for id in ids {
            self.enable_plugin(&id);
        }
        let enabled = self.plugins.iter().filter(|e| e.enabled).count();
        tracing::info!("Enabled {} of {} plugins", enabled, self.plugin_count());
    }

    /// Directory holding the data of plugin `id`
    pub fn plugin_dir(&self, id: &str) -> PathBuf {
        self.data_dir.join(id)
    }

    /// Enable a plugin, backing it with a `data.json` in its directory
    pub fn enable_plugin(&mut self, id: &str) -> bool {
        let plugin_dir = self.plugin_dir(id);
        let storage = JsonFileStorage::new(&plugin_dir);
        tracing::debug!("Plugin {} stores data in {}", id, storage.path().display());
        self.enable_with_storage(id, &plugin_dir, Box::new(storage))
    }

    /// Enable a plugin with the given storage. Returns false for unknown ids.
    pub fn enable_with_storage(&mut self, id: &str, plugin_dir: &Path, storage: Box<dyn PluginStorage>) -> bool {
        let Some(entry) = self.plugins.iter_mut().find(|e| e.plugin.id() == id) else {
            tracing::warn!("Cannot enable unknown plugin: {}", id);
            return false;
        };
        if entry.enabled {
            return true;
        }

        entry.plugin.on_load(PluginContext {
            data_dir: plugin_dir.to_path_buf(),
            storage,
        });
        entry.enabled = true;
        tracing::info!("Enabled plugin: {}", id);
        true
    }

    /// Disable a plugin
    pub fn disable_plugin(&mut self, id: &str) {
        if let Some(entry) = self.plugins.iter_mut().find(|e| e.plugin.id() == id && e.enabled) {
            entry.plugin.on_unload();
            entry.enabled = false;
            tracing::info!("Disabled plugin: {}", id);
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.plugins.iter().any(|e| e.plugin.id() == id && e.enabled)
    }

    /// Manifest and enabled state of every registered plugin
    pub fn plugin_list(&self) -> Vec<(PluginManifest, bool)> {
        self.plugins
            .iter()
            .map(|e| (e.plugin.manifest().clone(), e.enabled))
            .collect()
    }

    /// Notify enabled plugins that the layout changed
    pub fn on_layout_change(&mut self, workspace: &mut dyn Workspace) {
        for entry in self.plugins.iter_mut().filter(|e| e.enabled) {
            tracing::trace!("Layout change -> {}", entry.plugin.id());
            entry.plugin.on_layout_change(workspace);
        }
    }

    /// Commands of all enabled plugins, with their current labels
    pub fn commands(&self) -> Vec<PluginCommand> {
        self.plugins
            .iter()
            .filter(|e| e.enabled)
            .flat_map(|e| e.plugin.commands())
            .collect()
    }

    /// Execute a plugin command. Returns false if no enabled plugin owns it.
    pub fn execute_command(&mut self, command_id: &str, workspace: &mut dyn Workspace) -> bool {
        let Some(entry) = self
            .plugins
            .iter_mut()
            .filter(|e| e.enabled)
            .find(|e| e.plugin.commands().iter().any(|c| c.id == command_id))
        else {
            tracing::warn!("No plugin provides command: {}", command_id);
            return false;
        };

        tracing::debug!("Executing command {} in plugin {}", command_id, entry.plugin.id());
        if let Some(notice) = entry.plugin.on_command(command_id, workspace) {
            self.notices.push(notice);
        }
        true
    }

    /// Drain pending notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Render the settings tab of every enabled plugin that has one
    pub fn show_settings(&mut self, ui: &mut egui::Ui) {
        for entry in self.plugins.iter_mut().filter(|e| e.enabled && e.plugin.has_settings()) {
            let name = entry.plugin.name().to_string();
            ui.push_id(entry.plugin.id().to_string(), |ui| {
                egui::CollapsingHeader::new(name)
                    .default_open(true)
                    .show(ui, |ui| entry.plugin.settings_ui(ui));
            });
        }
    }

    /// Get plugin count
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }
}
