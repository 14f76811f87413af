//! Force read mode plugin
//!
//! Keeps documents under configured folders, or matching configured file
//! paths, in reading mode whenever the workspace layout changes. Other
//! documents can optionally be switched back to source mode.

pub mod matcher;
pub mod reconciler;
pub mod settings;
pub mod settings_tab;

use self::reconciler::{reconcile, ReconcileReport};
use self::settings::{merge_with_defaults, parse_path_list, ForceReadSettings};
use self::settings_tab::{SettingsChange, SettingsTab};
use super::api::{Notice, Plugin, PluginCommand, PluginContext, PluginManifest, Workspace};
use super::storage::PluginStorage;

pub const PLUGIN_ID: &str = "force-read-mode";
pub const TOGGLE_COMMAND: &str = "force-read-mode:toggle";
pub const REAPPLY_COMMAND: &str = "force-read-mode:reapply";

/// Forces target documents into reading mode
pub struct ForceReadPlugin {
    manifest: PluginManifest,
    settings: ForceReadSettings,
    /// Runtime switch; not persisted, back on after every load
    enabled: bool,
    storage: Option<Box<dyn PluginStorage>>,
    tab: SettingsTab,
}

impl Default for ForceReadPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceReadPlugin {
    pub fn new() -> Self {
        Self {
            manifest: PluginManifest {
                id: PLUGIN_ID.to_string(),
                name: "Force Read Mode".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Open documents in selected folders and files in reading mode".to_string(),
                author: "Force Read Mode Contributors".to_string(),
            },
            settings: ForceReadSettings::default(),
            enabled: true,
            storage: None,
            tab: SettingsTab::default(),
        }
    }

    pub fn settings(&self) -> &ForceReadSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enable flag and describe the new state
    pub fn toggle(&mut self) -> Notice {
        self.enabled = !self.enabled;
        tracing::info!("Force read mode {}", if self.enabled { "enabled" } else { "disabled" });
        if self.enabled {
            Notice::new("Force read mode enabled")
        } else {
            Notice::new("Force read mode disabled")
        }
    }

    /// Reconcile every open view, unless disabled
    pub fn apply(&mut self, workspace: &mut dyn Workspace) -> Option<ReconcileReport> {
        if !self.enabled {
            return None;
        }
        let report = reconcile(workspace, &self.settings);
        tracing::debug!(
            "Force read pass: {} to reading, {} to source, {} untouched, {} skipped",
            report.forced_preview,
            report.forced_source,
            report.untouched,
            report.skipped
        );
        Some(report)
    }

    /// Apply one settings tab edit and persist the result
    pub fn apply_change(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::FolderPaths(text) => self.settings.target_folder_paths = parse_path_list(&text),
            SettingsChange::FilePaths(text) => self.settings.target_file_paths = parse_path_list(&text),
            SettingsChange::RestoreSourceMode(restore) => self.settings.restore_source_mode = restore,
            SettingsChange::FolderMatch(policy) => self.settings.folder_match = policy,
        }
        self.save_settings();
    }

    fn load_settings(&mut self) {
        let loaded = match self.storage.as_ref().map(|storage| storage.load_data()) {
            Some(Ok(data)) => data,
            Some(Err(e)) => {
                tracing::warn!("Failed to load force read settings, using defaults: {}", e);
                None
            }
            None => None,
        };
        self.settings = merge_with_defaults(ForceReadSettings::default(), loaded.as_ref());
    }

    fn save_settings(&mut self) {
        let data = self.settings.to_value();
        if let Some(storage) = self.storage.as_mut() {
            if let Err(e) = storage.save_data(&data) {
                tracing::error!("Failed to save force read settings: {}", e);
            }
        }
    }
}

impl Plugin for ForceReadPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn on_load(&mut self, ctx: PluginContext) {
        self.storage = Some(ctx.storage);
        self.load_settings();
        self.enabled = true;
        self.tab = SettingsTab::new(&self.settings);
        tracing::info!(
            "Loaded force read mode from {}: {} folders, {} files",
            ctx.data_dir.display(),
            self.settings.target_folder_paths.len(),
            self.settings.target_file_paths.len()
        );
    }

    fn on_unload(&mut self) {
        self.storage = None;
    }

    fn on_layout_change(&mut self, workspace: &mut dyn Workspace) {
        self.apply(workspace);
    }

    fn commands(&self) -> Vec<PluginCommand> {
        let toggle = if self.enabled {
            "Disable force read mode"
        } else {
            "Enable force read mode"
        };
        vec![
            PluginCommand::new(TOGGLE_COMMAND, toggle),
            PluginCommand::new(REAPPLY_COMMAND, "Reapply force read mode to open documents"),
        ]
    }

    fn on_command(&mut self, id: &str, workspace: &mut dyn Workspace) -> Option<Notice> {
        match id {
            TOGGLE_COMMAND => Some(self.toggle()),
            REAPPLY_COMMAND => match self.apply(workspace) {
                Some(_) => None,
                None => Some(Notice::new("Force read mode is disabled")),
            },
            _ => None,
        }
    }

    fn has_settings(&self) -> bool {
        true
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui) {
        for change in self.tab.show(ui, &self.settings) {
            self.apply_change(change);
        }
    }
}
