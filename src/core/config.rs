//! Application configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::plugin::api::ViewMode;

const MAX_RECENT_VAULTS: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last opened vault path
    pub last_vault: Option<PathBuf>,
    /// Recent vaults, most recent first
    pub recent_vaults: Vec<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
    /// Plugin settings
    pub plugins: PluginConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Mode new markdown tabs open in
    pub default_mode: ViewMode,
    /// Font size in pixels
    pub font_size: f32,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Sidebar width
    pub sidebar_width: f32,
}

/// Plugin settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Plugin data directory override
    pub data_dir: Option<PathBuf>,
    /// Built-in plugins the user switched off
    pub disabled_plugins: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_mode: ViewMode::Source,
            font_size: 14.0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { sidebar_width: 250.0 }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "force-read-mode", "ForceReadMode")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("Could not determine config directory")?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a vault to recent vaults
    pub fn add_recent_vault(&mut self, path: PathBuf) {
        self.recent_vaults.retain(|p| p != &path);
        self.recent_vaults.insert(0, path);
        self.recent_vaults.truncate(MAX_RECENT_VAULTS);
    }

    /// Root directory for plugin data
    pub fn plugin_data_dir(&self) -> PathBuf {
        self.plugins.data_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("plugins"))
                .unwrap_or_else(|| PathBuf::from("plugins"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AppConfig::from_json(r#"{ "last_vault": "/tmp/vault", "ui": {} }"#).unwrap();
        assert_eq!(config.last_vault, Some(PathBuf::from("/tmp/vault")));
        assert_eq!(config.ui.sidebar_width, 250.0);
        assert_eq!(config.editor.default_mode, ViewMode::Source);
        assert!(config.plugins.disabled_plugins.is_empty());
    }

    #[test]
    fn test_recent_vaults_deduplicated_and_capped() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_vault(PathBuf::from(format!("/vaults/{i}")));
        }
        config.add_recent_vault(PathBuf::from("/vaults/5"));

        assert_eq!(config.recent_vaults.len(), MAX_RECENT_VAULTS);
        assert_eq!(config.recent_vaults[0], PathBuf::from("/vaults/5"));
        assert_eq!(
            config.recent_vaults.iter().filter(|p| **p == PathBuf::from("/vaults/5")).count(),
            1
        );
    }

    #[test]
    fn test_plugin_data_dir_override() {
        let mut config = AppConfig::default();
        config.plugins.data_dir = Some(PathBuf::from("/data/plugins"));
        assert_eq!(config.plugin_data_dir(), PathBuf::from("/data/plugins"));
    }
}
