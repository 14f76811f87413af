//! Plugin API definitions
//!
//! Plugins never see the host's concrete view types. They reach open views
//! through the [`Workspace`], [`WorkspaceView`] and [`MarkdownView`]
//! capability traits and keep their data behind a [`PluginStorage`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::storage::PluginStorage;

/// Rendering mode of a markdown view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Raw text, directly editable
    #[default]
    Source,
    /// Rendered, read-only
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Source => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Source,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Source => "Source",
            ViewMode::Preview => "Reading",
        }
    }
}

/// Snapshot of a markdown view's state.
///
/// Only `mode` is meaningful to plugins; the remaining fields belong to the
/// host and must survive any state write a plugin makes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Vertical scroll offset in points
    pub scroll_offset: f32,
    /// Cursor position as a char index into the document
    pub cursor: Option<usize>,
}

/// A markdown document view owned by the host
pub trait MarkdownView {
    /// Vault-relative, `/`-separated path of the backing file
    fn file_path(&self) -> Option<&str>;

    /// Current view state
    fn state(&self) -> ViewState;

    /// Replace the view state
    fn set_state(&mut self, state: ViewState);

    fn mode(&self) -> ViewMode {
        self.state().mode
    }

    /// Override the mode, keeping every other state field
    fn set_mode(&mut self, mode: ViewMode) {
        let state = self.state();
        self.set_state(ViewState { mode, ..state });
    }
}

/// Any view living in a workspace leaf
pub trait WorkspaceView {
    /// Short type tag such as `markdown` or `empty`
    fn view_type(&self) -> &str;

    /// Downcast to a markdown view, if this is one
    fn as_markdown_mut(&mut self) -> Option<&mut dyn MarkdownView> {
        None
    }
}

/// The set of views currently open in the host
pub trait Workspace {
    /// Visit every open view in layout order
    fn for_each_view(&mut self, f: &mut dyn FnMut(&mut dyn WorkspaceView));
}

/// Context handed to a plugin when it is loaded
pub struct PluginContext {
    /// Plugin data directory
    pub data_dir: PathBuf,
    /// Persistent storage for the plugin's settings
    pub storage: Box<dyn PluginStorage>,
}

/// Plugin trait that all plugins must implement
pub trait Plugin {
    /// Static plugin metadata
    fn manifest(&self) -> &PluginManifest;

    fn id(&self) -> &str {
        &self.manifest().id
    }

    fn name(&self) -> &str {
        &self.manifest().name
    }

    /// Called when the plugin is enabled, before any other hook
    fn on_load(&mut self, ctx: PluginContext);

    /// Called when the plugin is disabled
    fn on_unload(&mut self) {}

    /// Called whenever the set or arrangement of open views changes
    fn on_layout_change(&mut self, _workspace: &mut dyn Workspace) {}

    /// Commands currently offered by this plugin.
    ///
    /// Queried on demand, so labels may change between calls.
    fn commands(&self) -> Vec<PluginCommand> {
        Vec::new()
    }

    /// Run one of this plugin's commands
    fn on_command(&mut self, _id: &str, _workspace: &mut dyn Workspace) -> Option<Notice> {
        None
    }

    /// Whether [`Plugin::settings_ui`] renders anything
    fn has_settings(&self) -> bool {
        false
    }

    /// Render the plugin's settings tab
    fn settings_ui(&mut self, _ui: &mut egui::Ui) {}
}

/// A command provided by a plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    /// Stable identifier, `<plugin id>:<command>`
    pub id: String,
    /// Display label
    pub name: String,
}

impl PluginCommand {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Plugin metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: Self::DEFAULT_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeView {
        state: ViewState,
    }

    impl MarkdownView for FakeView {
        fn file_path(&self) -> Option<&str> {
            None
        }

        fn state(&self) -> ViewState {
            self.state
        }

        fn set_state(&mut self, state: ViewState) {
            self.state = state;
        }
    }

    #[test]
    fn test_set_mode_keeps_other_state() {
        let mut view = FakeView {
            state: ViewState {
                mode: ViewMode::Source,
                scroll_offset: 120.5,
                cursor: Some(42),
            },
        };

        view.set_mode(ViewMode::Preview);

        assert_eq!(view.mode(), ViewMode::Preview);
        assert_eq!(view.state.scroll_offset, 120.5);
        assert_eq!(view.state.cursor, Some(42));
    }

    #[test]
    fn test_view_mode_toggled() {
        assert_eq!(ViewMode::Source.toggled(), ViewMode::Preview);
        assert_eq!(ViewMode::Preview.toggled(), ViewMode::Source);
    }
}
