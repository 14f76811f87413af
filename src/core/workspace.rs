//! Open tabs (leaves) and the views they hold

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::document::Document;
use super::file_system::{is_markdown_path, vault_relative_path};
use crate::plugin::api::{MarkdownView, ViewMode, ViewState, Workspace, WorkspaceView};

pub type LeafId = u64;

/// Markdown document view
#[derive(Debug, Clone)]
pub struct MarkdownLeaf {
    pub document: Document,
    relative_path: Option<String>,
    state: ViewState,
}

impl MarkdownLeaf {
    pub fn new(document: Document, relative_path: Option<String>, mode: ViewMode) -> Self {
        Self {
            document,
            relative_path,
            state: ViewState {
                mode,
                ..Default::default()
            },
        }
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }
}

impl MarkdownView for MarkdownLeaf {
    fn file_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    fn state(&self) -> ViewState {
        self.state
    }

    fn set_state(&mut self, state: ViewState) {
        self.state = state;
    }
}

/// Any non-markdown file
#[derive(Debug, Clone)]
pub struct FileLeaf {
    pub path: PathBuf,
}

/// What a leaf shows
#[derive(Debug, Clone)]
pub enum LeafContent {
    Markdown(MarkdownLeaf),
    File(FileLeaf),
    Empty,
}

/// One tab in the workspace
#[derive(Debug, Clone)]
pub struct Leaf {
    pub id: LeafId,
    pub content: LeafContent,
}

impl Leaf {
    pub fn title(&self) -> String {
        match &self.content {
            LeafContent::Markdown(view) => {
                if view.document.modified {
                    format!("{}*", view.document.title())
                } else {
                    view.document.title()
                }
            }
            LeafContent::File(view) => view
                .path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
            LeafContent::Empty => "New tab".to_string(),
        }
    }

    /// Write the document back if it has unsaved edits
    pub fn save_if_modified(&mut self) -> Result<()> {
        if let LeafContent::Markdown(view) = &mut self.content {
            if view.document.modified {
                view.document.save()?;
            }
        }
        Ok(())
    }

    /// Absolute path of the file shown, if any
    pub fn file(&self) -> Option<&Path> {
        match &self.content {
            LeafContent::Markdown(view) => Some(view.document.path.as_path()),
            LeafContent::File(view) => Some(view.path.as_path()),
            LeafContent::Empty => None,
        }
    }
}

impl WorkspaceView for Leaf {
    fn view_type(&self) -> &str {
        match self.content {
            LeafContent::Markdown(_) => "markdown",
            LeafContent::File(_) => "file",
            LeafContent::Empty => "empty",
        }
    }

    fn as_markdown_mut(&mut self) -> Option<&mut dyn MarkdownView> {
        match &mut self.content {
            LeafContent::Markdown(view) => Some(view),
            _ => None,
        }
    }
}

/// The tab strip of the main editor area
#[derive(Debug, Default)]
pub struct HostWorkspace {
    leaves: Vec<Leaf>,
    active: Option<LeafId>,
    next_id: LeafId,
    layout_changed: bool,
}

impl HostWorkspace {
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn active_id(&self) -> Option<LeafId> {
        self.active
    }

    pub fn active_leaf(&self) -> Option<&Leaf> {
        self.active.and_then(|id| self.leaves.iter().find(|l| l.id == id))
    }

    pub fn active_leaf_mut(&mut self) -> Option<&mut Leaf> {
        let id = self.active?;
        self.leaves.iter_mut().find(|l| l.id == id)
    }

    /// Open `path` in the active leaf if it is empty, else in a new leaf.
    /// Focuses the existing leaf when the file is already open.
    pub fn open_file(&mut self, path: &Path, vault_root: Option<&Path>, default_mode: ViewMode) -> Result<LeafId> {
        if let Some(id) = self.leaves.iter().find(|l| l.file() == Some(path)).map(|l| l.id) {
            self.activate(id);
            return Ok(id);
        }

        let content = if is_markdown_path(path) {
            let document = Document::open(path)?;
            let relative = vault_root.and_then(|root| vault_relative_path(root, path));
            LeafContent::Markdown(MarkdownLeaf::new(document, relative, default_mode))
        } else {
            LeafContent::File(FileLeaf {
                path: path.to_path_buf(),
            })
        };

        let empty_active = self
            .active_leaf()
            .filter(|leaf| matches!(leaf.content, LeafContent::Empty))
            .map(|leaf| leaf.id);
        let id = match empty_active {
            Some(id) => {
                if let Some(leaf) = self.leaves.iter_mut().find(|l| l.id == id) {
                    leaf.content = content;
                }
                id
            }
            None => self.push(content),
        };
        self.active = Some(id);
        self.layout_changed = true;
        tracing::debug!("Opened {} in leaf {}", path.display(), id);
        Ok(id)
    }

    /// Open an empty leaf and focus it
    pub fn new_tab(&mut self) -> LeafId {
        let id = self.push(LeafContent::Empty);
        self.active = Some(id);
        self.layout_changed = true;
        id
    }

    pub fn activate(&mut self, id: LeafId) {
        if self.active != Some(id) && self.leaves.iter().any(|l| l.id == id) {
            self.active = Some(id);
            self.layout_changed = true;
        }
    }

    /// Save and close a leaf, focusing its neighbour if it was active.
    /// The leaf stays open when its document cannot be saved.
    pub fn close(&mut self, id: LeafId) -> Result<()> {
        let Some(index) = self.leaves.iter().position(|l| l.id == id) else {
            return Ok(());
        };
        self.leaves[index].save_if_modified()?;
        self.leaves.remove(index);
        if self.active == Some(id) {
            let next = index.min(self.leaves.len().saturating_sub(1));
            self.active = self.leaves.get(next).map(|l| l.id);
        }
        self.layout_changed = true;
        Ok(())
    }

    /// Save every modified document, then close every leaf.
    /// Nothing is closed if any save fails.
    pub fn clear(&mut self) -> Result<()> {
        for leaf in &mut self.leaves {
            leaf.save_if_modified()?;
        }
        if !self.leaves.is_empty() {
            self.leaves.clear();
            self.active = None;
            self.layout_changed = true;
        }
        Ok(())
    }

    /// Whether the layout changed since the last call
    pub fn take_layout_change(&mut self) -> bool {
        std::mem::take(&mut self.layout_changed)
    }

    fn push(&mut self, content: LeafContent) -> LeafId {
        let id = self.next_id;
        self.next_id += 1;
        self.leaves.push(Leaf { id, content });
        id
    }
}

impl Workspace for HostWorkspace {
    fn for_each_view(&mut self, f: &mut dyn FnMut(&mut dyn WorkspaceView)) {
        for leaf in &mut self.leaves {
            f(leaf);
        }
    }
}
