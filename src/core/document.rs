//! Markdown documents backing the editor views

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A markdown document loaded from the vault
#[derive(Debug, Clone)]
pub struct Document {
    /// Absolute file path
    pub path: PathBuf,
    /// Document content
    pub content: String,
    /// Whether the document has unsaved changes
    pub modified: bool,
}

impl Document {
    /// Open a document from a file
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
            modified: false,
        })
    }

    /// Write the content back and clear the modified flag
    pub fn save(&mut self) -> Result<()> {
        fs::write(&self.path, &self.content)
            .with_context(|| format!("Failed to save file: {}", self.path.display()))?;
        self.modified = false;
        tracing::info!("Saved document: {}", self.path.display());
        Ok(())
    }

    /// File name without extension
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Body with any leading `---` frontmatter block removed
    pub fn body(&self) -> &str {
        let Some(rest) = self.content.strip_prefix("---") else {
            return &self.content;
        };
        match rest.find("\n---") {
            Some(end) => {
                let after = &rest[end + 4..];
                after.trim_start_matches(['\r', '\n'])
            }
            None => &self.content,
        }
    }
}
