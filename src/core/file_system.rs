//! Vault file tree and path helpers

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Maximum folder depth scanned below the vault root
const MAX_DEPTH: usize = 10;

/// Directories never shown in the tree
const IGNORED_DIRS: &[&str] = &["node_modules", "target"];

/// Represents a file or directory in the tree
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub children: Vec<FileNode>,
}

impl FileNode {
    fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            name,
            path,
            is_dir,
            children: Vec::new(),
        }
    }

    pub fn is_markdown(&self) -> bool {
        !self.is_dir && is_markdown_path(&self.path)
    }

    /// Directories first, then files, case-insensitively by name
    fn sort_children(&mut self) {
        self.children.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        for child in &mut self.children {
            child.sort_children();
        }
    }
}

/// File tree representing a vault structure
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    pub root: Option<FileNode>,
}

impl FileTree {
    /// Scan a vault directory
    pub fn from_path(root: &Path) -> Self {
        let mut nodes: BTreeMap<PathBuf, FileNode> = BTreeMap::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path().to_path_buf();
                    nodes.insert(path.clone(), FileNode::new(path, entry.file_type().is_dir()));
                }
                Err(e) => tracing::warn!("Skipping unreadable vault entry: {}", e),
            }
        }

        // Attach deepest entries first so every directory is complete before
        // it is moved into its parent
        let mut paths: Vec<PathBuf> = nodes.keys().cloned().collect();
        paths.sort_by_key(|p| std::cmp::Reverse(p.components().count()));

        let mut root_node = FileNode::new(root.to_path_buf(), true);
        for path in paths {
            let Some(node) = nodes.remove(&path) else { continue };
            let parent_node = match path.parent() {
                Some(parent) => nodes.get_mut(parent),
                None => None,
            };
            match parent_node {
                Some(parent_node) => parent_node.children.push(node),
                None => root_node.children.push(node),
            }
        }
        root_node.sort_children();

        Self { root: Some(root_node) }
    }

    /// Path of the vault root, if a vault is open
    pub fn root_path(&self) -> Option<&Path> {
        self.root.as_ref().map(|root| root.path.as_path())
    }

    /// Rescan from disk
    pub fn refresh(&mut self) {
        if let Some(root) = self.root_path().map(Path::to_path_buf) {
            *self = Self::from_path(&root);
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && IGNORED_DIRS.contains(&&*name))
}

/// Whether the path has a markdown extension
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// `path` relative to `vault_root`, with `/` separators on every platform.
///
/// Returns `None` for paths outside the vault.
pub fn vault_relative_path(vault_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(vault_root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_vault_relative_path() {
        let root = Path::new("/vault");
        assert_eq!(
            vault_relative_path(root, Path::new("/vault/Archive/2021/old.md")),
            Some("Archive/2021/old.md".to_string())
        );
        assert_eq!(vault_relative_path(root, Path::new("/elsewhere/x.md")), None);
        assert_eq!(vault_relative_path(root, Path::new("/vault")), None);
    }

    #[test]
    fn test_is_markdown_path() {
        assert!(is_markdown_path(Path::new("a/b.md")));
        assert!(is_markdown_path(Path::new("a/b.MARKDOWN")));
        assert!(!is_markdown_path(Path::new("a/b.png")));
        assert!(!is_markdown_path(Path::new("a/md")));
    }

    #[test]
    fn test_tree_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Archive/2021")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join("Archive/2021/old.md"), "").unwrap();
        fs::write(root.join("b.md"), "").unwrap();
        fs::write(root.join("A.md"), "").unwrap();
        fs::write(root.join(".obsidian/config"), "").unwrap();

        let tree = FileTree::from_path(root);
        let root_node = tree.root.as_ref().unwrap();
        let names: Vec<&str> = root_node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "A.md", "b.md"]);

        let archive = &root_node.children[0];
        assert!(archive.is_dir);
        assert_eq!(archive.children[0].name, "2021");
        assert!(archive.children[0].children[0].is_markdown());
        assert_eq!(tree.root_path(), Some(root));
    }
}
