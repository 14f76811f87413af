//! Classification of document paths against the configured targets

use serde::{Deserialize, Serialize};

use super::settings::ForceReadSettings;

/// How a configured folder is compared against a document path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FolderMatch {
    /// The path is the folder itself or lies below `folder/`
    #[default]
    SeparatorSafe,
    /// Plain string prefix test. Also matches siblings sharing a prefix
    /// (`notes` matches `notes-archive/x.md`); only kept for old setups.
    Prefix,
}

/// Borrowed view of the target lists, ready for repeated lookups
#[derive(Debug)]
pub struct PathMatcher<'a> {
    folders: Vec<&'a str>,
    files: &'a [String],
    policy: FolderMatch,
}

impl<'a> PathMatcher<'a> {
    pub fn new(settings: &'a ForceReadSettings) -> Self {
        let policy = settings.folder_match;
        let folders = settings
            .target_folder_paths
            .iter()
            .filter_map(|folder| match policy {
                FolderMatch::SeparatorSafe => {
                    let folder = folder.trim_end_matches('/');
                    (!folder.is_empty()).then_some(folder)
                }
                FolderMatch::Prefix => Some(folder.as_str()),
            })
            .collect();

        Self {
            folders,
            files: &settings.target_file_paths,
            policy,
        }
    }

    /// Whether `path` lies inside one of the target folders
    pub fn is_target_folder(&self, path: &str) -> bool {
        self.folders.iter().any(|folder| match self.policy {
            FolderMatch::SeparatorSafe => {
                path == *folder
                    || path
                        .strip_prefix(folder)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            FolderMatch::Prefix => path.starts_with(folder),
        })
    }

    /// Whether `path` is one of the exact target files
    pub fn is_target_file(&self, path: &str) -> bool {
        self.files.iter().any(|file| file == path)
    }

    pub fn is_target(&self, path: &str) -> bool {
        self.is_target_folder(path) || self.is_target_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(folders: &[&str], files: &[&str], policy: FolderMatch) -> ForceReadSettings {
        ForceReadSettings {
            target_folder_paths: folders.iter().map(|s| s.to_string()).collect(),
            target_file_paths: files.iter().map(|s| s.to_string()).collect(),
            folder_match: policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_folder_matches_nested_paths() {
        let settings = settings(&["notes"], &[], FolderMatch::SeparatorSafe);
        let matcher = PathMatcher::new(&settings);

        assert!(matcher.is_target_folder("notes/x.md"));
        assert!(matcher.is_target_folder("notes/deep/er/y.md"));
        assert!(!matcher.is_target_folder("other/x.md"));
    }

    #[test]
    fn test_separator_safe_rejects_shared_prefix() {
        let settings = settings(&["notes"], &[], FolderMatch::SeparatorSafe);
        let matcher = PathMatcher::new(&settings);

        assert!(matcher.is_target_folder("notes/x.md"));
        assert!(!matcher.is_target_folder("notes-archive/x.md"));
        assert!(!matcher.is_target_folder("notes.md"));
    }

    #[test]
    fn test_prefix_policy_matches_shared_prefix() {
        let settings = settings(&["notes"], &[], FolderMatch::Prefix);
        let matcher = PathMatcher::new(&settings);

        assert!(matcher.is_target_folder("notes/x.md"));
        assert!(matcher.is_target_folder("notes-archive/x.md"));
    }

    #[test]
    fn test_trailing_separator_in_folder_entry() {
        let settings = settings(&["notes/", "/"], &[], FolderMatch::SeparatorSafe);
        let matcher = PathMatcher::new(&settings);

        assert!(matcher.is_target_folder("notes/x.md"));
        assert!(!matcher.is_target_folder("notes-archive/x.md"));
        assert!(!matcher.is_target_folder("x.md"));
    }

    #[test]
    fn test_exact_file_match() {
        let settings = settings(&[], &["inbox/todo.md"], FolderMatch::SeparatorSafe);
        let matcher = PathMatcher::new(&settings);

        assert!(matcher.is_target_file("inbox/todo.md"));
        assert!(!matcher.is_target_file("inbox/todo.md.bak"));
        assert!(!matcher.is_target_file("inbox"));
        assert!(matcher.is_target("inbox/todo.md"));
    }

    #[test]
    fn test_folder_entry_in_file_list_matches_nothing_below_it() {
        let settings = settings(&[], &["inbox/", "inbox"], FolderMatch::SeparatorSafe);
        let matcher = PathMatcher::new(&settings);

        assert!(!matcher.is_target("inbox/todo.md"));
    }
}
