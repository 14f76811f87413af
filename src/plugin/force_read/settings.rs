//! Settings for the force read mode plugin

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::matcher::FolderMatch;

/// Persisted plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceReadSettings {
    /// Folders whose documents always open in reading mode
    pub target_folder_paths: Vec<String>,
    /// Individual documents that always open in reading mode
    pub target_file_paths: Vec<String>,
    /// Switch every other markdown view back to source mode
    pub restore_source_mode: bool,
    pub folder_match: FolderMatch,
}

impl ForceReadSettings {
    pub fn to_value(&self) -> Value {
        // Plain strings, bools and unit enums always serialize
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Merge loaded data over `defaults`, key by key.
///
/// Missing keys, keys of the wrong type and non-object payloads leave the
/// corresponding default in place. Path list entries are trimmed like panel
/// input; non-string and blank entries are dropped.
pub fn merge_with_defaults(defaults: ForceReadSettings, loaded: Option<&Value>) -> ForceReadSettings {
    let Some(Value::Object(map)) = loaded else {
        if let Some(value) = loaded {
            tracing::warn!("Ignoring malformed force read settings: {}", value);
        }
        return defaults;
    };

    let mut settings = defaults;
    if let Some(paths) = path_list(map, "targetFolderPaths") {
        settings.target_folder_paths = paths;
    }
    if let Some(paths) = path_list(map, "targetFilePaths") {
        settings.target_file_paths = paths;
    }
    if let Some(restore) = map.get("restoreSourceMode").and_then(Value::as_bool) {
        settings.restore_source_mode = restore;
    }
    if let Some(policy) = map
        .get("folderMatch")
        .and_then(|v| serde_json::from_value::<FolderMatch>(v.clone()).ok())
    {
        settings.folder_match = policy;
    }
    settings
}

fn path_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = map.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Split panel text into a path list: one path per line, trimmed, blank
/// lines dropped, order kept
pub fn parse_path_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a path list back into panel text
pub fn format_path_list(paths: &[String]) -> String {
    paths.join("\n")
}
