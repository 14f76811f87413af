//! Applies the configured targets to every open markdown view

use super::matcher::PathMatcher;
use super::settings::ForceReadSettings;
use crate::plugin::api::{ViewMode, Workspace};

/// What a single reconcile pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub forced_preview: usize,
    pub forced_source: usize,
    /// Markdown views with a file that were left as they were
    pub untouched: usize,
    /// Non-markdown views and views without a file
    pub skipped: usize,
}

/// Mode a view showing `path` should be put in, if any
pub fn desired_mode(matcher: &PathMatcher<'_>, restore_source_mode: bool, path: &str) -> Option<ViewMode> {
    if matcher.is_target(path) {
        Some(ViewMode::Preview)
    } else if restore_source_mode {
        Some(ViewMode::Source)
    } else {
        None
    }
}

/// Put every open markdown view in the mode its path calls for.
///
/// Views already in the desired mode still get their state written.
pub fn reconcile(workspace: &mut dyn Workspace, settings: &ForceReadSettings) -> ReconcileReport {
    let matcher = PathMatcher::new(settings);
    let mut report = ReconcileReport::default();

    workspace.for_each_view(&mut |view| {
        tracing::trace!("Reconciling {} view", view.view_type());
        let Some(markdown) = view.as_markdown_mut() else {
            report.skipped += 1;
            return;
        };
        let Some(path) = markdown.file_path().map(str::to_owned) else {
            report.skipped += 1;
            return;
        };

        match desired_mode(&matcher, settings.restore_source_mode, &path) {
            Some(mode) => {
                tracing::debug!("Setting {} to {:?} mode", path, mode);
                markdown.set_mode(mode);
                match mode {
                    ViewMode::Preview => report.forced_preview += 1,
                    ViewMode::Source => report.forced_source += 1,
                }
            }
            None => report.untouched += 1,
        }
    });

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::force_read::matcher::FolderMatch;
    use crate::plugin::testing::{FakeView, FakeWorkspace};

    fn settings(folders: &[&str], files: &[&str], restore: bool) -> ForceReadSettings {
        ForceReadSettings {
            target_folder_paths: folders.iter().map(|s| s.to_string()).collect(),
            target_file_paths: files.iter().map(|s| s.to_string()).collect(),
            restore_source_mode: restore,
            folder_match: FolderMatch::SeparatorSafe,
        }
    }

    #[test]
    fn test_folder_target_forced_to_preview() {
        let mut workspace = FakeWorkspace::new(vec![
            FakeView::markdown("Archive/2021/old.md", ViewMode::Source),
            FakeView::markdown("Daily/today.md", ViewMode::Source),
        ]);

        let report = reconcile(&mut workspace, &settings(&["Archive"], &[], false));

        assert_eq!(workspace.modes(), vec![Some(ViewMode::Preview), Some(ViewMode::Source)]);
        assert_eq!(report.forced_preview, 1);
        assert_eq!(report.untouched, 1);
        // Untouched views get no state write
        assert_eq!(workspace.views[1].writes(), 0);
    }

    #[test]
    fn test_file_target_forced_regardless_of_folders() {
        let mut workspace = FakeWorkspace::new(vec![
            FakeView::markdown("README.md", ViewMode::Source),
            FakeView::markdown("Projects/plan.md", ViewMode::Source),
        ]);

        reconcile(&mut workspace, &settings(&["Archive"], &["README.md"], false));

        assert_eq!(workspace.modes(), vec![Some(ViewMode::Preview), Some(ViewMode::Source)]);
    }

    #[test]
    fn test_restore_source_mode_reverts_others() {
        let mut workspace = FakeWorkspace::new(vec![
            FakeView::markdown("Archive/a.md", ViewMode::Source),
            FakeView::markdown("Daily/b.md", ViewMode::Preview),
        ]);

        let report = reconcile(&mut workspace, &settings(&["Archive"], &[], true));

        assert_eq!(workspace.modes(), vec![Some(ViewMode::Preview), Some(ViewMode::Source)]);
        assert_eq!(report.forced_source, 1);
        assert_eq!(report.untouched, 0);
    }

    #[test]
    fn test_non_matching_left_alone_without_restore() {
        let mut workspace = FakeWorkspace::new(vec![FakeView::markdown("Daily/b.md", ViewMode::Preview)]);

        reconcile(&mut workspace, &settings(&["Archive"], &[], false));

        assert_eq!(workspace.modes(), vec![Some(ViewMode::Preview)]);
        assert_eq!(workspace.total_writes(), 0);
    }

    #[test]
    fn test_other_state_preserved() {
        let mut workspace = FakeWorkspace::new(vec![FakeView::markdown("Archive/a.md", ViewMode::Source)]);

        reconcile(&mut workspace, &settings(&["Archive"], &[], false));

        let state = workspace.views[0].snapshot().unwrap();
        assert_eq!(state.mode, ViewMode::Preview);
        assert_eq!(state.scroll_offset, 33.0);
        assert_eq!(state.cursor, Some(7));
    }

    #[test]
    fn test_skips_non_markdown_and_unsaved_views() {
        let mut workspace = FakeWorkspace::new(vec![
            FakeView::Other,
            FakeView::unsaved(ViewMode::Source),
        ]);

        let report = reconcile(&mut workspace, &settings(&[""], &[], true));

        assert_eq!(report.skipped, 2);
        assert_eq!(workspace.total_writes(), 0);
        assert_eq!(workspace.modes(), vec![None, Some(ViewMode::Source)]);
    }

    #[test]
    fn test_repeated_pass_writes_again() {
        let mut workspace = FakeWorkspace::new(vec![FakeView::markdown("Archive/a.md", ViewMode::Source)]);
        let settings = settings(&["Archive"], &[], false);

        let first = reconcile(&mut workspace, &settings);
        let second = reconcile(&mut workspace, &settings);

        assert_eq!(first, second);
        assert_eq!(workspace.modes(), vec![Some(ViewMode::Preview)]);
        assert_eq!(workspace.views[0].writes(), 2);
    }

    #[test]
    fn test_shared_prefix_sibling_not_forced() {
        let mut workspace = FakeWorkspace::new(vec![
            FakeView::markdown("notes-archive/x.md", ViewMode::Source),
            FakeView::markdown("notes/x.md", ViewMode::Source),
        ]);

        reconcile(&mut workspace, &settings(&["notes"], &[], false));

        assert_eq!(workspace.modes(), vec![Some(ViewMode::Source), Some(ViewMode::Preview)]);
    }
}
