//! Fake host views for plugin tests

use super::api::{MarkdownView, ViewMode, ViewState, Workspace, WorkspaceView};

pub enum FakeView {
    Markdown {
        path: Option<String>,
        state: ViewState,
        writes: usize,
    },
    Other,
}

impl FakeView {
    pub fn markdown(path: &str, mode: ViewMode) -> Self {
        FakeView::Markdown {
            path: Some(path.to_string()),
            state: ViewState {
                mode,
                scroll_offset: 33.0,
                cursor: Some(7),
            },
            writes: 0,
        }
    }

    pub fn unsaved(mode: ViewMode) -> Self {
        FakeView::Markdown {
            path: None,
            state: ViewState {
                mode,
                ..Default::default()
            },
            writes: 0,
        }
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        match self {
            FakeView::Markdown { state, .. } => Some(state.mode),
            FakeView::Other => None,
        }
    }

    pub fn snapshot(&self) -> Option<ViewState> {
        match self {
            FakeView::Markdown { state, .. } => Some(*state),
            FakeView::Other => None,
        }
    }

    pub fn writes(&self) -> usize {
        match self {
            FakeView::Markdown { writes, .. } => *writes,
            FakeView::Other => 0,
        }
    }
}

impl MarkdownView for FakeView {
    fn file_path(&self) -> Option<&str> {
        match self {
            FakeView::Markdown { path, .. } => path.as_deref(),
            FakeView::Other => None,
        }
    }

    fn state(&self) -> ViewState {
        self.snapshot().unwrap_or_default()
    }

    fn set_state(&mut self, new_state: ViewState) {
        if let FakeView::Markdown { state, writes, .. } = self {
            *state = new_state;
            *writes += 1;
        }
    }
}

impl WorkspaceView for FakeView {
    fn view_type(&self) -> &str {
        match self {
            FakeView::Markdown { .. } => "markdown",
            FakeView::Other => "image",
        }
    }

    fn as_markdown_mut(&mut self) -> Option<&mut dyn MarkdownView> {
        if matches!(self, FakeView::Markdown { .. }) {
            Some(self)
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct FakeWorkspace {
    pub views: Vec<FakeView>,
}

impl FakeWorkspace {
    pub fn new(views: Vec<FakeView>) -> Self {
        Self { views }
    }

    pub fn modes(&self) -> Vec<Option<ViewMode>> {
        self.views.iter().map(FakeView::view_mode).collect()
    }

    pub fn total_writes(&self) -> usize {
        self.views.iter().map(FakeView::writes).sum()
    }
}

impl Workspace for FakeWorkspace {
    fn for_each_view(&mut self, f: &mut dyn FnMut(&mut dyn WorkspaceView)) {
        for view in &mut self.views {
            f(view);
        }
    }
}
