//! UI-side state. The analysis lifecycle itself lives in `zc_base::session`;
//! this only holds what the screen needs on top of it.

pub mod tree_view;

pub use tree_view::{TreeRow, TreeView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown in the status bar until the next keypress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct ViewState {
    /// Filename being typed on the upload screen
    pub input: String,
    /// Byte offset into `input`
    pub input_cursor: usize,
    pub tree: TreeView,
    pub notice: Option<Notice>,
    /// Rows available to the tree on the last render
    pub tree_height: usize,
    pub dirty: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self { dirty: true, ..Self::default() }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { kind: NoticeKind::Info, text: text.into() });
        self.dirty = true;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { kind: NoticeKind::Error, text: text.into() });
        self.dirty = true;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }
}
