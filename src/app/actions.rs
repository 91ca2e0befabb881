use zc_base::tree::FileEntry;

use crate::constants::TREE_PAGE_AMOUNT;
use crate::state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InputChar(char),
    InsertText(String),
    InputBackspace,
    InputDelete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Submit,
    Reset,
    ExportReport,
    TreeUp,
    TreeDown,
    TreePageUp,
    TreePageDown,
    TreeToggle,
    TreeExpand,
    TreeCollapse,
    TreeExpandAll,
    TreeCollapseAll,
    None,
}

/// What the app must do after a view-level action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    /// Start an analysis for this filename
    Submit(String),
    Reset,
    Export,
}

/// Apply an action to the view. Anything touching the session is handed
/// back to the caller as an `ActionResult`.
pub fn apply_action(view: &mut ViewState, entries: Option<&[FileEntry]>, action: Action) -> ActionResult {
    if action != Action::None {
        view.notice = None;
        view.dirty = true;
    }

    match action {
        Action::InputChar(c) => {
            view.input.insert(view.input_cursor, c);
            view.input_cursor += c.len_utf8();
            ActionResult::Nothing
        }
        Action::InsertText(text) => {
            // The filename is one line
            let text: String = text.chars().filter(|c| !c.is_control()).collect();
            view.input.insert_str(view.input_cursor, &text);
            view.input_cursor += text.len();
            ActionResult::Nothing
        }
        Action::InputBackspace => {
            if let Some(prev) = prev_boundary(&view.input, view.input_cursor) {
                view.input.remove(prev);
                view.input_cursor = prev;
            }
            ActionResult::Nothing
        }
        Action::InputDelete => {
            if view.input_cursor < view.input.len() {
                view.input.remove(view.input_cursor);
            }
            ActionResult::Nothing
        }
        Action::CursorLeft => {
            if let Some(prev) = prev_boundary(&view.input, view.input_cursor) {
                view.input_cursor = prev;
            }
            ActionResult::Nothing
        }
        Action::CursorRight => {
            if let Some(c) = view.input[view.input_cursor..].chars().next() {
                view.input_cursor += c.len_utf8();
            }
            ActionResult::Nothing
        }
        Action::CursorHome => {
            view.input_cursor = 0;
            ActionResult::Nothing
        }
        Action::CursorEnd => {
            view.input_cursor = view.input.len();
            ActionResult::Nothing
        }
        Action::Submit => ActionResult::Submit(view.input.trim().to_string()),
        Action::Reset => ActionResult::Reset,
        Action::ExportReport => ActionResult::Export,
        Action::None => ActionResult::Nothing,
        tree_action => {
            if let Some(entries) = entries {
                apply_tree_action(view, entries, tree_action);
            }
            ActionResult::Nothing
        }
    }
}

fn apply_tree_action(view: &mut ViewState, entries: &[FileEntry], action: Action) {
    let tree = &mut view.tree;
    let row_count = tree.rows(entries).len();
    let page = view.tree_height.max(TREE_PAGE_AMOUNT);
    match action {
        Action::TreeUp => tree.move_up(),
        Action::TreeDown => tree.move_down(row_count),
        Action::TreePageUp => tree.page_up(page),
        Action::TreePageDown => tree.page_down(page, row_count),
        Action::TreeToggle => tree.toggle(entries),
        Action::TreeExpand => tree.expand(entries),
        Action::TreeCollapse => tree.collapse(entries),
        Action::TreeExpandAll => tree.expand_all(),
        Action::TreeCollapseAll => tree.collapse_all(entries),
        _ => {}
    }
    let row_count = tree.rows(entries).len();
    tree.clamp(row_count, view.tree_height);
}

fn prev_boundary(s: &str, cursor: usize) -> Option<usize> {
    s[..cursor].char_indices().next_back().map(|(i, _)| i)
}
