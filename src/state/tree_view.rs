use std::collections::HashSet;

use zc_base::tree::FileEntry;

/// One visible line of the results tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    /// Child indices from the root down to this entry
    pub key: Vec<usize>,
    pub depth: usize,
    pub entry: &'a FileEntry,
    /// Folder with children that is currently open
    pub expanded: bool,
}

impl TreeRow<'_> {
    pub fn can_toggle(&self) -> bool {
        !self.entry.children().is_empty()
    }
}

/// Expansion and selection over a results tree.
///
/// Folders start expanded. Collapsed folders are tracked by their index path,
/// which stays valid because the tree is immutable once shown.
#[derive(Debug, Default)]
pub struct TreeView {
    collapsed: HashSet<Vec<usize>>,
    pub selected: usize,
    pub scroll: usize,
}

impl TreeView {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_collapsed(&self, key: &[usize]) -> bool {
        self.collapsed.contains(key)
    }

    /// Flatten the tree into the rows currently visible, in pre-order.
    pub fn rows<'a>(&self, entries: &'a [FileEntry]) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        let mut key = Vec::new();
        self.push_rows(entries, 0, &mut key, &mut rows);
        rows
    }

    fn push_rows<'a>(&self, entries: &'a [FileEntry], depth: usize, key: &mut Vec<usize>, rows: &mut Vec<TreeRow<'a>>) {
        for (i, entry) in entries.iter().enumerate() {
            key.push(i);
            let has_children = !entry.children().is_empty();
            let expanded = has_children && !self.is_collapsed(key);
            rows.push(TreeRow { key: key.clone(), depth, entry, expanded });
            if expanded {
                self.push_rows(entry.children(), depth + 1, key, rows);
            }
            key.pop();
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, row_count: usize) {
        if self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, amount: usize) {
        self.selected = self.selected.saturating_sub(amount);
    }

    pub fn page_down(&mut self, amount: usize, row_count: usize) {
        self.selected = (self.selected + amount).min(row_count.saturating_sub(1));
    }

    /// Open or close the selected folder.
    pub fn toggle(&mut self, entries: &[FileEntry]) {
        let rows = self.rows(entries);
        if let Some(row) = rows.get(self.selected).filter(|r| r.can_toggle()) {
            let key = row.key.clone();
            if !self.collapsed.remove(&key) {
                self.collapsed.insert(key);
            }
        }
    }

    pub fn expand(&mut self, entries: &[FileEntry]) {
        let rows = self.rows(entries);
        if let Some(row) = rows.get(self.selected) {
            self.collapsed.remove(&row.key);
        }
    }

    /// Close the selected folder, or jump to the parent when it is already
    /// closed or not a folder.
    pub fn collapse(&mut self, entries: &[FileEntry]) {
        let rows = self.rows(entries);
        let Some(row) = rows.get(self.selected) else {
            return;
        };
        if row.expanded {
            self.collapsed.insert(row.key.clone());
            return;
        }
        if row.key.len() > 1 {
            let parent = &row.key[..row.key.len() - 1];
            if let Some(pos) = rows.iter().position(|r| r.key == parent) {
                self.selected = pos;
            }
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self, entries: &[FileEntry]) {
        let mut key = Vec::new();
        collect_folder_keys(entries, &mut key, &mut self.collapsed);
        self.selected = 0;
        self.scroll = 0;
    }

    /// Keep the selection inside `row_count` and visible in `height` lines.
    pub fn clamp(&mut self, row_count: usize, height: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        self.scroll = self.scroll.min(row_count.saturating_sub(height));
    }
}

fn collect_folder_keys(entries: &[FileEntry], key: &mut Vec<usize>, out: &mut HashSet<Vec<usize>>) {
    for (i, entry) in entries.iter().enumerate() {
        if entry.children().is_empty() {
            continue;
        }
        key.push(i);
        out.insert(key.clone());
        collect_folder_keys(entry.children(), key, out);
        key.pop();
    }
}
