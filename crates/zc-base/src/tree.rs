//! The analyzed project tree.
//!
//! A tree is the ordered list of top-level entries returned by one analysis.
//! It is built once at the provider boundary (see [`crate::schema`]) and never
//! mutated afterwards; view state such as expand/collapse lives in the UI.

use std::fmt;

/// Keep/delete verdict attached to every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Keep,
    Delete,
}

impl Decision {
    /// Wire value (`"keep"` / `"delete"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "keep",
            Decision::Delete => "delete",
        }
    }

    /// Uppercase label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Keep => "KEEP",
            Decision::Delete => "DELETE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "keep" => Some(Decision::Keep),
            "delete" => Some(Decision::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File or folder. Only folders carry children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder { children: Vec<FileEntry> },
}

/// One node of the analyzed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path segment, never a full path
    pub name: String,
    pub decision: Decision,
    /// Why the model kept or dropped this entry
    pub rationale: String,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, decision: Decision, rationale: impl Into<String>) -> Self {
        Self { name: name.into(), decision, rationale: rationale.into(), kind: EntryKind::File }
    }

    pub fn folder(
        name: impl Into<String>,
        decision: Decision,
        rationale: impl Into<String>,
        children: Vec<FileEntry>,
    ) -> Self {
        Self { name: name.into(), decision, rationale: rationale.into(), kind: EntryKind::Folder { children } }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { .. })
    }

    /// Children in display order (always empty for files)
    pub fn children(&self) -> &[FileEntry] {
        match &self.kind {
            EntryKind::File => &[],
            EntryKind::Folder { children } => children,
        }
    }
}

/// Visit every entry depth-first, pre-order, in stored child order.
/// The callback receives the entry and its depth (top level = 0).
pub fn walk<'a, F>(entries: &'a [FileEntry], visit: &mut F)
where
    F: FnMut(&'a FileEntry, usize),
{
    walk_at(entries, 0, visit);
}

fn walk_at<'a, F>(entries: &'a [FileEntry], depth: usize, visit: &mut F)
where
    F: FnMut(&'a FileEntry, usize),
{
    for entry in entries {
        visit(entry, depth);
        walk_at(entry.children(), depth + 1, visit);
    }
}

/// Per-decision and per-kind node counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub keep: usize,
    pub delete: usize,
    pub files: usize,
    pub folders: usize,
}

impl TreeStats {
    /// Every node counted once (`keep + delete`)
    pub fn total(&self) -> usize {
        self.keep + self.delete
    }
}

/// Count nodes by decision across all depths.
///
/// Folders count like any other node: a deleted folder is one delete,
/// independent of what its children decided.
pub fn count_stats(entries: &[FileEntry]) -> TreeStats {
    let mut stats = TreeStats::default();
    walk(entries, &mut |entry, _| {
        match entry.decision {
            Decision::Keep => stats.keep += 1,
            Decision::Delete => stats.delete += 1,
        }
        if entry.is_folder() {
            stats.folders += 1;
        } else {
            stats.files += 1;
        }
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FileEntry> {
        vec![
            FileEntry::file("a.ts", Decision::Keep, "entry point"),
            FileEntry::folder(
                "src",
                Decision::Delete,
                "stale copy",
                vec![FileEntry::file("b.ts", Decision::Keep, "still imported")],
            ),
        ]
    }

    #[test]
    fn test_counts_folders_and_descendants() {
        let stats = count_stats(&sample());
        assert_eq!(stats.keep, 2);
        assert_eq!(stats.delete, 1);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.folders, 1);
    }

    #[test]
    fn test_total_matches_node_count_at_depth() {
        let deep = vec![FileEntry::folder(
            "a",
            Decision::Keep,
            "r",
            vec![FileEntry::folder(
                "b",
                Decision::Delete,
                "r",
                vec![FileEntry::folder("c", Decision::Delete, "r", vec![FileEntry::file("d", Decision::Keep, "r")])],
            )],
        )];
        let mut nodes = 0;
        walk(&deep, &mut |_, _| nodes += 1);
        let stats = count_stats(&deep);
        assert_eq!(stats.total(), nodes);
        assert_eq!(stats.keep, 2);
        assert_eq!(stats.delete, 2);
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(count_stats(&[]), TreeStats::default());
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let mut seen = Vec::new();
        walk(&sample(), &mut |e, d| seen.push((e.name.clone(), d)));
        assert_eq!(seen, vec![("a.ts".to_string(), 0), ("src".to_string(), 0), ("b.ts".to_string(), 1)]);
    }

    #[test]
    fn test_file_has_no_children() {
        let f = FileEntry::file("x", Decision::Keep, "r");
        assert!(f.children().is_empty());
        assert!(!f.is_folder());
    }

    #[test]
    fn test_decision_wire_values() {
        assert_eq!(Decision::parse("keep"), Some(Decision::Keep));
        assert_eq!(Decision::parse("delete"), Some(Decision::Delete));
        assert_eq!(Decision::parse("KEEP"), None);
        assert_eq!(Decision::Delete.label(), "DELETE");
        assert_eq!(Decision::Keep.to_string(), "keep");
    }
}
