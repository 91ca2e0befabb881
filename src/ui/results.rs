use std::sync::LazyLock;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use zc_base::tree::{Decision, FileEntry, count_stats};

use super::helpers::truncate_string;
use super::theme;
use crate::constants::TREE_INDENT;
use crate::state::{TreeRow, ViewState};

static REACT_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(jsx|tsx)$").expect("valid pattern"));
static JSON_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.json$").expect("valid pattern"));
static GIT_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.git.*$").expect("valid pattern"));

/// Glyph shown before an entry name
pub fn entry_icon(entry: &FileEntry) -> &'static str {
    if entry.is_folder() {
        "▣"
    } else if REACT_FILE.is_match(&entry.name) {
        "⚛"
    } else if JSON_FILE.is_match(&entry.name) {
        "{}"
    } else if GIT_FILE.is_match(&entry.name) {
        "±"
    } else {
        "·"
    }
}

pub fn render_results(frame: &mut Frame, file_name: &str, entries: &[FileEntry], view: &mut ViewState, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    render_summary(frame, file_name, entries, layout[0]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::BG_SURFACE));
    let tree_area = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let rows = view.tree.rows(entries);
    let height = tree_area.height as usize;
    view.tree_height = height;
    view.tree.clamp(rows.len(), height);

    let width = tree_area.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(view.tree.scroll)
        .take(height)
        .map(|(i, row)| render_row(row, i == view.tree.selected, width))
        .collect();

    frame.render_widget(Paragraph::new(lines), tree_area);
}

fn render_summary(frame: &mut Frame, file_name: &str, entries: &[FileEntry], area: Rect) {
    let stats = count_stats(entries);
    let counts = format!("Keep: {}   Delete: {}   Total: {} ", stats.keep, stats.delete, stats.total());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(counts.width() as u16)])
        .split(area);
    let name_width = (columns[0].width as usize).saturating_sub(16);

    let line = Line::from(vec![
        Span::styled(" Analysis for: ", Style::default().fg(theme::TEXT)),
        Span::styled(truncate_string(file_name, name_width), Style::default().fg(theme::ACCENT).bold()),
    ]);
    let counts_line = Line::from(vec![
        Span::styled(format!("Keep: {}", stats.keep), Style::default().fg(theme::KEEP).bold()),
        Span::raw("   "),
        Span::styled(format!("Delete: {}", stats.delete), Style::default().fg(theme::DELETE).bold()),
        Span::raw("   "),
        Span::styled(format!("Total: {} ", stats.total()), Style::default().fg(theme::TEXT_SECONDARY)),
    ]);

    frame.render_widget(Paragraph::new(line), columns[0]);
    frame.render_widget(Paragraph::new(counts_line), columns[1]);
}

fn render_row<'a>(row: &TreeRow<'a>, selected: bool, width: usize) -> Line<'a> {
    let entry = row.entry;
    let row_bg = if selected { theme::BG_SELECTED } else { theme::BG_SURFACE };
    let base = Style::default().bg(row_bg);

    let arrow = if row.can_toggle() {
        if row.expanded { "▾ " } else { "▸ " }
    } else {
        "  "
    };
    let indent = " ".repeat(1 + row.depth * TREE_INDENT);
    let icon = entry_icon(entry);

    let name_style = match entry.decision {
        Decision::Keep => base.fg(theme::TEXT),
        Decision::Delete => base.fg(theme::DELETE).add_modifier(Modifier::CROSSED_OUT),
    };
    let reason_color = match entry.decision {
        Decision::Keep => theme::KEEP,
        Decision::Delete => theme::DELETE,
    };

    let prefix_width = indent.width() + arrow.width() + icon.width() + 1;
    let name_width = entry.name.width();
    let reason_room = width.saturating_sub(prefix_width + name_width + 3);

    let mut spans = vec![
        Span::styled(indent, base),
        Span::styled(arrow, base.fg(theme::TEXT_MUTED)),
        Span::styled(format!("{} ", icon), base.fg(theme::TEXT_SECONDARY)),
        Span::styled(entry.name.as_str(), name_style),
    ];
    if reason_room > 3 {
        spans.push(Span::styled("   ", base));
        spans.push(Span::styled(
            truncate_string(&entry.rationale, reason_room),
            base.fg(reason_color).add_modifier(Modifier::ITALIC | Modifier::DIM),
        ));
    }

    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    if selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        let icon = |name: &str| entry_icon(&FileEntry::file(name, Decision::Keep, ""));
        assert_eq!(icon("App.tsx"), "⚛");
        assert_eq!(icon("Button.jsx"), "⚛");
        assert_eq!(icon("package.json"), "{}");
        assert_eq!(icon(".gitignore"), "±");
        assert_eq!(icon("main.rs"), "·");
        assert_eq!(entry_icon(&FileEntry::folder("src.json", Decision::Keep, "", vec![])), "▣");
    }

    #[test]
    fn test_deleted_row_is_crossed_out() {
        let entry = FileEntry::file("debug.log", Decision::Delete, "Log output.");
        let row = TreeRow { key: vec![0], depth: 0, entry: &entry, expanded: false };
        let line = render_row(&row, false, 60);
        let name = line.spans.iter().find(|s| s.content == "debug.log").unwrap();
        assert!(name.style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert!(line.spans.iter().any(|s| s.content.contains("Log output.")));
    }

    #[test]
    fn test_narrow_row_drops_reason() {
        let entry = FileEntry::file("a-very-long-file-name.txt", Decision::Keep, "Reason.");
        let row = TreeRow { key: vec![0], depth: 2, entry: &entry, expanded: false };
        let line = render_row(&row, false, 30);
        assert!(!line.spans.iter().any(|s| s.content.contains("Reason")));
    }
}
