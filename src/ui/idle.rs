use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::helpers::{centered_rect, truncate_string};
use super::theme;
use crate::constants::CARD_WIDTH;
use crate::state::ViewState;

const UPLOAD_CARD_HEIGHT: u16 = 7;

const STEPS: &[(&str, &str)] = &[
    ("Input", "Type the name of a project ZIP. Only the name is used; the archive is never opened."),
    ("Analysis", "The model imagines a plausible project for that name and marks each entry keep or delete."),
    ("Review", "Browse the tree. Deleted entries are struck through, every entry carries its reason."),
    ("Output", "Press e to save the decisions as a plain text report."),
];

pub fn render_idle(frame: &mut Frame, view: &ViewState, area: Rect) {
    let height = UPLOAD_CARD_HEIGHT + 2 + STEPS.len() as u16 * 3;
    let column = centered_rect(CARD_WIDTH, height, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(UPLOAD_CARD_HEIGHT), Constraint::Length(1), Constraint::Min(0)])
        .split(column);

    render_upload_card(frame, view, layout[0]);
    render_steps(frame, layout[2]);
}

fn render_upload_card(frame: &mut Frame, view: &ViewState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUS))
        .style(Style::default().bg(theme::BG_SURFACE))
        .title(Span::styled(" Upload ", Style::default().fg(theme::ACCENT).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_width = inner.width.saturating_sub(4) as usize;
    let shown = if view.input.is_empty() {
        Span::styled("my-project.zip", Style::default().fg(theme::TEXT_MUTED).italic())
    } else {
        Span::styled(truncate_string(&view.input, field_width), Style::default().fg(theme::TEXT))
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(" > ", Style::default().fg(theme::ACCENT)), shown]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ZIP file only", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled("  ·  ", Style::default().fg(theme::BORDER)),
            Span::styled("Enter", Style::default().fg(theme::ACCENT)),
            Span::styled(" to analyze", Style::default().fg(theme::TEXT_MUTED)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor sits after the prompt, clamped to the visible field
    let before_cursor = view.input.get(..view.input_cursor).unwrap_or(&view.input);
    let offset = before_cursor.width().min(field_width) as u16;
    if inner.height > 1 && inner.width > 3 {
        let x = (inner.x + 3 + offset).min(inner.x + inner.width - 1);
        frame.set_cursor_position((x, inner.y + 1));
    }
}

fn render_steps(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled("How it works", Style::default().fg(theme::TEXT).bold()))];
    for (i, (title, body)) in STEPS.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(theme::BG_BASE).bg(theme::ACCENT_DIM).bold()),
            Span::styled(format!(" {}", title), Style::default().fg(theme::TEXT).bold()),
        ]));
        lines.push(Line::from(Span::styled(format!("    {}", body), Style::default().fg(theme::TEXT_SECONDARY))));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
