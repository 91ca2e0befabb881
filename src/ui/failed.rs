use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::helpers::{centered_rect, wrap_text};
use super::theme;
use crate::constants::CARD_WIDTH;

pub fn render_failed(frame: &mut Frame, message: &str, area: Rect) {
    let text_width = CARD_WIDTH.saturating_sub(6) as usize;
    let wrapped = wrap_text(message, text_width);
    let height = wrapped.len() as u16 + 8;
    let card = centered_rect(CARD_WIDTH, height, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ERROR))
        .style(Style::default().bg(theme::BG_SURFACE));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Analysis Failed", Style::default().fg(theme::ERROR).bold())),
        Line::from(""),
    ];
    lines.extend(wrapped.into_iter().map(|l| Line::from(Span::styled(l, Style::default().fg(theme::TEXT_SECONDARY)))));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme::ACCENT).bold()),
        Span::styled(" try again", Style::default().fg(theme::TEXT_MUTED)),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(block), card);
}
