use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::helpers::{centered_rect, truncate_string};
use super::theme;
use crate::constants::CARD_WIDTH;

const LOADER_HEIGHT: u16 = 9;

pub fn render_loader(frame: &mut Frame, file_name: &str, progress: u8, area: Rect) {
    let card = centered_rect(CARD_WIDTH, LOADER_HEIGHT, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::BG_SURFACE));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // padding
            Constraint::Length(1), // title
            Constraint::Length(1), // file name
            Constraint::Length(1), // padding
            Constraint::Length(1), // gauge
            Constraint::Length(1), // percent
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled("Analyzing Project", Style::default().fg(theme::TEXT).bold()))
            .alignment(Alignment::Center),
        layout[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_string(file_name, inner.width.saturating_sub(4) as usize),
            Style::default().fg(theme::TEXT_MUTED),
        ))
        .alignment(Alignment::Center),
        layout[2],
    );

    let gauge_area = layout[4].inner(Margin { horizontal: 2, vertical: 0 });
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::BG_BASE))
            .percent(u16::from(progress.min(100)))
            .label(""),
        gauge_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{}%", progress), Style::default().fg(theme::ACCENT)))
            .alignment(Alignment::Center),
        layout[5],
    );
}
