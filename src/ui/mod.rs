mod failed;
pub mod helpers;
mod idle;
mod loader;
mod results;
mod status;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use zc_base::session::{Session, SessionState};

use crate::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use crate::state::ViewState;

pub fn render(frame: &mut Frame, session: &Session, view: &mut ViewState, provider_label: &str) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),     // Title
            Constraint::Min(1),                    // Body
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);

    render_header(frame, main_layout[0]);

    match session.state() {
        SessionState::Idle => idle::render_idle(frame, view, main_layout[1]),
        SessionState::Analyzing(analyzing) => {
            loader::render_loader(frame, &analyzing.file_name, analyzing.progress, main_layout[1])
        }
        SessionState::Results { file_name, entries } => {
            results::render_results(frame, file_name, entries, view, main_layout[1])
        }
        SessionState::Failed { message, .. } => failed::render_failed(frame, message, main_layout[1]),
    }

    status::render_status_bar(frame, session.phase(), view, provider_label, main_layout[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("AI Project Cleaner", Style::default().fg(theme::ACCENT).bold())),
        Line::from(Span::styled(
            "Keep-or-delete suggestions for a project ZIP, from its name alone.",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
