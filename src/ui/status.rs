use ratatui::{prelude::*, widgets::Paragraph};
use unicode_width::UnicodeWidthStr;

use zc_base::session::Phase;

use super::helpers::truncate_string;
use super::theme;
use crate::state::{NoticeKind, ViewState};

fn key_hints(phase: Phase) -> &'static [(&'static str, &'static str)] {
    match phase {
        Phase::Idle => &[("Enter", "analyze"), ("Esc", "quit")],
        Phase::Analyzing => &[("Ctrl+Q", "quit")],
        Phase::Results => &[("↑↓", "move"), ("Enter", "fold"), ("+/-", "all"), ("e", "export"), ("r", "new"), ("q", "quit")],
        Phase::Failed => &[("Enter", "try again"), ("q", "quit")],
    }
}

pub fn render_status_bar(frame: &mut Frame, phase: Phase, view: &ViewState, provider_label: &str, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let badge_bg = match phase {
        Phase::Idle => theme::TEXT_MUTED,
        Phase::Analyzing => theme::WARNING,
        Phase::Results => theme::SUCCESS,
        Phase::Failed => theme::ERROR,
    };
    let badge = format!(" {} ", phase_label(phase));
    let provider = format!(" {} ", provider_label);

    let mut spans = vec![
        Span::styled(" ", base_style),
        Span::styled(badge.clone(), Style::default().fg(theme::BG_BASE).bg(badge_bg).bold()),
        Span::styled(" ", base_style),
    ];

    let room = (area.width as usize).saturating_sub(badge.width() + provider.width() + 3);
    match &view.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => theme::SUCCESS,
                NoticeKind::Error => theme::ERROR,
            };
            spans.push(Span::styled(truncate_string(&notice.text, room), base_style.fg(color)));
        }
        None => {
            let mut used = 0;
            for (key, label) in key_hints(phase) {
                let width = key.width() + label.width() + 3;
                if used + width > room {
                    break;
                }
                used += width;
                spans.push(Span::styled(*key, base_style.fg(theme::ACCENT)));
                spans.push(Span::styled(format!(" {}  ", label), base_style));
            }
        }
    }

    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + provider.width());
    spans.push(Span::styled(" ".repeat(pad), base_style));
    spans.push(Span::styled(provider, Style::default().fg(theme::TEXT).bg(theme::BG_SURFACE)));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), area);
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "IDLE",
        Phase::Analyzing => "ANALYZING",
        Phase::Results => "RESULTS",
        Phase::Failed => "FAILED",
    }
}
