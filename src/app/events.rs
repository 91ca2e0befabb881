use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use zc_base::session::Phase;

use crate::app::actions::Action;

/// Map a terminal event to an action for the current phase.
/// `None` means quit.
pub fn handle_event(event: &Event, phase: Phase) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return Some(Action::None);
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') => return None,
                    // Nothing to reset on the upload screen
                    KeyCode::Char('r') if phase == Phase::Idle => return Some(Action::None),
                    KeyCode::Char('r') => return Some(Action::Reset),
                    _ => return Some(Action::None),
                }
            }

            match phase {
                Phase::Idle => handle_idle_key(key),
                Phase::Analyzing => handle_analyzing_key(key),
                Phase::Results => handle_results_key(key),
                Phase::Failed => handle_failed_key(key),
            }
        }
        Event::Paste(text) if phase == Phase::Idle => Some(Action::InsertText(text.clone())),
        _ => Some(Action::None),
    }
}

fn handle_idle_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc => return None,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Delete => Action::InputDelete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        _ => Action::None,
    };
    Some(action)
}

/// Analysis cannot be cancelled; reset and resubmit are offered so the
/// refusal is visible in the status bar.
fn handle_analyzing_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return None,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Enter => Action::Submit,
        _ => Action::None,
    };
    Some(action)
}

fn handle_results_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return None,
        KeyCode::Up | KeyCode::Char('k') => Action::TreeUp,
        KeyCode::Down | KeyCode::Char('j') => Action::TreeDown,
        KeyCode::PageUp => Action::TreePageUp,
        KeyCode::PageDown => Action::TreePageDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::TreeToggle,
        KeyCode::Right | KeyCode::Char('l') => Action::TreeExpand,
        KeyCode::Left | KeyCode::Char('h') => Action::TreeCollapse,
        KeyCode::Char('+') => Action::TreeExpandAll,
        KeyCode::Char('-') => Action::TreeCollapseAll,
        KeyCode::Char('e') | KeyCode::Char('s') => Action::ExportReport,
        KeyCode::Char('r') | KeyCode::Char('n') => Action::Reset,
        _ => Action::None,
    };
    Some(action)
}

fn handle_failed_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return None,
        KeyCode::Enter | KeyCode::Char('r') => Action::Reset,
        _ => Action::None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_ctrl_q_quits_everywhere() {
        for phase in [Phase::Idle, Phase::Analyzing, Phase::Results, Phase::Failed] {
            assert_eq!(handle_event(&ctrl('q'), phase), None);
        }
    }

    #[test]
    fn test_ctrl_r_resets_outside_idle() {
        assert_eq!(handle_event(&ctrl('r'), Phase::Idle), Some(Action::None));
        for phase in [Phase::Analyzing, Phase::Results, Phase::Failed] {
            assert_eq!(handle_event(&ctrl('r'), phase), Some(Action::Reset));
        }
    }

    #[test]
    fn test_idle_letters_are_input() {
        assert_eq!(handle_event(&key(KeyCode::Char('q')), Phase::Idle), Some(Action::InputChar('q')));
        assert_eq!(handle_event(&key(KeyCode::Enter), Phase::Idle), Some(Action::Submit));
        assert_eq!(handle_event(&key(KeyCode::Esc), Phase::Idle), None);
    }

    #[test]
    fn test_results_keys() {
        assert_eq!(handle_event(&key(KeyCode::Char('e')), Phase::Results), Some(Action::ExportReport));
        assert_eq!(handle_event(&key(KeyCode::Char('r')), Phase::Results), Some(Action::Reset));
        assert_eq!(handle_event(&key(KeyCode::Enter), Phase::Results), Some(Action::TreeToggle));
        assert_eq!(handle_event(&key(KeyCode::Char('q')), Phase::Results), None);
    }

    #[test]
    fn test_failed_enter_resets() {
        assert_eq!(handle_event(&key(KeyCode::Enter), Phase::Failed), Some(Action::Reset));
    }

    #[test]
    fn test_analyzing_ignores_typing() {
        assert_eq!(handle_event(&key(KeyCode::Char('x')), Phase::Analyzing), Some(Action::None));
        assert_eq!(handle_event(&key(KeyCode::Char('r')), Phase::Analyzing), Some(Action::Reset));
    }

    #[test]
    fn test_paste_only_on_upload_screen() {
        let paste = Event::Paste("a.zip".into());
        assert_eq!(handle_event(&paste, Phase::Idle), Some(Action::InsertText("a.zip".into())));
        assert_eq!(handle_event(&paste, Phase::Results), Some(Action::None));
    }
}
