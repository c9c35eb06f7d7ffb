//! Keybinding definitions for the TUI.
//!
//! The question pane owns the keyboard while focused: printable keys go to
//! the text area and only the chords below are interpreted.

use crate::nav::Pane;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPane,
    PrevPane,
    MoveUp,
    MoveDown,
    Confirm,
    /// Generate SQL for the question, then execute it.
    Ask,
    /// Execute the SQL currently shown.
    Execute,
    Refresh,
    FocusQuestion,
    LeaveQuestion,
    Edit(KeyEvent),
}

pub fn map_key(event: KeyEvent, focus: Pane) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('g') => Some(Action::Ask),
            KeyCode::Char('e') => Some(Action::Execute),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ if focus == Pane::Question => Some(Action::Edit(event)),
            _ => None,
        };
    }

    match code {
        KeyCode::Tab => return Some(Action::NextPane),
        KeyCode::BackTab => return Some(Action::PrevPane),
        _ => {}
    }

    if focus == Pane::Question {
        return match code {
            KeyCode::Esc => Some(Action::LeaveQuestion),
            KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => Some(Action::Edit(event)),
            KeyCode::Enter => Some(Action::Ask),
            _ => Some(Action::Edit(event)),
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('i') | KeyCode::Char('/') => Some(Action::FocusQuestion),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        _ => None,
    }
}
