//! Key mapping from terminal events to session controls.

use blockfall_engine::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Action {
    /// Forwarded to the session; ignored there unless running.
    Command(Command),
    Start,
    TogglePause,
    Reset,
    Quit,
}

/// Maps a key press to an action.
///
/// Letter keys match in either case. Key releases, only reported by
/// terminals with the enhanced keyboard protocol, are ignored.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Left => Command::MoveLeft.into(),
        KeyCode::Right => Command::MoveRight.into(),
        KeyCode::Down => Command::SoftDrop.into(),
        KeyCode::Up | KeyCode::Char(' ') => Command::Rotate.into(),
        KeyCode::Enter => Action::Start,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => Command::MoveLeft.into(),
            'l' | 'd' => Command::MoveRight.into(),
            'j' | 's' => Command::SoftDrop.into(),
            'k' | 'w' => Command::Rotate.into(),
            'p' => Action::TogglePause,
            'r' => Action::Reset,
            'q' => Action::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}
