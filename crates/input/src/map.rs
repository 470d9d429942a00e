//! Key mapping from terminal events to game actions.
//!
//! | Key | Action |
//! |-----|--------|
//! | Left / Right | move |
//! | Down | soft drop one row |
//! | Up, Space | rotate clockwise |
//! | `c` | swap with preview |
//! | `d` | hard drop |
//! | `p` | pause |
//! | `r` | restart |
//! | Esc, `q`, Ctrl-C | quit |

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Key releases and Ctrl-modified keys never map to an action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char(' ') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Swap),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
