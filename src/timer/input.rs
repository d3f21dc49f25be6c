use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::countdown::{Control, Phase};

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn lowercase(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Maps a key press to a countdown control for the given phase.
pub fn countdown_control(key: &KeyEvent, phase: Phase) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_interrupt(key) {
        return Some(Control::Quit);
    }

    match (phase, lowercase(key)?) {
        (Phase::Running, 'p' | ' ') => Some(Control::Pause),
        (Phase::Paused, 'r' | 'p' | ' ') => Some(Control::Resume),
        (Phase::Paused, 's') => Some(Control::Skip),
        (Phase::Paused, 'a') => Some(Control::Restart),
        (Phase::Paused, 'q') => Some(Control::Quit),
        _ => None,
    }
}

/// `Some(true)` to start another run, `Some(false)` to leave.
pub fn restart_answer(key: &KeyEvent) -> Option<bool> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_interrupt(key) || key.code == KeyCode::Esc {
        return Some(false);
    }

    match lowercase(key)? {
        'y' => Some(true),
        'n' | 'q' => Some(false),
        _ => None,
    }
}
