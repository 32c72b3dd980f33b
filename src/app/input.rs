//! Key mapping

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,

    // Selection
    Select,
    Back,
    Submit,

    // Quiz
    Option(usize),
    Next,
    Previous,
    ClearAnswer,

    /// Digit key: a subject on the dashboard, a question number in a quiz
    Digit(u8),
    NextSubject,

    Quit,
}

/// Keys shared by both keymaps
fn common_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Home => Some(Action::Top),
        KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::NextSubject),
        KeyCode::Char(c @ 'a'..='d') => Some(Action::Option(c as usize - 'a' as usize)),
        KeyCode::Char(c @ '0'..='9') => Some(Action::Digit(c as u8 - b'0')),
        KeyCode::Char('n') => Some(Action::Next),
        KeyCode::Char('p') => Some(Action::Previous),
        KeyCode::Char('x') => Some(Action::ClearAnswer),
        KeyCode::Char('s') => Some(Action::Submit),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Char('g') => Some(Action::Top),
        KeyCode::Char('G') => Some(Action::Bottom),
        other => common_key_to_action(other),
    }
}

/// Map a key press, honouring the vim setting and Ctrl combinations
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::Next),
            KeyCode::Char('p') => Some(Action::Previous),
            _ => None,
        };
    }
    if vim_mode { vim_key_to_action(key) } else { common_key_to_action(key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(vim_key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn vim_keys_off_without_vim_mode() {
        assert_eq!(key_to_action(KeyCode::Char('j'), KeyModifiers::NONE, false), None);
        assert_eq!(key_to_action(KeyCode::Down, KeyModifiers::NONE, false), Some(Action::Down));
    }

    #[test]
    fn letters_pick_options() {
        assert_eq!(vim_key_to_action(KeyCode::Char('a')), Some(Action::Option(0)));
        assert_eq!(vim_key_to_action(KeyCode::Char('d')), Some(Action::Option(3)));
        assert_eq!(vim_key_to_action(KeyCode::Char('e')), None);
    }

    #[test]
    fn digit_keys_carry_their_value() {
        assert_eq!(vim_key_to_action(KeyCode::Char('0')), Some(Action::Digit(0)));
        assert_eq!(vim_key_to_action(KeyCode::Char('7')), Some(Action::Digit(7)));
        assert_eq!(key_to_action(KeyCode::Char('3'), KeyModifiers::NONE, false), Some(Action::Digit(3)));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL, true),
            Some(Action::Quit)
        );
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(vim_key_to_action(KeyCode::Char('z')), None);
    }
}
