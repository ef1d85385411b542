//! Raw pointer/keyboard events to game intents
//!
//! Gating happens here: an event that makes no sense in the current phase
//! maps to nothing and is dropped, never queued.

use crate::session::SessionPhase;

/// Keys the game cares about, from DOM `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Other,
}

impl KeyCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => KeyCode::Space,
            "Enter" | "NumpadEnter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            _ => KeyCode::Other,
        }
    }
}

/// A raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse button, touch or pen press anywhere on the canvas
    PointerDown,
    KeyDown(KeyCode),
}

/// What the player meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Flip the bar's color
    ToggleColor,
    /// Begin a new run
    Start,
    /// Back to the title screen
    Menu,
}

/// Map an event to an intent given the current phase
pub fn interpret(event: InputEvent, phase: SessionPhase) -> Option<Intent> {
    use SessionPhase::*;

    match (event, phase) {
        (InputEvent::PointerDown, Playing) => Some(Intent::ToggleColor),
        (InputEvent::KeyDown(KeyCode::Space), Playing) => Some(Intent::ToggleColor),
        (InputEvent::KeyDown(KeyCode::Space | KeyCode::Enter), Menu | GameOver) => {
            Some(Intent::Start)
        }
        (InputEvent::KeyDown(KeyCode::Escape), Playing | GameOver) => Some(Intent::Menu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(KeyCode::from_code("Space"), KeyCode::Space);
        assert_eq!(KeyCode::from_code("NumpadEnter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_code("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_code("KeyA"), KeyCode::Other);
    }

    #[test]
    fn test_toggle_only_while_playing() {
        assert_eq!(
            interpret(InputEvent::PointerDown, SessionPhase::Playing),
            Some(Intent::ToggleColor)
        );
        assert_eq!(interpret(InputEvent::PointerDown, SessionPhase::Menu), None);
        assert_eq!(interpret(InputEvent::PointerDown, SessionPhase::GameOver), None);
    }

    #[test]
    fn test_space_depends_on_phase() {
        let space = InputEvent::KeyDown(KeyCode::Space);
        assert_eq!(interpret(space, SessionPhase::Playing), Some(Intent::ToggleColor));
        assert_eq!(interpret(space, SessionPhase::Menu), Some(Intent::Start));
        assert_eq!(interpret(space, SessionPhase::GameOver), Some(Intent::Start));
    }

    #[test]
    fn test_enter_never_toggles() {
        let enter = InputEvent::KeyDown(KeyCode::Enter);
        assert_eq!(interpret(enter, SessionPhase::Playing), None);
        assert_eq!(interpret(enter, SessionPhase::Menu), Some(Intent::Start));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let esc = InputEvent::KeyDown(KeyCode::Escape);
        assert_eq!(interpret(esc, SessionPhase::Playing), Some(Intent::Menu));
        assert_eq!(interpret(esc, SessionPhase::GameOver), Some(Intent::Menu));
        assert_eq!(interpret(esc, SessionPhase::Menu), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let other = InputEvent::KeyDown(KeyCode::Other);
        for phase in [SessionPhase::Menu, SessionPhase::Playing, SessionPhase::GameOver] {
            assert_eq!(interpret(other, phase), None);
        }
    }
}
