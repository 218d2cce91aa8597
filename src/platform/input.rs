//! Keyboard input mapping

use crate::sim::{PaddleIntent, TickInput};

/// Logical actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value; unbound keys give `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Right" | "ArrowRight" => Some(KeyAction::MoveRight),
            "Left" | "ArrowLeft" => Some(KeyAction::MoveLeft),
            _ => None,
        }
    }
}

/// Paddle intent accumulated from key events, read once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    intent: PaddleIntent,
}

impl InputState {
    pub fn key_down(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::MoveRight) => self.intent = PaddleIntent::Right,
            Some(KeyAction::MoveLeft) => self.intent = PaddleIntent::Left,
            None => {}
        }
    }

    /// Releasing either movement key stops the paddle, even if the other
    /// one is still held
    pub fn key_up(&mut self, key: &str) {
        if KeyAction::from_key(key).is_some() {
            self.intent = PaddleIntent::Stop;
        }
    }

    pub fn set_intent(&mut self, intent: PaddleIntent) {
        self.intent = intent;
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            paddle: self.intent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key("ArrowRight"), Some(KeyAction::MoveRight));
        assert_eq!(KeyAction::from_key("Right"), Some(KeyAction::MoveRight));
        assert_eq!(KeyAction::from_key("ArrowLeft"), Some(KeyAction::MoveLeft));
        assert_eq!(KeyAction::from_key("Left"), Some(KeyAction::MoveLeft));
        assert_eq!(KeyAction::from_key("a"), None);
        assert_eq!(KeyAction::from_key(" "), None);
    }

    #[test]
    fn test_key_sequence() {
        let mut input = InputState::default();
        input.key_down("ArrowRight");
        assert_eq!(input.tick_input().paddle, PaddleIntent::Right);

        // Unbound keys change nothing
        input.key_down("Shift");
        input.key_up("Shift");
        assert_eq!(input.tick_input().paddle, PaddleIntent::Right);

        input.key_down("ArrowLeft");
        assert_eq!(input.tick_input().paddle, PaddleIntent::Left);

        // Letting go of Right while Left is held still stops
        input.key_up("ArrowRight");
        assert_eq!(input.tick_input().paddle, PaddleIntent::Stop);
    }
}
