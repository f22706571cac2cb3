// Held-key state mutated by the window key listeners and sampled once
// per physics tick.
use std::collections::HashSet;

use crate::model::InputSample;

/// The four recognized keys. Everything else passes through to the
/// browser untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Space,
}

impl GameKey {
    /// Maps a KeyboardEvent's key/code pair to a game key. Space shows
    /// up differently across browsers, so both fields are consulted.
    pub fn from_event(key: &str, code: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" => Some(Self::Up),
            " " | "Space" | "Spacebar" => Some(Self::Space),
            _ if code == "Space" => Some(Self::Space),
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct InputState {
    held: HashSet<GameKey>,
}

impl InputState {
    pub fn press(&mut self, key: GameKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: GameKey) {
        self.held.remove(&key);
    }

    pub fn sample(&self) -> InputSample {
        InputSample {
            left: self.held.contains(&GameKey::Left),
            right: self.held.contains(&GameKey::Right),
            jump: self.held.contains(&GameKey::Up) || self.held.contains(&GameKey::Space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_exactly_four_keys() {
        assert_eq!(GameKey::from_event("ArrowLeft", ""), Some(GameKey::Left));
        assert_eq!(GameKey::from_event("ArrowRight", ""), Some(GameKey::Right));
        assert_eq!(GameKey::from_event("ArrowUp", ""), Some(GameKey::Up));
        assert_eq!(GameKey::from_event(" ", "Space"), Some(GameKey::Space));
        assert_eq!(GameKey::from_event("Spacebar", ""), Some(GameKey::Space));
        assert_eq!(GameKey::from_event("ArrowDown", "ArrowDown"), None);
        assert_eq!(GameKey::from_event("a", "KeyA"), None);
    }

    #[test]
    fn sample_reflects_membership_not_order() {
        let mut input = InputState::default();
        input.press(GameKey::Right);
        input.press(GameKey::Right); // repeat keydown is a no-op
        input.press(GameKey::Space);
        let s = input.sample();
        assert!(!s.left && s.right && s.jump);

        input.release(GameKey::Space);
        input.press(GameKey::Up); // either Up or Space means jump
        assert!(input.sample().jump);

        input.release(GameKey::Up);
        input.release(GameKey::Right);
        assert_eq!(input.sample(), InputSample::default());
    }
}
