//! Keyboard edge detection
//!
//! The simulation reacts to presses, not holds. Hosts report key down/up as
//! they happen (auto-repeat included); `EdgeDetector` turns that into one
//! `TickInput` per simulation step.

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Space: start / restart after game over
    Start,
    /// R
    Restart,
    /// P
    Pause,
    /// C
    ToggleCollisions,
    /// D
    ToggleHitboxes,
    /// T
    ToggleTethers,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Start,
        Key::Restart,
        Key::Pause,
        Key::ToggleCollisions,
        Key::ToggleHitboxes,
        Key::ToggleTethers,
    ];

    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Start),
            "KeyR" => Some(Key::Restart),
            "KeyP" => Some(Key::Pause),
            "KeyC" => Some(Key::ToggleCollisions),
            "KeyD" => Some(Key::ToggleHitboxes),
            "KeyT" => Some(Key::ToggleTethers),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tracks held keys and latches fresh presses until consumed
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    held: [bool; 8],
    pressed: [bool; 8],
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Repeats while held are not new presses.
    pub fn key_down(&mut self, key: Key) {
        let i = key.index();
        if !self.held[i] {
            self.held[i] = true;
            self.pressed[i] = true;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Drop held state and pending presses (focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Presses since the last call, as one tick's input
    pub fn take_input(&mut self) -> TickInput {
        let pressed = std::mem::take(&mut self.pressed);
        let was = |key: Key| pressed[key.index()];
        TickInput {
            left: was(Key::Left),
            right: was(Key::Right),
            start: was(Key::Start),
            restart: was(Key::Restart),
            pause: was(Key::Pause),
            toggle_collisions: was(Key::ToggleCollisions),
            toggle_hitboxes: was(Key::ToggleHitboxes),
            toggle_tethers: was(Key::ToggleTethers),
        }
    }
}
