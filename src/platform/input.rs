//! Keyboard input
//!
//! Keys are mapped to logical inputs by `KeyboardEvent.code`. Presses are
//! latched until the next tick samples them, so a tap shorter than a frame is
//! never lost and a held key only counts once.

use crate::sim::TickInput;

/// Inputs the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalInput {
    Left,
    Right,
    Jump,
    Pause,
    /// Toggle the autopilot
    Idle,
}

impl LogicalInput {
    pub const ALL: [LogicalInput; 5] = [
        LogicalInput::Left,
        LogicalInput::Right,
        LogicalInput::Jump,
        LogicalInput::Pause,
        LogicalInput::Idle,
    ];

    const COUNT: usize = Self::ALL.len();

    /// Map a `KeyboardEvent.code` to a logical input
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Self::Left),
            "ArrowRight" | "KeyD" => Some(Self::Right),
            "Space" | "ArrowUp" | "KeyW" => Some(Self::Jump),
            "KeyP" | "Escape" => Some(Self::Pause),
            "KeyI" => Some(Self::Idle),
            _ => None,
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            LogicalInput::Left => 0,
            LogicalInput::Right => 1,
            LogicalInput::Jump => 2,
            LogicalInput::Pause => 3,
            LogicalInput::Idle => 4,
        }
    }
}

/// Held keys plus presses waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; LogicalInput::COUNT],
    pressed: [bool; LogicalInput::COUNT],
    /// Autopilot on/off
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key going down. Auto-repeat while held is ignored.
    pub fn press(&mut self, input: LogicalInput) {
        let i = input.index();
        if self.held[i] {
            return;
        }
        self.held[i] = true;
        self.pressed[i] = true;
        if input == LogicalInput::Idle {
            self.idle_mode = !self.idle_mode;
            log::info!("Idle mode: {}", self.idle_mode);
        }
    }

    pub fn release(&mut self, input: LogicalInput) {
        self.held[input.index()] = false;
    }

    pub fn is_held(&self, input: LogicalInput) -> bool {
        self.held[input.index()]
    }

    /// Key-down by event code; returns whether the key is bound
    pub fn key_down(&mut self, code: &str) -> bool {
        match LogicalInput::from_key_code(code) {
            Some(input) => {
                self.press(input);
                true
            }
            None => false,
        }
    }

    /// Key-up by event code; returns whether the key is bound
    pub fn key_up(&mut self, code: &str) -> bool {
        match LogicalInput::from_key_code(code) {
            Some(input) => {
                self.release(input);
                true
            }
            None => false,
        }
    }

    /// Take this tick's edges and clear the latches
    pub fn sample(&mut self) -> TickInput {
        let pressed = std::mem::take(&mut self.pressed);
        TickInput {
            move_left: pressed[LogicalInput::Left.index()],
            move_right: pressed[LogicalInput::Right.index()],
            jump: pressed[LogicalInput::Jump.index()],
            pause: pressed[LogicalInput::Pause.index()],
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(LogicalInput::from_key_code("ArrowLeft"), Some(LogicalInput::Left));
        assert_eq!(LogicalInput::from_key_code("KeyD"), Some(LogicalInput::Right));
        assert_eq!(LogicalInput::from_key_code("Space"), Some(LogicalInput::Jump));
        assert_eq!(LogicalInput::from_key_code("Escape"), Some(LogicalInput::Pause));
        assert_eq!(LogicalInput::from_key_code("KeyQ"), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, input) in LogicalInput::ALL.iter().enumerate() {
            assert_eq!(input.index(), i);
        }
        // Every latch slot is reachable and independent
        let mut state = InputState::new();
        for input in LogicalInput::ALL {
            state.press(input);
        }
        assert!(LogicalInput::ALL.iter().all(|input| state.is_held(*input)));
    }

    #[test]
    fn test_press_is_sampled_once() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.sample().move_left);
        // Still held, but no new edge
        assert!(!input.sample().move_left);
        assert!(input.is_held(LogicalInput::Left));
    }

    #[test]
    fn test_held_key_repeat_is_ignored() {
        let mut input = InputState::new();
        input.key_down("Space");
        input.sample();
        input.key_down("Space");
        assert!(!input.sample().jump);

        input.key_up("Space");
        input.key_down("Space");
        assert!(input.sample().jump);
    }

    #[test]
    fn test_tap_within_a_frame_survives() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        input.key_up("KeyA");
        assert!(input.sample().move_left);
    }

    #[test]
    fn test_idle_toggle() {
        let mut input = InputState::new();
        input.key_down("KeyI");
        assert!(input.sample().idle_mode);
        input.key_up("KeyI");
        input.key_down("KeyI");
        assert!(!input.sample().idle_mode);
    }

    #[test]
    fn test_unbound_key() {
        let mut input = InputState::new();
        assert!(!input.key_down("F5"));
        assert_eq!(input.sample(), TickInput::default());
    }
}
