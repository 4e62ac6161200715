//! Keyboard Input Module
//!
//! Key codes and pressed-key tracking for camera keyboard controls.
//! Decoupled from winit to use generic key codes.

/// Generic key codes, independent of windowing system.
///
/// Only the keys the camera reacts to are named; everything else arrives
/// as [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Rotation keys
    Q,
    E,
    R,
    F,

    // Arrow keys (aliases for W/S/A/D)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Catch-all for keys the camera ignores
    Other,
}

impl KeyCode {
    /// Whether this key drives any camera control.
    pub fn is_control_key(self) -> bool {
        self != KeyCode::Other
    }
}

/// Tracks which camera control keys are currently held.
///
/// Arrow keys share state with W/S/A/D, so releasing `ArrowUp` also
/// releases a held `W`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// W / ArrowUp - move target forward
    pub forward: bool,
    /// S / ArrowDown - move target backward
    pub backward: bool,
    /// A / ArrowLeft - move target left
    pub left: bool,
    /// D / ArrowRight - move target right
    pub right: bool,
    /// Q - decrease yaw
    pub yaw_left: bool,
    /// E - increase yaw
    pub yaw_right: bool,
    /// R - increase pitch
    pub pitch_up: bool,
    /// F - decrease pitch
    pub pitch_down: bool,
}

impl KeyState {
    /// Create a new key state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state based on key press/release.
    ///
    /// Returns `true` if the key is a camera control key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W | KeyCode::ArrowUp => &mut self.forward,
            KeyCode::S | KeyCode::ArrowDown => &mut self.backward,
            KeyCode::A | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::D | KeyCode::ArrowRight => &mut self.right,
            KeyCode::Q => &mut self.yaw_left,
            KeyCode::E => &mut self.yaw_right,
            KeyCode::R => &mut self.pitch_up,
            KeyCode::F => &mut self.pitch_down,
            KeyCode::Other => return false,
        };
        *slot = pressed;
        true
    }

    /// Check if any of W/A/S/D (or their arrow aliases) is held.
    pub fn any_movement_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Check if any control key is held.
    pub fn any_pressed(&self) -> bool {
        self.any_movement_pressed()
            || self.yaw_left
            || self.yaw_right
            || self.pitch_up
            || self.pitch_down
    }

    /// Reset all keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
