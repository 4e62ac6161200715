//! Pointer Input Module
//!
//! Mouse buttons and screen positions. Decoupled from winit to use generic types.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button, orbits the camera.
    Left,
    Middle,
    /// Secondary button, pans the camera.
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

impl MouseButton {
    /// Whether dragging with this button pans instead of orbiting.
    pub fn pans(self) -> bool {
        self == MouseButton::Right
    }
}

/// 2D position in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero position.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Calculate distance to another position.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two positions.
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Offset from `origin` to this position.
    pub fn delta_from(&self, origin: &Position) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance(&p2), 5.0);
    }

    #[test]
    fn test_position_midpoint_and_delta() {
        let p1 = Position::new(10.0, 20.0);
        let p2 = Position::new(30.0, 40.0);
        assert_eq!(p1.midpoint(&p2), Position::new(20.0, 30.0));
        assert_eq!(p2.delta_from(&p1), (20.0, 20.0));
    }

    #[test]
    fn test_only_right_button_pans() {
        assert!(MouseButton::Right.pans());
        assert!(!MouseButton::Left.pans());
        assert!(!MouseButton::Middle.pans());
        assert!(!MouseButton::Other(4).pans());
    }
}
