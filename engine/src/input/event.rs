//! Input events as observed on an input surface.

use super::keyboard::KeyCode;
use super::mouse::{MouseButton, Position};

/// A single input event delivered by an [`InputSurface`](super::InputSurface).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { button: MouseButton, position: Position },
    PointerMove { position: Position },
    PointerUp { button: MouseButton, position: Position },
    /// Vertical wheel delta in pixels, positive when scrolling down (zoom out).
    Wheel { delta_y: f32 },
    /// Touch events carry every contact currently on the surface.
    TouchStart { touches: Vec<Position> },
    TouchMove { touches: Vec<Position> },
    TouchEnd { touches: Vec<Position> },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Context menu request; consumed so right-drag panning works.
    ContextMenu,
    /// Drag enter/over/leave on the surface.
    DragOver,
}

impl InputEvent {
    pub fn is_keyboard(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_) | InputEvent::KeyUp(_))
    }
}

/// What a listener did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Handled; the surface's default action should be suppressed.
    Consumed,
    /// Not of interest to this listener.
    Ignored,
}

impl InputResponse {
    pub fn is_consumed(self) -> bool {
        self == InputResponse::Consumed
    }
}
