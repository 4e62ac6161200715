//! Input Module
//!
//! Provides platform-agnostic input types for camera control.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration.
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_track_engine::input::{InputEvent, InputHub, KeyCode, MouseButton, Position};
//!
//! let mut hub = InputHub::new();
//! // ... subscribe an OrbitController ...
//!
//! hub.dispatch(&InputEvent::PointerDown {
//!     button: MouseButton::Left,
//!     position: Position::new(100.0, 50.0),
//! });
//! hub.dispatch(&InputEvent::KeyDown(KeyCode::W));
//! ```

pub mod event;
pub mod keyboard;
pub mod mouse;
pub mod surface;

// Re-export commonly used types at module level
pub use event::{InputEvent, InputResponse};
pub use keyboard::{KeyCode, KeyState};
pub use mouse::{MouseButton, Position};
pub use surface::{listen, InputHub, InputListener, InputSurface, ListenerId};
