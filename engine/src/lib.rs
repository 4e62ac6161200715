//! Orbit Track Engine Library
//!
//! A window-system agnostic orbit camera controller. Raw pointer, touch,
//! wheel and keyboard input is turned into a smoothly damped orbit around a
//! look-at target, with an optional scripted track animation that suspends
//! itself on user input and resumes after a quiet period.
//!
//! # Modules
//!
//! - [`camera`] - Orbit state, input normalisation, damped integration and the track overlay
//! - [`input`] - Platform-agnostic input events, key state and the input hub
//! - [`timer`] - Cooperative timers and clocks
//! - [`error`] - Configuration errors
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use orbit_track_engine::camera::{Camera, OrbitConfig, OrbitController, TrackAnimation, TrackSettings};
//! use orbit_track_engine::input::{listen, InputHub};
//! use orbit_track_engine::timer::SystemClock;
//!
//! let camera = Rc::new(RefCell::new(Camera::default()));
//! let controller = Rc::new(RefCell::new(OrbitController::new(OrbitConfig::default())));
//! OrbitController::attach(&controller, &camera);
//!
//! let mut hub = InputHub::new();
//! listen(&mut hub, &controller);
//!
//! let track = Rc::new(RefCell::new(TrackAnimation::new(
//!     controller.clone(),
//!     Rc::new(SystemClock::new()),
//! )));
//! track.borrow_mut().set_animation_logic(TrackSettings::default(), |orbit| {
//!     orbit.state_mut().add_alpha(0.002);
//! });
//! listen(&mut hub, &track);
//! track.borrow_mut().start();
//!
//! // Per frame:
//! track.borrow_mut().poll();
//! controller.borrow_mut().update();
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod timer;

// Re-export commonly used types at crate level
pub use camera::{
    AnimationState, Camera, CameraRig, OrbitConfig, OrbitController, TrackAnimation,
    TrackSettings, TrackStatus,
};
pub use error::ConfigError;
pub use input::{InputEvent, InputHub, KeyCode, MouseButton, Position};
pub use timer::{Clock, ManualClock, SystemClock};
