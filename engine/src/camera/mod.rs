//! Camera Module
//!
//! Orbit camera control: spherical state with clamping, input
//! normalisation, the per-frame damped integrator, and a timer-driven
//! track animation overlay. This module is window-system agnostic - it only
//! deals with camera state and math.

pub mod config;
pub mod integrator;
pub mod normalizer;
pub mod orbit_controller;
pub mod rig;
pub mod spherical;
pub mod track;

pub use config::{OrbitConfig, TrackSettings};
pub use integrator::{CameraPose, look_rotation};
pub use normalizer::{CameraIntent, InputNormalizer};
pub use orbit_controller::{OrbitController, TrackStatus};
pub use rig::{Camera, CameraObserver, CameraRig, ObserverId};
pub use spherical::{OrbitLimits, SphericalCameraState, SphericalCoords};
pub use track::{AnimationLogic, AnimationState, TrackAnimation};
