//! Damped Integrator
//!
//! The per-frame step of the orbit controller. One call to [`integrate`]
//! performs, in order:
//!
//! 1. smoothing of current state toward desired state
//! 2. spherical → cartesian camera position
//! 3. look-at orientation from position and target
//! 4. keyboard panning/rotation using the orientation just computed
//!
//! Step 4 only touches desired state, so its effect shows up next frame.

use glam::{EulerRot, Mat3, Quat, Vec3};

use super::spherical::{SphericalCameraState, SphericalCoords};
use crate::input::KeyState;

/// Target translation per frame per held movement key.
pub const KEY_MOVE_SPEED: f32 = 0.025;
/// Alpha/beta change per frame per held rotation key, radians.
pub const KEY_ROTATE_SPEED: f32 = 0.01;

/// Camera transform produced by one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    /// Pose for a camera placed at `coords`, looking at its target.
    pub fn from_coords(coords: &SphericalCoords) -> Self {
        let position = coords.position();
        Self {
            position,
            rotation: look_rotation(position, coords.target),
        }
    }
}

/// Rotation that points local +Z from `position` toward `target`, with no roll.
///
/// Returns the identity when the two points coincide.
pub fn look_rotation(position: Vec3, target: Vec3) -> Quat {
    let direction = (target - position).normalize_or_zero();
    let pitch = (-direction.y).clamp(-1.0, 1.0).asin();
    let yaw = direction.x.atan2(direction.z);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Advance `state` by one frame and return the camera pose to write.
///
/// `keys` is `None` when keyboard controls are disabled.
pub fn integrate(
    state: &mut SphericalCameraState,
    keys: Option<&KeyState>,
    dampening: f32,
) -> CameraPose {
    let current = state.step(dampening);
    let pose = CameraPose::from_coords(&current);

    if let Some(keys) = keys {
        apply_keys(state, keys, pose.rotation);
    }
    pose
}

/// Apply held keys to desired state, moving along the axes of `rotation`.
pub fn apply_keys(state: &mut SphericalCameraState, keys: &KeyState, rotation: Quat) {
    if !keys.any_pressed() {
        return;
    }

    let axes = Mat3::from_quat(rotation);
    let forward = -axes.z_axis;
    let right = axes.x_axis;

    let mut offset = Vec3::ZERO;
    if keys.backward {
        offset += forward * KEY_MOVE_SPEED;
    }
    if keys.forward {
        offset -= forward * KEY_MOVE_SPEED;
    }
    if keys.left {
        offset -= right * KEY_MOVE_SPEED;
    }
    if keys.right {
        offset += right * KEY_MOVE_SPEED;
    }
    if offset != Vec3::ZERO {
        state.translate_target(offset);
    }

    if keys.yaw_right {
        state.add_alpha(KEY_ROTATE_SPEED);
    }
    if keys.yaw_left {
        state.add_alpha(-KEY_ROTATE_SPEED);
    }
    if keys.pitch_up {
        state.add_beta(KEY_ROTATE_SPEED);
    }
    if keys.pitch_down {
        state.add_beta(-KEY_ROTATE_SPEED);
    }
}
