//! Orbit Controller
//!
//! Damped orbit camera around a movable look-at target. Input handlers and
//! animation callbacks only ever write the *desired* orbit state; once per
//! frame [`OrbitController::update`] smooths the *current* state toward it
//! and writes the resulting transform to the attached camera.
//!
//! The controller is shared as `Rc<RefCell<OrbitController>>`:
//! - the camera holds it weakly as a [`CameraObserver`], so external camera
//!   moves are folded back into the desired state
//! - an input surface holds it weakly as an [`InputListener`]
//!
//! While `update()` runs the controller is mutably borrowed, so the camera's
//! change notification for the controller's own write cannot reach it.
//!
//! # Example
//!
//! ```rust,ignore
//! let camera = Rc::new(RefCell::new(Camera::default()));
//! let controller = Rc::new(RefCell::new(OrbitController::new(OrbitConfig::default())));
//! OrbitController::attach(&controller, &camera);
//! listen(&mut hub, &controller);
//!
//! // Each frame:
//! controller.borrow_mut().update();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::config::OrbitConfig;
use super::integrator::{self, CameraPose};
use super::normalizer::{CameraIntent, InputNormalizer};
use super::rig::{CameraObserver, CameraRig, ObserverId};
use super::spherical::{SphericalCameraState, SphericalCoords};
use crate::input::{InputEvent, InputListener, InputResponse, KeyState};

/// Snapshot of the desired orbit state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStatus {
    pub desired_alpha: f32,
    pub desired_beta: f32,
    pub desired_radius: f32,
    pub desired_target: Vec3,
}

impl From<&SphericalCoords> for TrackStatus {
    fn from(coords: &SphericalCoords) -> Self {
        Self {
            desired_alpha: coords.alpha,
            desired_beta: coords.beta,
            desired_radius: coords.radius,
            desired_target: coords.target,
        }
    }
}

struct CameraBinding {
    camera: Weak<RefCell<dyn CameraRig>>,
    observer: ObserverId,
}

/// Damped orbit camera controller.
pub struct OrbitController {
    config: OrbitConfig,
    state: SphericalCameraState,
    binding: Option<CameraBinding>,
    keys: KeyState,
    normalizer: InputNormalizer,
}

impl OrbitController {
    /// Create a detached controller.
    ///
    /// An invalid config is logged and used as given.
    pub fn new(config: OrbitConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("orbit controller created with invalid config: {}", err);
        }
        Self {
            state: SphericalCameraState::from_config(&config),
            config,
            binding: None,
            keys: KeyState::new(),
            normalizer: InputNormalizer::new(),
        }
    }

    /// Bind `this` to `camera`, replacing any previous binding, and
    /// subscribe to the camera's change notifications.
    pub fn attach<C: CameraRig + 'static>(this: &Rc<RefCell<Self>>, camera: &Rc<RefCell<C>>) {
        let camera: Rc<RefCell<dyn CameraRig>> = camera.clone();
        let observer: Rc<RefCell<dyn CameraObserver>> = this.clone();

        let mut controller = this.borrow_mut();
        controller.detach();
        let id = camera.borrow_mut().subscribe(Rc::downgrade(&observer));
        controller.binding = Some(CameraBinding {
            camera: Rc::downgrade(&camera),
            observer: id,
        });
        log::debug!("orbit controller attached ({:?})", id);
    }

    /// Unsubscribe from the bound camera. No-op when detached.
    pub fn detach(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        self.normalizer.reset();
        let Some(camera) = binding.camera.upgrade() else {
            return;
        };
        match camera.try_borrow_mut() {
            Ok(mut camera) => {
                camera.unsubscribe(binding.observer);
                log::debug!("orbit controller detached ({:?})", binding.observer);
            }
            // The camera drops the subscription once this controller is gone.
            Err(_) => log::warn!("camera busy during detach, subscription left in place"),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.camera().is_some()
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn current(&self) -> &SphericalCoords {
        self.state.current()
    }

    pub fn desired(&self) -> &SphericalCoords {
        self.state.desired()
    }

    /// Orbit state, for reading limits and zoom normalisation.
    pub fn state(&self) -> &SphericalCameraState {
        &self.state
    }

    /// Mutable orbit state. Writes go to desired values and stay clamped.
    pub fn state_mut(&mut self) -> &mut SphericalCameraState {
        &mut self.state
    }

    pub fn status(&self) -> TrackStatus {
        TrackStatus::from(self.state.desired())
    }

    /// Release every held key.
    pub fn reset_keys(&mut self) {
        self.keys.reset();
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Orbit around `point` from where the camera currently is.
    ///
    /// Derives desired alpha, beta and radius from the displacement between
    /// the camera position and `point`. No-op when detached.
    pub fn set_camera_target(&mut self, point: Vec3) {
        let Some((position, _)) = self.camera_pose() else {
            return;
        };
        self.state
            .set_desired(SphericalCoords::from_look_at(position, point));
    }

    /// Move the camera to `position` and orbit around `target`, or around
    /// the current desired target when `target` is `None`.
    ///
    /// The camera position is written immediately; orientation follows on
    /// the next `update()`. No-op when detached.
    pub fn place_camera(&mut self, position: Vec3, target: Option<Vec3>) {
        let Some(camera) = self.camera() else {
            return;
        };
        let target = target.unwrap_or(self.state.desired().target);
        match camera.try_borrow_mut() {
            Ok(mut camera) => camera.set_position(position),
            Err(_) => {
                log::warn!("camera busy, place_camera ignored");
                return;
            }
        }

        let d = target - position;
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        self.state.set_desired_alpha(-d.x.atan2(d.z));
        self.state.set_desired_beta(d.y.atan2(horizontal));
        self.state.set_desired_radius(d.length());
        self.state.set_desired_target(target);
    }

    /// Advance one frame: smooth, write the camera, then apply held keys.
    ///
    /// Returns the pose written, or `None` when detached.
    pub fn update(&mut self) -> Option<CameraPose> {
        let camera = self.camera()?;
        let keys = self
            .config
            .enable_keyboard_controls
            .then_some(&self.keys);
        let pose = integrator::integrate(&mut self.state, keys, self.config.dampening);

        match camera.try_borrow_mut() {
            Ok(mut camera) => camera.set_transform(pose.position, pose.rotation),
            Err(_) => log::trace!("camera busy, frame not written"),
        }
        Some(pose)
    }

    fn camera(&self) -> Option<Rc<RefCell<dyn CameraRig>>> {
        self.binding.as_ref()?.camera.upgrade()
    }

    fn camera_pose(&self) -> Option<(Vec3, Quat)> {
        let camera = self.camera()?;
        let camera = camera.try_borrow().ok()?;
        Some((camera.position(), camera.rotation()))
    }

    fn apply_intent(&mut self, intent: &CameraIntent) {
        if intent.orbit.x != 0.0 {
            self.state.add_alpha(intent.orbit.x);
        }
        if intent.orbit.y != 0.0 {
            self.state.add_beta(intent.orbit.y);
        }
        if intent.pan != glam::Vec2::ZERO {
            if let Some((_, rotation)) = self.camera_pose() {
                let axes = Mat3::from_quat(rotation);
                let offset = axes.x_axis * intent.pan.x + axes.y_axis * intent.pan.y;
                self.state.translate_target(offset);
            }
        }
        if intent.zoom != 0.0 {
            self.state.add_radius(intent.zoom);
        }
    }
}

impl CameraObserver for OrbitController {
    /// Fold an external camera move back into the desired state.
    fn on_camera_change(&mut self, id: ObserverId, position: Vec3, rotation: Quat) {
        // Stale subscriptions survive a detach that found the camera busy.
        if self.binding.as_ref().map(|binding| binding.observer) != Some(id) {
            return;
        }
        let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
        self.state.set_desired_alpha(-yaw);
        self.state.set_desired_beta(-pitch);

        let desired = *self.state.desired();
        let (sin_a, cos_a) = desired.alpha.sin_cos();
        let (sin_b, cos_b) = desired.beta.sin_cos();
        let r = desired.radius;
        self.state.set_desired_target(Vec3::new(
            position.x - r * sin_a * cos_b,
            position.y + r * sin_b,
            position.z + r * cos_a * cos_b,
        ));
        log::trace!("external camera change folded into desired state");
    }
}

impl InputListener for OrbitController {
    fn handle_input(&mut self, event: &InputEvent) -> InputResponse {
        match event {
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => {
                if !self.config.enable_keyboard_controls || !key.is_control_key() {
                    return InputResponse::Ignored;
                }
                self.keys
                    .handle_key(*key, matches!(event, InputEvent::KeyDown(_)));
                InputResponse::Consumed
            }
            _ => {
                if self.is_attached() {
                    let zoom_norm = self.state.zoom_norm();
                    let intent = self.normalizer.normalize(event, &self.config, zoom_norm);
                    if !intent.is_empty() {
                        self.apply_intent(&intent);
                    }
                }
                InputResponse::Consumed
            }
        }
    }
}

impl std::fmt::Debug for OrbitController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitController")
            .field("attached", &self.is_attached())
            .field("current", self.state.current())
            .field("desired", self.state.desired())
            .field("keys", &self.keys)
            .finish()
    }
}
