//! Camera Rig
//!
//! The camera transform a controller drives. The host application owns the
//! camera (usually as `Rc<RefCell<Camera>>`, shared with the renderer); the
//! controller only holds a weak reference and writes to it once per frame.
//!
//! Observers are notified after every transform write, with the new
//! transform passed by value. Notification uses `try_borrow_mut`: an
//! observer that is already mutably borrowed, which is the case for a
//! controller writing the camera from inside its own `update()`, is skipped.
//! A controller therefore never sees its own writes as external changes.

use std::cell::RefCell;
use std::rc::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat3, Quat, Vec3};

/// Receives transform-changed notifications from a camera.
///
/// `id` is the subscription the notification arrives through.
pub trait CameraObserver {
    fn on_camera_change(&mut self, id: ObserverId, position: Vec3, rotation: Quat);
}

/// Identifies one observer subscription. Ids are unique across all cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Readable/writable camera transform with change notifications.
pub trait CameraRig {
    fn position(&self) -> Vec3;

    fn rotation(&self) -> Quat;

    /// Write position and rotation together, notifying observers once.
    fn set_transform(&mut self, position: Vec3, rotation: Quat);

    fn set_position(&mut self, position: Vec3) {
        let rotation = self.rotation();
        self.set_transform(position, rotation);
    }

    fn set_rotation(&mut self, rotation: Quat) {
        let position = self.position();
        self.set_transform(position, rotation);
    }

    fn subscribe(&mut self, observer: Weak<RefCell<dyn CameraObserver>>) -> ObserverId;

    /// Returns `false` if `id` was not subscribed.
    fn unsubscribe(&mut self, id: ObserverId) -> bool;
}

/// Plain camera transform: a position and an orientation.
///
/// The camera looks down its local +Z axis; local +X is right and +Y is up.
pub struct Camera {
    position: Vec3,
    rotation: Quat,
    observers: Vec<(ObserverId, Weak<RefCell<dyn CameraObserver>>)>,
}

impl Camera {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            observers: Vec::new(),
        }
    }

    /// Viewing direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Rotation as a 3×3 matrix; columns are the local right, up and view axes.
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|(_, observer)| observer.strong_count() > 0)
            .count()
    }

    fn notify(&mut self) {
        self.observers.retain(|(_, observer)| observer.strong_count() > 0);
        for (id, observer) in &self.observers {
            let Some(observer) = observer.upgrade() else {
                continue;
            };
            match observer.try_borrow_mut() {
                Ok(mut observer) => observer.on_camera_change(*id, self.position, self.rotation),
                Err(_) => log::trace!("camera observer {:?} busy, change not forwarded", id),
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

impl CameraRig for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.notify();
    }

    fn subscribe(&mut self, observer: Weak<RefCell<dyn CameraObserver>>) -> ObserverId {
        let id = ObserverId::next();
        self.observers.push((id, observer));
        id
    }

    fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("observers", &self.observers.len())
            .finish()
    }
}
