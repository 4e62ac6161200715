//! Spherical Camera State
//!
//! Orbit state expressed as yaw (`alpha`), pitch (`beta`), distance
//! (`radius`) and a look-at `target`. Each component is kept twice: the
//! *desired* value written by input and animation, and the *current* value
//! that trails it through exponential smoothing.
//!
//! Coordinate convention (Y up):
//! - camera = `target + (r·sin α·cos β, −r·sin β, −r·cos α·cos β)`
//! - α = 0, β = 0 puts the camera on the −Z side of the target looking +Z
//! - positive β places the camera below the target, looking up at it

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::OrbitConfig;

/// One spherical camera placement around a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoords {
    /// Yaw in radians, unconstrained
    pub alpha: f32,
    /// Pitch in radians
    pub beta: f32,
    /// Distance from target
    pub radius: f32,
    /// Look-at point
    pub target: Vec3,
}

impl SphericalCoords {
    pub fn new(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Self {
        Self {
            alpha,
            beta,
            radius,
            target,
        }
    }

    /// Derive the placement of a camera at `position` looking at `target`.
    ///
    /// With `d = target − position`: `radius = |d|`,
    /// `beta = atan2(d.y, |d.xz|)`, `alpha = −atan2(d.x, d.z)`.
    pub fn from_look_at(position: Vec3, target: Vec3) -> Self {
        let d = target - position;
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        Self {
            alpha: -d.x.atan2(d.z),
            beta: d.y.atan2(horizontal),
            radius: d.length(),
            target,
        }
    }

    /// Cartesian camera position for this placement.
    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        Vec3::new(
            self.target.x + self.radius * sin_a * cos_b,
            self.target.y - self.radius * sin_b,
            self.target.z - self.radius * cos_a * cos_b,
        )
    }

    /// Per-component linear interpolation toward `other`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            alpha: lerp(self.alpha, other.alpha, t),
            beta: lerp(self.beta, other.beta, t),
            radius: lerp(self.radius, other.radius, t),
            target: self.target + (other.target - self.target) * t,
        }
    }
}

// Exact when a == b.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamping bounds for pitch and distance, in radians and world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_beta: f32,
    pub max_beta: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl OrbitLimits {
    pub fn from_config(config: &OrbitConfig) -> Self {
        Self {
            min_beta: config.min_angle.to_radians(),
            max_beta: config.max_angle.to_radians(),
            min_radius: config.min_zoom,
            max_radius: config.max_zoom,
        }
    }

    // Never panics, even for an inverted range.
    pub fn clamp_beta(&self, beta: f32) -> f32 {
        beta.max(self.min_beta).min(self.max_beta)
    }

    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.max(self.min_radius).min(self.max_radius)
    }

    /// Map `radius` onto [0.1, 1.0] across the zoom range.
    pub fn zoom_norm(&self, radius: f32) -> f32 {
        0.1 + 0.9 * (radius - self.min_radius) / (self.max_radius - self.min_radius)
    }
}

/// Current and desired orbit placement with clamping invariants.
///
/// Desired beta and radius are clamped on every write. Current values are
/// only changed by [`SphericalCameraState::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalCameraState {
    current: SphericalCoords,
    desired: SphericalCoords,
    limits: OrbitLimits,
}

impl SphericalCameraState {
    /// Start at rest at `initial`, with beta and radius brought into range.
    pub fn new(initial: SphericalCoords, limits: OrbitLimits) -> Self {
        let initial = SphericalCoords {
            beta: limits.clamp_beta(initial.beta),
            radius: limits.clamp_radius(initial.radius),
            ..initial
        };
        Self {
            current: initial,
            desired: initial,
            limits,
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(
            SphericalCoords::new(
                config.initial_alpha,
                config.initial_beta,
                config.initial_radius,
                config.initial_target,
            ),
            OrbitLimits::from_config(config),
        )
    }

    #[inline]
    pub fn current(&self) -> &SphericalCoords {
        &self.current
    }

    #[inline]
    pub fn desired(&self) -> &SphericalCoords {
        &self.desired
    }

    #[inline]
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    pub fn set_desired_alpha(&mut self, alpha: f32) {
        self.desired.alpha = alpha;
    }

    pub fn set_desired_beta(&mut self, beta: f32) {
        self.desired.beta = self.limits.clamp_beta(beta);
    }

    pub fn set_desired_radius(&mut self, radius: f32) {
        self.desired.radius = self.limits.clamp_radius(radius);
    }

    pub fn set_desired_target(&mut self, target: Vec3) {
        self.desired.target = target;
    }

    /// Replace the whole desired placement, clamping beta and radius.
    pub fn set_desired(&mut self, coords: SphericalCoords) {
        self.set_desired_alpha(coords.alpha);
        self.set_desired_beta(coords.beta);
        self.set_desired_radius(coords.radius);
        self.set_desired_target(coords.target);
    }

    pub fn add_alpha(&mut self, delta: f32) {
        self.set_desired_alpha(self.desired.alpha + delta);
    }

    pub fn add_beta(&mut self, delta: f32) {
        self.set_desired_beta(self.desired.beta + delta);
    }

    pub fn add_radius(&mut self, delta: f32) {
        self.set_desired_radius(self.desired.radius + delta);
    }

    pub fn translate_target(&mut self, offset: Vec3) {
        self.desired.target += offset;
    }

    /// Zoom normalisation of the desired radius, in [0.1, 1.0].
    pub fn zoom_norm(&self) -> f32 {
        self.limits.zoom_norm(self.desired.radius)
    }

    /// Move current toward desired by `dampening` and return the result.
    ///
    /// When current already equals desired this leaves it unchanged.
    pub fn step(&mut self, dampening: f32) -> SphericalCoords {
        self.current = self.current.lerp(&self.desired, dampening);
        self.current
    }

    /// Whether current has converged onto desired.
    pub fn is_at_rest(&self) -> bool {
        self.current == self.desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn default_state() -> SphericalCameraState {
        SphericalCameraState::from_config(&OrbitConfig::default())
    }

    #[test]
    fn test_look_at_straight_ahead() {
        let coords = SphericalCoords::from_look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(approx_eq(coords.alpha.abs(), std::f32::consts::PI));
        assert!(approx_eq(coords.beta, 0.0));
        assert!(approx_eq(coords.radius, 5.0));
    }

    #[test]
    fn test_look_at_round_trip() {
        let samples = [
            (Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO),
            (Vec3::new(3.0, -2.0, 1.0), Vec3::new(-1.0, 4.0, 2.5)),
            (Vec3::new(-7.0, 0.5, -3.0), Vec3::new(0.0, 0.0, 0.0)),
            (Vec3::new(1.0, 10.0, 1.0), Vec3::new(1.5, -2.0, 0.5)),
        ];
        for (position, target) in samples {
            let coords = SphericalCoords::from_look_at(position, target);
            assert!(
                approx_vec(coords.position(), position),
                "round trip failed for {position:?} -> {target:?}: {:?}",
                coords.position()
            );
        }
    }

    #[test]
    fn test_position_at_origin_angles() {
        let coords = SphericalCoords::new(0.0, 0.0, 5.0, Vec3::ZERO);
        assert!(approx_vec(coords.position(), Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = SphericalCoords::new(0.0, 0.0, 1.0, Vec3::ZERO);
        let b = SphericalCoords::new(1.0, 0.5, 3.0, Vec3::ONE);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);

        let mid = a.lerp(&b, 0.5);
        assert!(approx_eq(mid.radius, 2.0));
        assert!(approx_vec(mid.target, Vec3::splat(0.5)));
    }

    #[test]
    fn test_desired_beta_clamped() {
        let mut state = default_state();
        state.set_desired_beta(10.0);
        assert!(approx_eq(state.desired().beta, std::f32::consts::FRAC_PI_2));
        state.add_beta(-20.0);
        assert!(approx_eq(state.desired().beta, -std::f32::consts::FRAC_PI_2));
    }

    #[test]
    fn test_desired_radius_clamped() {
        let mut state = default_state();
        state.add_radius(1000.0);
        assert_eq!(state.desired().radius, 30.0);
        state.set_desired_radius(-4.0);
        assert_eq!(state.desired().radius, 0.1);
    }

    #[test]
    fn test_initial_values_clamped() {
        let config = OrbitConfig {
            initial_radius: 100.0,
            initial_beta: 3.0,
            ..Default::default()
        };
        let state = SphericalCameraState::from_config(&config);
        assert_eq!(state.current().radius, 30.0);
        assert!(state.current().beta <= std::f32::consts::FRAC_PI_2 + EPSILON);
        assert!(state.is_at_rest());
    }

    #[test]
    fn test_zoom_norm_range() {
        let mut state = default_state();
        state.set_desired_radius(0.1);
        assert!(approx_eq(state.zoom_norm(), 0.1));
        state.set_desired_radius(30.0);
        assert!(approx_eq(state.zoom_norm(), 1.0));
        state.set_desired_radius(5.0);
        assert!(approx_eq(state.zoom_norm(), 0.247_49));
    }

    #[test]
    fn test_step_fixed_point() {
        let mut state = default_state();
        let before = *state.current();
        for _ in 0..10 {
            state.step(0.12);
        }
        assert_eq!(*state.current(), before);
        assert!(state.is_at_rest());
    }

    #[test]
    fn test_step_converges() {
        let mut state = default_state();
        state.set_desired_radius(10.0);
        state.set_desired_target(Vec3::new(1.0, 0.0, 0.0));

        let first = state.step(0.5);
        assert!(approx_eq(first.radius, 7.5));

        for _ in 0..60 {
            state.step(0.5);
        }
        assert!(approx_eq(state.current().radius, 10.0));
        assert!(approx_vec(state.current().target, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_full_dampening_snaps() {
        let mut state = default_state();
        state.set_desired_alpha(2.0);
        state.step(1.0);
        assert!(approx_eq(state.current().alpha, 2.0));
    }
}
