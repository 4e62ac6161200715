//! Input Normalizer
//!
//! Turns pointer, wheel and touch events into device-independent camera
//! intents: yaw/pitch deltas, a pan along the camera's right/up axes, and a
//! radius delta. Pan and zoom are scaled by the zoom normalisation so they
//! feel the same at every orbit distance.
//!
//! Controls:
//! - Primary mouse drag / one finger: orbit
//! - Secondary (right) mouse drag / two fingers: pan
//! - Wheel / pinch: zoom

use glam::Vec2;

use super::config::OrbitConfig;
use crate::input::{InputEvent, Position};

/// Radians of orbit per pixel at `orbit_speed = 1`.
const ORBIT_FACTOR: f32 = 0.003;
/// World units of pan per pixel of mouse drag, before zoom normalisation.
const MOUSE_PAN_FACTOR: f32 = 0.01;
/// World units of pan per pixel of two-finger drag, before zoom normalisation.
const TOUCH_PAN_FACTOR: f32 = 0.025;
/// Radius change per wheel delta unit, before zoom normalisation.
const WHEEL_ZOOM_FACTOR: f32 = 0.025;
/// Radius change per pixel of pinch, before zoom normalisation.
const PINCH_ZOOM_FACTOR: f32 = 0.1;

/// Changes to apply to the desired orbit state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraIntent {
    /// Change in alpha (x) and beta (y), radians
    pub orbit: Vec2,
    /// Target offset along the camera's local right (x) and up (y) axes
    pub pan: Vec2,
    /// Change in radius
    pub zoom: f32,
}

impl CameraIntent {
    pub fn is_empty(&self) -> bool {
        self.orbit == Vec2::ZERO && self.pan == Vec2::ZERO && self.zoom == 0.0
    }
}

/// Drag tracking for pointer and touch gestures.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputNormalizer {
    dragging: bool,
    panning: bool,
    last: Position,
    last_pinch_distance: f32,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pointer or touch drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the current drag pans rather than orbits.
    pub fn is_panning(&self) -> bool {
        self.dragging && self.panning
    }

    /// Forget any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update drag state from `event` and return the resulting intent.
    ///
    /// `zoom_norm` is the zoom normalisation of the desired radius at the
    /// time of the event. Keyboard events are not handled here.
    pub fn normalize(
        &mut self,
        event: &InputEvent,
        config: &OrbitConfig,
        zoom_norm: f32,
    ) -> CameraIntent {
        match event {
            InputEvent::PointerDown { button, position } => {
                self.dragging = true;
                self.panning = button.pans();
                self.last = *position;
                CameraIntent::default()
            }
            InputEvent::PointerUp { .. } | InputEvent::TouchEnd { .. } => {
                self.dragging = false;
                self.panning = false;
                CameraIntent::default()
            }
            InputEvent::PointerMove { position } => {
                if !self.dragging {
                    return CameraIntent::default();
                }
                let (dx, dy) = position.delta_from(&self.last);
                self.last = *position;

                if self.panning {
                    let scale = config.pan_speed * MOUSE_PAN_FACTOR * zoom_norm;
                    CameraIntent {
                        pan: Vec2::new(-dx * scale, -dy * scale),
                        ..Default::default()
                    }
                } else {
                    orbit_intent(dx, dy, config)
                }
            }
            InputEvent::Wheel { delta_y } => CameraIntent {
                zoom: delta_y * config.zoom_speed * WHEEL_ZOOM_FACTOR * zoom_norm,
                ..Default::default()
            },
            InputEvent::TouchStart { touches } => {
                match touches.as_slice() {
                    [single] => {
                        self.dragging = true;
                        self.panning = false;
                        self.last = *single;
                        self.last_pinch_distance = 0.0;
                    }
                    [first, second] => {
                        self.dragging = true;
                        self.panning = true;
                        self.last = first.midpoint(second);
                        self.last_pinch_distance = first.distance(second);
                    }
                    _ => {}
                }
                CameraIntent::default()
            }
            InputEvent::TouchMove { touches } => {
                if !self.dragging {
                    return CameraIntent::default();
                }
                if self.panning {
                    let [first, second, ..] = touches.as_slice() else {
                        return CameraIntent::default();
                    };
                    let distance = first.distance(second);
                    let pinch = self.last_pinch_distance - distance;
                    self.last_pinch_distance = distance;

                    let center = first.midpoint(second);
                    let (dx, dy) = center.delta_from(&self.last);
                    self.last = center;

                    let scale = config.pan_speed * TOUCH_PAN_FACTOR * zoom_norm;
                    CameraIntent {
                        pan: Vec2::new(-dx * scale, -dy * scale),
                        zoom: pinch * config.zoom_speed * PINCH_ZOOM_FACTOR * zoom_norm,
                        ..Default::default()
                    }
                } else {
                    let Some(first) = touches.first() else {
                        return CameraIntent::default();
                    };
                    let (dx, dy) = first.delta_from(&self.last);
                    self.last = *first;
                    orbit_intent(dx, dy, config)
                }
            }
            InputEvent::KeyDown(_)
            | InputEvent::KeyUp(_)
            | InputEvent::ContextMenu
            | InputEvent::DragOver => CameraIntent::default(),
        }
    }
}

fn orbit_intent(dx: f32, dy: f32, config: &OrbitConfig) -> CameraIntent {
    let scale = config.orbit_speed * ORBIT_FACTOR;
    CameraIntent {
        orbit: Vec2::new(-dx * scale, dy * scale),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn down(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button,
            position: Position::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            position: Position::new(x, y),
        }
    }

    #[test]
    fn test_move_without_drag_is_empty() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        assert!(normalizer.normalize(&moved(50.0, 50.0), &config, 1.0).is_empty());
    }

    #[test]
    fn test_left_drag_orbits() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        normalizer.normalize(&down(MouseButton::Left, 100.0, 100.0), &config, 1.0);

        let intent = normalizer.normalize(&moved(110.0, 95.0), &config, 1.0);
        assert!(approx_eq(intent.orbit.x, -0.03));
        assert!(approx_eq(intent.orbit.y, -0.015));
        assert_eq!(intent.pan, Vec2::ZERO);

        // Deltas are relative to the previous move, not the press.
        let intent = normalizer.normalize(&moved(110.0, 95.0), &config, 1.0);
        assert!(intent.is_empty());
    }

    #[test]
    fn test_right_drag_pans_scaled_by_zoom_norm() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig {
            pan_speed: 2.0,
            ..Default::default()
        };
        normalizer.normalize(&down(MouseButton::Right, 0.0, 0.0), &config, 0.5);
        assert!(normalizer.is_panning());

        let intent = normalizer.normalize(&moved(10.0, -4.0), &config, 0.5);
        assert!(approx_eq(intent.pan.x, -10.0 * 2.0 * 0.01 * 0.5));
        assert!(approx_eq(intent.pan.y, 4.0 * 2.0 * 0.01 * 0.5));
        assert_eq!(intent.orbit, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_up_ends_drag() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        normalizer.normalize(&down(MouseButton::Left, 0.0, 0.0), &config, 1.0);
        normalizer.normalize(
            &InputEvent::PointerUp {
                button: MouseButton::Left,
                position: Position::zero(),
            },
            &config,
            1.0,
        );
        assert!(!normalizer.is_dragging());
        assert!(normalizer.normalize(&moved(40.0, 40.0), &config, 1.0).is_empty());
    }

    #[test]
    fn test_wheel_zoom() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        let intent = normalizer.normalize(&InputEvent::Wheel { delta_y: 100.0 }, &config, 0.25);
        assert!(approx_eq(intent.zoom, 100.0 * 0.025 * 0.25));
    }

    #[test]
    fn test_single_touch_orbits() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        normalizer.normalize(
            &InputEvent::TouchStart {
                touches: vec![Position::new(10.0, 10.0)],
            },
            &config,
            1.0,
        );
        let intent = normalizer.normalize(
            &InputEvent::TouchMove {
                touches: vec![Position::new(20.0, 30.0)],
            },
            &config,
            1.0,
        );
        assert!(approx_eq(intent.orbit.x, -0.03));
        assert!(approx_eq(intent.orbit.y, 0.06));
    }

    #[test]
    fn test_two_finger_pinch_and_pan() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        normalizer.normalize(
            &InputEvent::TouchStart {
                touches: vec![Position::new(0.0, 0.0), Position::new(100.0, 0.0)],
            },
            &config,
            1.0,
        );

        // Fingers spread by 20px and the centre moves 10px right.
        let intent = normalizer.normalize(
            &InputEvent::TouchMove {
                touches: vec![Position::new(0.0, 0.0), Position::new(120.0, 0.0)],
            },
            &config,
            1.0,
        );
        assert!(approx_eq(intent.zoom, -20.0 * 0.1));
        assert!(approx_eq(intent.pan.x, -10.0 * 0.025));
        assert!(approx_eq(intent.pan.y, 0.0));
    }

    #[test]
    fn test_two_finger_move_with_one_touch_is_ignored() {
        let mut normalizer = InputNormalizer::new();
        let config = OrbitConfig::default();
        normalizer.normalize(
            &InputEvent::TouchStart {
                touches: vec![Position::new(0.0, 0.0), Position::new(10.0, 0.0)],
            },
            &config,
            1.0,
        );
        let intent = normalizer.normalize(
            &InputEvent::TouchMove {
                touches: vec![Position::new(5.0, 5.0)],
            },
            &config,
            1.0,
        );
        assert!(intent.is_empty());
    }
}
