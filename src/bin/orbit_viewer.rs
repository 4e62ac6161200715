//! Orbit Viewer
//!
//! Run with: `cargo run --bin orbit_viewer [orbit.json] [track.json]`
//!
//! Opens a window and drives the orbit controller from winit input. There
//! is no renderer: the camera pose and desired orbit state are shown in the
//! window title and logged at debug level (`RUST_LOG=debug`).
//!
//! Controls:
//! - Left-drag / one finger: orbit
//! - Right-drag / two fingers: pan
//! - Scroll / pinch: zoom
//! - WASD or arrows: move target, Q/E: yaw, R/F: pitch
//! - Space: start/stop the track animation
//! - ESC: Exit

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use orbit_track_engine::camera::{
    AnimationState, Camera, OrbitConfig, OrbitController, TrackAnimation, TrackSettings,
};
use orbit_track_engine::input::{InputEvent, InputHub, KeyCode, MouseButton, Position, listen};
use orbit_track_engine::timer::SystemClock;

/// Pixels per scroll line, for wheels that report whole lines.
const LINE_HEIGHT: f32 = 100.0;
/// How often the title is refreshed.
const TITLE_PERIOD: Duration = Duration::from_millis(250);
/// Yaw added per animation tick by the demo track.
const TRACK_YAW_STEP: f32 = 0.004;

// ============================================================================
// INPUT TRANSLATION
// ============================================================================

fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        _ => KeyCode::Other,
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

// ============================================================================
// VIEWER STATE
// ============================================================================

struct Viewer {
    window: Window,
    camera: Rc<RefCell<Camera>>,
    controller: Rc<RefCell<OrbitController>>,
    track: Rc<RefCell<TrackAnimation>>,
    hub: InputHub,
    cursor: Position,
    /// Active touch contacts by finger id
    touches: BTreeMap<u64, Position>,
    last_title: Instant,
}

impl Viewer {
    fn new(window: Window, config: OrbitConfig, settings: TrackSettings) -> Self {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let controller = Rc::new(RefCell::new(OrbitController::new(config)));
        OrbitController::attach(&controller, &camera);

        let mut track = TrackAnimation::new(controller.clone(), Rc::new(SystemClock::new()));
        track.set_animation_logic(settings, |orbit| {
            orbit.state_mut().add_alpha(TRACK_YAW_STEP);
        });
        let track = Rc::new(RefCell::new(track));

        let mut hub = InputHub::new();
        listen(&mut hub, &controller);
        listen(&mut hub, &track);

        Self {
            window,
            camera,
            controller,
            track,
            hub,
            cursor: Position::zero(),
            touches: BTreeMap::new(),
            last_title: Instant::now(),
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        let consumed = self.hub.dispatch(&event);
        log::trace!("{:?} consumed={}", event, consumed);
    }

    fn touch_list(&self) -> Vec<Position> {
        self.touches.values().copied().collect()
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Position) {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, position);
                let touches = self.touch_list();
                self.dispatch(InputEvent::TouchStart { touches });
            }
            TouchPhase::Moved => {
                self.touches.insert(id, position);
                let touches = self.touch_list();
                self.dispatch(InputEvent::TouchMove { touches });
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                let touches = self.touch_list();
                self.dispatch(InputEvent::TouchEnd { touches });
            }
        }
    }

    fn toggle_track(&mut self) {
        let mut track = self.track.borrow_mut();
        if track.state() == AnimationState::Idle {
            track.start();
            log::info!("track animation started");
        } else {
            track.stop();
            log::info!("track animation stopped");
        }
    }

    fn frame(&mut self) {
        self.track.borrow_mut().poll();
        let pose = self.controller.borrow_mut().update();

        if let Some(pose) = pose {
            log::debug!("camera at {:?} facing {:?}", pose.position, pose.rotation * glam::Vec3::Z);
        }

        if self.last_title.elapsed() >= TITLE_PERIOD {
            self.last_title = Instant::now();
            self.refresh_title();
        }
    }

    fn refresh_title(&self) {
        let view = self.camera.borrow().forward();
        let track = self.track.borrow();
        let Some(status) = track.status() else {
            return;
        };
        self.window.set_title(&format!(
            "Orbit Viewer [{:?}] alpha {:.2} beta {:.2} radius {:.2} target ({:.2}, {:.2}, {:.2}) view ({:.2}, {:.2}, {:.2})",
            track.state(),
            status.desired_alpha,
            status.desired_beta,
            status.desired_radius,
            status.desired_target.x,
            status.desired_target.y,
            status.desired_target.z,
            view.x,
            view.y,
            view.z,
        ));
    }
}

// ============================================================================
// APPLICATION HANDLER
// ============================================================================

struct App {
    config: OrbitConfig,
    settings: TrackSettings,
    viewer: Option<Viewer>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Orbit Viewer")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        log::info!("viewer ready; left-drag orbits, right-drag pans, space toggles the track");
        window.request_redraw();
        self.viewer = Some(Viewer::new(
            window,
            self.config.clone(),
            self.settings.clone(),
        ));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;

                if key == WinitKey::Escape && pressed {
                    event_loop.exit();
                    return;
                }
                if key == WinitKey::Space && pressed && !repeat {
                    viewer.toggle_track();
                    return;
                }

                let key = map_key(key);
                if pressed {
                    viewer.dispatch(InputEvent::KeyDown(key));
                } else {
                    viewer.dispatch(InputEvent::KeyUp(key));
                }
            }
            WindowEvent::MouseInput {
                button, state: btn_state, ..
            } => {
                let button = map_button(button);
                let position = viewer.cursor;
                if btn_state == ElementState::Pressed {
                    viewer.dispatch(InputEvent::PointerDown { button, position });
                } else {
                    viewer.dispatch(InputEvent::PointerUp { button, position });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                viewer.cursor = Position::new(position.x as f32, position.y as f32);
                let position = viewer.cursor;
                viewer.dispatch(InputEvent::PointerMove { position });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                viewer.dispatch(InputEvent::Wheel { delta_y });
            }
            WindowEvent::Touch(touch) => {
                let position = Position::new(touch.location.x as f32, touch.location.y as f32);
                viewer.handle_touch(touch.id, touch.phase, position);
            }
            WindowEvent::DroppedFile(_) | WindowEvent::HoveredFile(_) => {
                viewer.dispatch(InputEvent::DragOver);
            }
            WindowEvent::RedrawRequested => {
                viewer.frame();
                viewer.window.request_redraw();
            }
            _ => {}
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => OrbitConfig::load(Path::new(&path))?,
        None => OrbitConfig::default(),
    };
    let settings = match args.next() {
        Some(path) => TrackSettings::load(Path::new(&path))?,
        None => TrackSettings::default(),
    };
    log::info!("orbit config: {:?}", config);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config,
        settings,
        viewer: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
