//! Track Animation
//!
//! Scripted camera playback layered over an [`OrbitController`]. An
//! animation callback runs on a fixed interval and drives the controller's
//! desired state. User input suspends playback, and a debounced resume
//! timer restarts it once the input goes quiet.
//!
//! ```text
//!  Idle ──start()──▶ Running ◀──resume timer── Paused
//!   ▲                  │  ▲                      ▲
//!   └────stop()────────┘  └──────pause()/input───┘
//! ```
//!
//! Input rules while an interval is live and pausing on input is enabled:
//! - press (pointer down, touch start, control key down): pause and hold;
//!   any pending resume is cancelled
//! - drag (pointer or touch move while pressed), wheel, release (pointer
//!   up, touch end): pause and (re)arm the resume timer
//! - key up: arm the resume timer once no W/A/S/D key is held
//!
//! Timers are cooperative: the host calls [`TrackAnimation::poll`] every
//! frame and due timers fire there, in deadline order.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;

use super::config::TrackSettings;
use super::orbit_controller::{OrbitController, TrackStatus};
use crate::input::{InputEvent, InputListener, InputResponse, KeyState};
use crate::timer::{Clock, TimerSlot};

/// Callback invoked on every animation tick while running.
pub type AnimationLogic = Box<dyn FnMut(&mut OrbitController)>;

/// Playback state of a [`TrackAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// How an input event affects playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputEffect {
    None,
    /// Pause and cancel any pending resume.
    Hold,
    /// Pause and (re)arm the resume timer.
    Release,
}

/// Timer-driven animation overlay for an orbit controller.
pub struct TrackAnimation {
    controller: Rc<RefCell<OrbitController>>,
    clock: Rc<dyn Clock>,
    settings: TrackSettings,
    logic: Option<AnimationLogic>,
    state: AnimationState,
    interval: TimerSlot,
    resume: TimerSlot,
    keys: KeyState,
    dragging: bool,
}

impl TrackAnimation {
    pub fn new(controller: Rc<RefCell<OrbitController>>, clock: Rc<dyn Clock>) -> Self {
        Self {
            controller,
            clock,
            settings: TrackSettings::default(),
            logic: None,
            state: AnimationState::Idle,
            interval: TimerSlot::new(),
            resume: TimerSlot::new(),
            keys: KeyState::new(),
            dragging: false,
        }
    }

    /// Install the animation callback and its settings.
    ///
    /// Takes effect on the next `start()`. Invalid settings are logged and
    /// used as given.
    pub fn set_animation_logic<F>(&mut self, settings: TrackSettings, logic: F)
    where
        F: FnMut(&mut OrbitController) + 'static,
    {
        if let Err(err) = settings.validate() {
            log::warn!("track animation settings invalid: {}", err);
        }
        self.settings = settings;
        self.logic = Some(Box::new(logic));
    }

    pub fn settings(&self) -> &TrackSettings {
        &self.settings
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn controller(&self) -> &Rc<RefCell<OrbitController>> {
        &self.controller
    }

    /// Whether the animation interval is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.interval.is_armed()
    }

    /// Whether a resume is pending.
    pub fn resume_pending(&self) -> bool {
        self.resume.is_armed()
    }

    /// Restart playback from scratch.
    ///
    /// Without an installed callback the state becomes `Running` but
    /// nothing is scheduled.
    pub fn start(&mut self) {
        self.stop();
        self.state = AnimationState::Running;
        if self.logic.is_none() {
            log::debug!("track animation started without logic");
            return;
        }

        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                if let Some(radius) = self.settings.initial_radius {
                    controller.state_mut().set_desired_radius(radius);
                }
                if let Some(target) = self.settings.initial_target {
                    controller.set_camera_target(target);
                }
            }
            Err(_) => log::warn!("orbit controller busy, start did not seed radius/target"),
        }

        self.interval
            .arm_every(self.clock.now(), self.settings.interval());
        log::debug!(
            "track animation started, ticking every {:?}",
            self.settings.interval()
        );
    }

    /// Suspend ticks. Only affects a running animation.
    pub fn pause(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Paused;
            log::debug!("track animation paused");
        }
    }

    /// Cancel the interval and any pending resume.
    pub fn stop(&mut self) {
        let ticking = self.interval.cancel();
        let resuming = self.resume.cancel();
        if self.state != AnimationState::Idle || ticking || resuming {
            log::debug!("track animation stopped");
        }
        self.state = AnimationState::Idle;
    }

    /// Fire every timer due at the clock's current time.
    ///
    /// A repeating tick fires at most once per poll; ticks missed during a
    /// stall are dropped. Returns the number of firings.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        loop {
            match (self.interval.due(now), self.resume.due(now)) {
                (None, None) => break,
                (Some(tick), Some(resume)) if resume <= tick => self.fire_resume(now),
                (Some(_), _) => self.fire_tick(now),
                (None, Some(_)) => self.fire_resume(now),
            }
            fired += 1;
        }
        fired
    }

    pub fn status(&self) -> Option<TrackStatus> {
        self.controller
            .try_borrow()
            .ok()
            .map(|controller| controller.status())
    }

    /// Move the camera and orbit around `target` (or the current desired
    /// target). See [`OrbitController::place_camera`].
    pub fn place_camera(&self, position: Vec3, target: Option<Vec3>) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.place_camera(position, target),
            Err(_) => log::warn!("orbit controller busy, place_camera ignored"),
        }
    }

    fn fire_tick(&mut self, now: Duration) {
        self.interval.fire(now);
        if self.state != AnimationState::Running {
            return;
        }
        let Some(logic) = self.logic.as_mut() else {
            return;
        };
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => logic(&mut controller),
            Err(_) => log::trace!("orbit controller busy, animation tick skipped"),
        }
    }

    fn fire_resume(&mut self, now: Duration) {
        self.resume.fire(now);
        if let Some(target) = self.settings.initial_target {
            match self.controller.try_borrow_mut() {
                Ok(mut controller) => controller.set_camera_target(target),
                Err(_) => log::warn!("orbit controller busy, resume target not restored"),
            }
        }
        if self.state == AnimationState::Paused {
            self.state = AnimationState::Running;
            log::debug!("track animation resumed");
        }
    }

    /// Update key/drag tracking and classify `event`.
    fn classify(&mut self, event: &InputEvent) -> InputEffect {
        match event {
            InputEvent::PointerDown { .. } => {
                self.dragging = true;
                InputEffect::Hold
            }
            InputEvent::TouchStart { touches } => {
                self.dragging = !touches.is_empty();
                InputEffect::Hold
            }
            InputEvent::PointerMove { .. } | InputEvent::TouchMove { .. } => {
                if self.dragging {
                    InputEffect::Release
                } else {
                    InputEffect::None
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::TouchEnd { .. } => {
                self.dragging = false;
                InputEffect::Release
            }
            InputEvent::Wheel { .. } => InputEffect::Release,
            InputEvent::KeyDown(key) => {
                if self.keys.handle_key(*key, true) {
                    InputEffect::Hold
                } else {
                    InputEffect::None
                }
            }
            InputEvent::KeyUp(key) => {
                if self.keys.handle_key(*key, false) && !self.keys.any_movement_pressed() {
                    InputEffect::Release
                } else {
                    InputEffect::None
                }
            }
            InputEvent::ContextMenu | InputEvent::DragOver => InputEffect::None,
        }
    }

    fn keyboard_enabled(&self) -> bool {
        self.controller
            .try_borrow()
            .map(|controller| controller.config().enable_keyboard_controls)
            .unwrap_or(true)
    }
}

impl InputListener for TrackAnimation {
    /// Observes input for pausing; never consumes it.
    fn handle_input(&mut self, event: &InputEvent) -> InputResponse {
        if event.is_keyboard() && !self.keyboard_enabled() {
            return InputResponse::Ignored;
        }
        let effect = self.classify(event);
        if effect == InputEffect::None
            || !self.settings.should_pause_animation_on_input
            || !self.interval.is_armed()
        {
            return InputResponse::Ignored;
        }

        self.pause();
        match effect {
            InputEffect::Hold => {
                if self.resume.cancel() {
                    log::trace!("resume deferred until input is released");
                }
            }
            InputEffect::Release => {
                let now = self.clock.now();
                self.resume.arm_once(now, self.settings.pause_period());
                log::trace!("resume armed for {:?}", now + self.settings.pause_period());
            }
            InputEffect::None => {}
        }
        InputResponse::Ignored
    }
}

impl std::fmt::Debug for TrackAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackAnimation")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("interval", &self.interval)
            .field("resume", &self.resume)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::config::OrbitConfig;
    use crate::camera::rig::Camera;
    use crate::input::{KeyCode, MouseButton, Position};
    use crate::timer::ManualClock;
    use std::cell::Cell;
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    struct Fixture {
        clock: Rc<ManualClock>,
        track: TrackAnimation,
        ticks: Rc<Cell<u32>>,
        _camera: Rc<RefCell<Camera>>,
    }

    fn fixture(settings: TrackSettings) -> Fixture {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let controller = Rc::new(RefCell::new(OrbitController::new(OrbitConfig::default())));
        OrbitController::attach(&controller, &camera);

        let clock = Rc::new(ManualClock::new());
        let mut track = TrackAnimation::new(controller, clock.clone());
        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();
        track.set_animation_logic(settings, move |controller| {
            counter.set(counter.get() + 1);
            controller.state_mut().add_alpha(0.01);
        });
        Fixture {
            clock,
            track,
            ticks,
            _camera: camera,
        }
    }

    fn settings() -> TrackSettings {
        TrackSettings {
            animation_logic_interval: 100,
            ..Default::default()
        }
    }

    fn pointer_down() -> InputEvent {
        InputEvent::PointerDown {
            button: MouseButton::Left,
            position: Position::new(10.0, 10.0),
        }
    }

    fn pointer_up() -> InputEvent {
        InputEvent::PointerUp {
            button: MouseButton::Left,
            position: Position::new(20.0, 10.0),
        }
    }

    #[test]
    fn test_start_ticks_on_interval() {
        let mut f = fixture(settings());
        f.track.start();
        assert_eq!(f.track.state(), AnimationState::Running);

        f.clock.advance(ms(99));
        f.track.poll();
        assert_eq!(f.ticks.get(), 0);

        f.clock.advance(ms(1));
        f.track.poll();
        assert_eq!(f.ticks.get(), 1);

        f.clock.advance(ms(100));
        assert_eq!(f.track.poll(), 1);
        assert_eq!(f.ticks.get(), 2);
    }

    #[test]
    fn test_stall_fires_one_tick() {
        let mut f = fixture(settings());
        f.track.start();
        let alpha = f.track.controller().borrow().desired().alpha;

        f.clock.advance(Duration::from_secs(60));
        assert_eq!(f.track.poll(), 1);
        assert_eq!(f.ticks.get(), 1);
        let moved = f.track.controller().borrow().desired().alpha - alpha;
        assert!((moved - 0.01).abs() < 1e-5);

        // Ticking picks up one interval after the stalled frame.
        f.clock.advance(ms(99));
        assert_eq!(f.track.poll(), 0);
        f.clock.advance(ms(1));
        assert_eq!(f.track.poll(), 1);
        assert_eq!(f.ticks.get(), 2);
    }

    #[test]
    fn test_start_twice_does_not_duplicate_ticks() {
        let mut f = fixture(settings());
        f.track.start();
        f.track.start();

        f.clock.advance(ms(100));
        f.track.poll();
        assert_eq!(f.ticks.get(), 1);
    }

    #[test]
    fn test_start_without_logic_schedules_nothing() {
        let controller = Rc::new(RefCell::new(OrbitController::new(OrbitConfig::default())));
        let clock = Rc::new(ManualClock::new());
        let mut track = TrackAnimation::new(controller, clock.clone());

        track.start();
        assert_eq!(track.state(), AnimationState::Running);
        assert!(!track.is_ticking());
    }

    #[test]
    fn test_paused_ticks_are_skipped() {
        let mut f = fixture(settings());
        f.track.start();
        f.track.pause();

        for _ in 0..5 {
            f.clock.advance(ms(100));
            assert_eq!(f.track.poll(), 1);
        }
        assert_eq!(f.ticks.get(), 0);
        assert!(f.track.is_ticking());
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut f = fixture(settings());
        f.track.pause();
        assert_eq!(f.track.state(), AnimationState::Idle);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut f = fixture(settings());
        f.track.stop();
        assert_eq!(f.track.state(), AnimationState::Idle);

        f.track.start();
        f.track.stop();
        f.track.stop();
        assert!(!f.track.is_ticking());
        f.clock.advance(ms(1000));
        assert_eq!(f.track.poll(), 0);
    }

    #[test]
    fn test_drag_pauses_until_quiet_period() {
        let mut f = fixture(settings());
        f.track.start();

        f.track.handle_input(&pointer_down());
        assert_eq!(f.track.state(), AnimationState::Paused);
        assert!(!f.track.resume_pending());

        f.track.handle_input(&InputEvent::PointerMove {
            position: Position::new(15.0, 10.0),
        });
        f.track.handle_input(&pointer_up());
        assert!(f.track.resume_pending());

        f.clock.advance(ms(2999));
        f.track.poll();
        assert_eq!(f.track.state(), AnimationState::Paused);

        f.clock.advance(ms(1));
        f.track.poll();
        assert_eq!(f.track.state(), AnimationState::Running);
    }

    #[test]
    fn test_repeated_wheel_debounces_resume() {
        let mut f = fixture(settings());
        f.track.start();

        for _ in 0..3 {
            f.track.handle_input(&InputEvent::Wheel { delta_y: 10.0 });
            f.clock.advance(ms(1000));
            f.track.poll();
        }
        assert_eq!(f.track.state(), AnimationState::Paused);

        // Last wheel event was at 2000 ms.
        f.clock.set(ms(4999));
        f.track.poll();
        assert_eq!(f.track.state(), AnimationState::Paused);
        f.clock.set(ms(5000));
        f.track.poll();
        assert_eq!(f.track.state(), AnimationState::Running);
    }

    #[test]
    fn test_stop_cancels_pending_resume() {
        let mut f = fixture(settings());
        f.track.start();
        f.track.handle_input(&InputEvent::Wheel { delta_y: 1.0 });
        assert!(f.track.resume_pending());

        f.track.stop();
        assert!(!f.track.resume_pending());
        f.clock.advance(ms(5000));
        f.track.poll();
        assert_eq!(f.track.state(), AnimationState::Idle);
    }

    #[test]
    fn test_keys_resume_after_last_movement_key() {
        let mut f = fixture(settings());
        f.track.start();

        f.track.handle_input(&InputEvent::KeyDown(KeyCode::W));
        f.track.handle_input(&InputEvent::KeyDown(KeyCode::D));
        assert_eq!(f.track.state(), AnimationState::Paused);

        f.track.handle_input(&InputEvent::KeyUp(KeyCode::W));
        assert!(!f.track.resume_pending());

        f.track.handle_input(&InputEvent::KeyUp(KeyCode::D));
        assert!(f.track.resume_pending());
    }

    #[test]
    fn test_input_ignored_when_pausing_disabled() {
        let mut f = fixture(TrackSettings {
            should_pause_animation_on_input: false,
            ..settings()
        });
        f.track.start();
        f.track.handle_input(&pointer_down());
        assert_eq!(f.track.state(), AnimationState::Running);
    }

    #[test]
    fn test_input_ignored_when_not_ticking() {
        let mut f = fixture(settings());
        let response = f.track.handle_input(&InputEvent::Wheel { delta_y: 1.0 });
        assert_eq!(response, InputResponse::Ignored);
        assert!(!f.track.resume_pending());
    }

    #[test]
    fn test_start_seeds_radius_and_target() {
        let mut f = fixture(TrackSettings {
            initial_radius: Some(9.0),
            initial_target: Some(Vec3::new(0.0, 0.0, 4.0)),
            ..settings()
        });
        f.track.start();

        let status = f.track.status().unwrap();
        assert_eq!(status.desired_target, Vec3::new(0.0, 0.0, 4.0));
        // set_camera_target derives radius from the camera position, at the origin.
        assert!((status.desired_radius - 4.0).abs() < 1e-5);
    }
}
