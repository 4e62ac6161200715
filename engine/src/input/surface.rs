//! Input Surface
//!
//! The injectable source of input events. Listeners subscribe to a surface
//! instead of to a global window, so camera controls can be driven by a
//! windowing backend in production and by hand in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::event::{InputEvent, InputResponse};

/// Receives input events from a surface.
pub trait InputListener {
    fn handle_input(&mut self, event: &InputEvent) -> InputResponse;
}

/// Identifies one subscription on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Capability to subscribe to input events.
///
/// Surfaces hold listeners weakly: dropping a listener ends its
/// subscription without an explicit `remove_listener`.
pub trait InputSurface {
    fn add_listener(&mut self, listener: Weak<RefCell<dyn InputListener>>) -> ListenerId;

    /// Returns `false` if `id` was not subscribed.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// Subscribe a shared listener to `surface`.
pub fn listen<L: InputListener + 'static>(
    surface: &mut dyn InputSurface,
    listener: &Rc<RefCell<L>>,
) -> ListenerId {
    let listener: Rc<RefCell<dyn InputListener>> = listener.clone();
    surface.add_listener(Rc::downgrade(&listener))
}

/// In-process input surface that fans events out to its listeners in
/// subscription order.
#[derive(Default)]
pub struct InputHub {
    listeners: Vec<(ListenerId, Weak<RefCell<dyn InputListener>>)>,
    next_id: u64,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live listener.
    ///
    /// Returns `true` if any listener consumed the event, meaning the
    /// platform's default action should be suppressed. A listener that is
    /// already borrowed (re-entrant dispatch) is skipped.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        self.listeners.retain(|(_, listener)| listener.strong_count() > 0);

        let mut consumed = false;
        for (id, listener) in &self.listeners {
            let Some(listener) = listener.upgrade() else {
                continue;
            };
            match listener.try_borrow_mut() {
                Ok(mut listener) => {
                    consumed |= listener.handle_input(event).is_consumed();
                }
                Err(_) => log::trace!("input listener {:?} busy, skipping {:?}", id, event),
            }
        }
        consumed
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.strong_count() > 0)
            .count()
    }
}

impl InputSurface for InputHub {
    fn add_listener(&mut self, listener: Weak<RefCell<dyn InputListener>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl std::fmt::Debug for InputHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
