use std::cell::Cell;
use std::rc::Rc;

use tether_core::{Signal, SubId, signal};

use crate::Update;

/// Boolean state with toggle/set/reset helpers.
///
/// Cloning yields another handle to the same state.
///
/// ```rust
/// use tether_hooks::Toggle;
///
/// let open = Toggle::new(false);
/// open.toggle();
/// assert!(open.value());
/// open.reset();
/// assert!(!open.value());
/// ```
#[derive(Clone)]
pub struct Toggle {
    value: Signal<bool>,
    default_value: Rc<Cell<bool>>,
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for Toggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toggle")
            .field("value", &self.value())
            .field("default_value", &self.default_value())
            .finish()
    }
}

impl Toggle {
    pub fn new(default_value: bool) -> Self {
        Self {
            value: signal(default_value),
            default_value: Rc::new(Cell::new(default_value)),
        }
    }

    pub fn value(&self) -> bool {
        self.value.get()
    }

    pub fn default_value(&self) -> bool {
        self.default_value.get()
    }

    /// Writes a literal or the result of an updater. Subscribers hear about
    /// it only if the value actually flipped.
    pub fn set_value(&self, next: impl Into<Update<bool>>) {
        let next = next.into().apply(self.value());
        self.value.replace_if_changed(next);
    }

    pub fn toggle(&self) {
        self.set_value(Update::with(|prev: bool| !prev));
    }

    pub fn set_true(&self) {
        self.set_value(true);
    }

    pub fn set_false(&self) {
        self.set_value(false);
    }

    pub fn reset(&self) {
        self.set_value(self.default_value());
    }

    /// Tracks a changed construction argument. The current value is left
    /// alone; only later `reset` calls see the new default.
    pub fn sync_default(&self, default_value: bool) {
        if self.default_value.replace(default_value) != default_value {
            log::trace!("toggle: default is now {default_value}");
        }
    }

    pub fn subscribe(&self, f: impl Fn(bool) + 'static) -> SubId {
        self.value.subscribe(move |v| f(*v))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.value.unsubscribe(id)
    }

    pub fn signal(&self) -> &Signal<bool> {
        &self.value
    }
}
