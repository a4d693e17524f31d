use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;
use crate::schedule;

thread_local! {
    static CURRENT_COMPOSER: RefCell<Option<Rc<RefCell<Composer>>>> = const { RefCell::new(None) };
}

/// Identity-preserving storage for one host.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    pub invalidator: Invalidator,
}

/// Marks one host as needing another pass. Clones share the same flag, so a
/// subscriber can hold one past the pass that created it.
#[derive(Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn invalidate(&self) {
        self.0.set(true);
    }

    pub fn is_invalidated(&self) -> bool {
        self.0.get()
    }

    /// Reads and clears the flag.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl std::fmt::Debug for Invalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Invalidator").field(&self.0.get()).finish()
    }
}

/// Installs a composer (and its scope) for the duration of one pass.
struct ComposeGuard {
    prev: Option<Rc<RefCell<Composer>>>,
}

impl ComposeGuard {
    fn begin(composer: &Rc<RefCell<Composer>>) -> Self {
        composer.borrow_mut().cursor = 0;
        let prev = CURRENT_COMPOSER.with(|c| c.borrow_mut().replace(composer.clone()));
        ComposeGuard { prev }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT_COMPOSER.with(|c| *c.borrow_mut() = prev);
    }
}

/// A mounted component tree: storage that survives between passes plus the
/// root scope that owns every cleanup registered while composing.
///
/// ```rust
/// use tether_core::*;
///
/// let mut host = Host::new();
/// let shown = host.compose(|| {
///     let n = remember_with_key("n", || signal(1));
///     n.get()
/// });
/// assert_eq!(shown, 1);
/// host.unmount();
/// ```
pub struct Host {
    composer: Rc<RefCell<Composer>>,
    scope: Scope,
    passes: u64,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self {
            composer: Rc::new(RefCell::new(Composer::default())),
            scope: Scope::new(),
            passes: 0,
        }
    }

    /// One render pass: runs `build` against this host's storage and root
    /// scope, then runs the post-commit tasks it produced, in order.
    pub fn compose<R>(&mut self, build: impl FnOnce() -> R) -> R {
        // a pass satisfies any pending request
        self.invalidator().take();
        self.passes += 1;
        log::trace!("host: compose pass {}", self.passes);

        // the guard is gone before the batch flushes post-commit tasks
        schedule::batch(|| {
            let _guard = ComposeGuard::begin(&self.composer);
            self.scope.run(build)
        })
    }

    /// Whether something changed since the last pass.
    pub fn needs_recompose(&self) -> bool {
        self.invalidator().is_invalidated()
    }

    /// Handle to this host's recompose flag.
    pub fn invalidator(&self) -> Invalidator {
        self.composer.borrow().invalidator.clone()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Tears the tree down: every registered cleanup runs once, then the
    /// stored state is released.
    pub fn unmount(self) {
        // Drop does the work
    }

    fn teardown(&mut self) {
        if self.scope.is_disposed() {
            return;
        }
        log::debug!("host: unmount after {} passes", self.passes);
        schedule::batch(|| self.scope.dispose());
        let (slots, keyed) = {
            let mut c = self.composer.borrow_mut();
            (
                std::mem::take(&mut c.slots),
                std::mem::take(&mut c.keyed_slots),
            )
        };
        // stored values may have drop glue of their own
        drop(slots);
        drop(keyed);
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn current_composer() -> Option<Rc<RefCell<Composer>>> {
    CURRENT_COMPOSER.with(|c| c.borrow().clone())
}

/// Recompose handle of the host currently composing, if any.
pub fn invalidator() -> Option<Invalidator> {
    current_composer().map(|c| c.borrow().invalidator.clone())
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let Some(composer) = current_composer() else {
        log::warn!("remember: called outside Host::compose; value will not persist");
        return Rc::new(init());
    };
    let cursor = {
        let mut c = composer.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        if let Some(rc) = c.slots.get(cursor).and_then(|s| s.downcast_ref::<Rc<T>>()) {
            return rc.clone();
        }
        if cursor < c.slots.len() {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
        }
        cursor
    };

    let rc: Rc<T> = Rc::new(init());
    let mut c = composer.borrow_mut();
    if cursor < c.slots.len() {
        c.slots[cursor] = Box::new(rc.clone());
    } else {
        c.slots.push(Box::new(rc.clone()));
    }
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let Some(composer) = current_composer() else {
        log::warn!("remember_with_key: '{key}' used outside Host::compose; value will not persist");
        return Rc::new(init());
    };

    if let Some(existing) = composer.borrow().keyed_slots.get(&key) {
        if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
            return rc.clone();
        }
        log::warn!("remember_with_key: key '{key}' reused with a different type; replacing.");
    }

    // init may itself remember; keep the composer unborrowed while it runs
    let rc: Rc<T> = Rc::new(init());
    composer
        .borrow_mut()
        .keyed_slots
        .insert(key, Box::new(rc.clone()));
    rc
}
