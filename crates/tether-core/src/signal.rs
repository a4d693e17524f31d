use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by [`Signal::subscribe`].
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Cloneable handle to an observable value.
///
/// Subscribers receive a copy of the value taken after the write, so they may
/// read or write the signal they are attached to. A write from a subscriber
/// notifies again, nested inside the current round.
pub struct Signal<T: 'static>(Rc<Inner<T>>);

struct Inner<T> {
    value: RefCell<T>,
    subs: RefCell<SlotMap<SubId, Subscriber<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            subs: RefCell::new(SlotMap::with_key()),
        }))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }

    /// Stores `v` only if it differs from the current value. Returns whether
    /// a write (and notification) happened.
    pub fn replace_if_changed(&self, v: T) -> bool
    where
        T: Clone + PartialEq,
    {
        {
            let mut cur = self.0.value.borrow_mut();
            if *cur == v {
                return false;
            }
            *cur = v;
        }
        self.notify();
        true
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.subs.borrow_mut().insert(Rc::new(f))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.0.subs.borrow_mut().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().len()
    }

    /// Two handles point at the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn notify(&self)
    where
        T: Clone,
    {
        // snapshot so subscribers may (un)subscribe while being called
        let subs: SmallVec<[Subscriber<T>; 4]> = self.0.subs.borrow().values().cloned().collect();
        if subs.is_empty() {
            return;
        }
        // no borrow is held while subscribers run
        let value = self.get();
        for s in subs {
            s(&value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
