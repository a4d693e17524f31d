//! Post-commit task queue.
//!
//! Mutators commit their new state synchronously and hand follow-up work
//! (change callbacks, effects) to [`post_commit`]. Tasks run strictly in the
//! order they were posted and are never merged:
//!
//! - outside any batch, a posted task runs as soon as the posting call
//!   returns control to the queue, before the caller's next statement;
//! - inside [`batch`] or [`crate::Host::compose`], tasks wait until the
//!   outermost batch ends;
//! - a task that posts another task only enqueues it; the drain loop picks it
//!   up after everything already queued.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

thread_local! {
    static QUEUE: RefCell<VecDeque<Box<dyn FnOnce()>>> = RefCell::new(VecDeque::new());
    static BATCH_DEPTH: Cell<u32> = const { Cell::new(0) };
    static FLUSHING: Cell<bool> = const { Cell::new(false) };
}

pub fn post_commit(task: impl FnOnce() + 'static) {
    QUEUE.with(|q| q.borrow_mut().push_back(Box::new(task)));
    if BATCH_DEPTH.with(Cell::get) == 0 {
        flush_effects();
    }
}

/// Runs `f`, deferring every task it posts until it returns.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    struct Depth;
    impl Drop for Depth {
        fn drop(&mut self) {
            BATCH_DEPTH.with(|d| d.set(d.get() - 1));
        }
    }

    BATCH_DEPTH.with(|d| d.set(d.get() + 1));
    let out = {
        let _depth = Depth;
        f()
    };
    if BATCH_DEPTH.with(Cell::get) == 0 {
        flush_effects();
    }
    out
}

/// Drains the queue in FIFO order. Re-entrant calls return immediately; the
/// outer drain will reach their tasks.
pub fn flush_effects() {
    if FLUSHING.with(|f| f.replace(true)) {
        return;
    }
    struct Reset;
    impl Drop for Reset {
        fn drop(&mut self) {
            FLUSHING.with(|f| f.set(false));
        }
    }
    let _reset = Reset;

    loop {
        let next = QUEUE.with(|q| q.borrow_mut().pop_front());
        match next {
            Some(task) => task(),
            None => break,
        }
    }
}

pub fn pending_effects() -> usize {
    QUEUE.with(|q| q.borrow().len())
}
