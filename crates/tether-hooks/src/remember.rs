//! Host bindings: keyed, identity-preserving controllers for use inside
//! [`tether_core::Host::compose`].
//!
//! Each binding stores its controller under an explicit key, so conditional
//! branches cannot shuffle state between call sites. Controllers created here
//! request a recompose from the host whenever their value changes, and stop
//! doing so when the host unmounts.

use std::cell::RefCell;

use tether_core::{
    Signal, current_scope, disposable_effect, invalidator, on_unmount, post_commit,
    remember_with_key, scoped_effect,
};

use crate::{Counter, CounterOptions, CounterValue, TitleGuard, TitleOptions};
use crate::{TitleTarget, Toggle};

fn watch<T: 'static>(slot: String, sig: &Signal<T>) {
    let Some(host) = invalidator() else {
        return;
    };
    let sig = sig.clone();
    disposable_effect(slot, (), move || {
        let id = sig.subscribe(move |_| host.invalidate());
        on_unmount(move || {
            sig.unsubscribe(id);
        })
    });
}

/// Toggle stored under `key`. A changed `default_value` on a later pass
/// becomes the new reset target.
pub fn remember_toggle(key: impl Into<String>, default_value: bool) -> Toggle {
    let key = format!("toggle:{}", key.into());
    let toggle = remember_with_key(key.clone(), || Toggle::new(default_value));
    toggle.sync_default(default_value);
    watch(key, toggle.signal());
    (*toggle).clone()
}

/// Counter stored under `key`. Options from later passes are applied with
/// [`Counter::reconfigure`].
pub fn remember_counter<T: CounterValue>(
    key: impl Into<String>,
    options: CounterOptions<T>,
) -> Counter<T> {
    let key = format!("counter:{}", key.into());
    let mut fresh = false;
    let counter = remember_with_key(key.clone(), || {
        fresh = true;
        Counter::new(options.clone())
    });
    if !fresh {
        counter.reconfigure(options);
    }
    watch(key, counter.signal());
    (*counter).clone()
}

/// Keeps `target` showing `title` while the current host is mounted.
///
/// Nothing is written during the pass itself: the first pass queues the
/// activation (capturing the previous title), later passes queue a retitle
/// that also refreshes the options, including the restore flag read at
/// unmount. The queued work runs once the pass commits. Release runs when the
/// host's scope is disposed.
///
/// The target is fixed by the first successful activation; a different
/// `target` passed on a later pass is ignored. Errors from the queued work
/// and from release can only be logged.
pub fn use_title<T: TitleTarget + 'static>(
    key: impl Into<String>,
    target: T,
    title: &str,
    options: TitleOptions,
) {
    let mut fresh = false;
    let slot = remember_with_key(format!("title:{}", key.into()), || {
        fresh = true;
        RefCell::new(None::<TitleGuard<T>>)
    });

    if fresh {
        let slot = slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let guard = slot.borrow_mut().take();
                if let Some(guard) = guard
                    && let Err(e) = guard.deactivate()
                {
                    log::warn!("title: restore on unmount failed: {e}");
                }
            })
        });
    }

    let scope = current_scope();
    let title = title.to_owned();
    post_commit(move || {
        if scope.as_ref().is_some_and(|s| s.is_disposed()) {
            return;
        }
        let mut active = slot.borrow_mut();
        match active.as_mut() {
            Some(guard) => {
                if let Err(e) = guard.update(&title, options) {
                    log::warn!("title: update failed: {e}");
                }
            }
            None => match TitleGuard::activate(target, &title, options) {
                Ok(guard) => *active = Some(guard),
                Err(e) => log::warn!("title: activation failed: {e}"),
            },
        }
    });
}
