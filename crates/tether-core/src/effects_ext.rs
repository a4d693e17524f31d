use std::cell::RefCell;

use crate::{Dispose, on_unmount, remember_with_key, scoped_effect};

struct EffectSlot<K> {
    last_key: Option<K>,
    cleanup: Option<Dispose>,
}

/// Runs `effect` when `dep` changes (and the first time), cleaning up the
/// previous run first. The last cleanup runs when the current scope is torn
/// down.
///
/// The slot lives under `slot` in host storage, so the effect keeps its
/// identity across conditional branches.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    slot: impl Into<String>,
    dep: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let slot = slot.into();
    let state = remember_with_key(format!("disposable:{slot}"), || {
        RefCell::new(EffectSlot::<K> {
            last_key: None,
            cleanup: None,
        })
    });

    // first visit: hook the final cleanup onto the scope
    if state.borrow().last_key.is_none() {
        let state = state.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let cleanup = state.borrow_mut().cleanup.take();
                if let Some(d) = cleanup {
                    d.run();
                }
            })
        });
    }

    let changed = state.borrow().last_key.as_ref() != Some(&dep);
    if !changed {
        return;
    }

    let previous = {
        let mut s = state.borrow_mut();
        s.last_key = Some(dep);
        s.cleanup.take()
    };
    if let Some(d) = previous {
        d.run();
    }

    let d = effect();
    state.borrow_mut().cleanup = Some(d);
}
