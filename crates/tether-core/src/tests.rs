#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::*;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let id = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(42);
        assert_eq!(*seen.borrow(), vec![42]);

        assert!(sig.unsubscribe(id));
        sig.set(7);
        assert_eq!(*seen.borrow(), vec![42]);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_signal() {
        let sig = signal(1);
        let observed = Rc::new(Cell::new(0));
        {
            let sig2 = sig.clone();
            let observed = observed.clone();
            sig.subscribe(move |_| observed.set(sig2.get()));
        }
        sig.set(5);
        assert_eq!(observed.get(), 5);
    }

    #[test]
    fn test_subscriber_can_write_signal() {
        let sig = signal(0);
        {
            let sig2 = sig.clone();
            sig.subscribe(move |v| {
                if *v == 1 {
                    sig2.set(2);
                }
            });
        }
        sig.set(1);
        assert_eq!(sig.get(), 2);

        sig.update(|v| *v = 1);
        assert_eq!(sig.get(), 2);
    }

    #[test]
    fn test_replace_if_changed_skips_equal_values() {
        let sig = signal(3);
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            sig.subscribe(move |_| calls.set(calls.get() + 1));
        }
        assert!(!sig.replace_if_changed(3));
        assert!(sig.replace_if_changed(4));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_scope_cleanup_on_drop() {
        let cleaned_up = Rc::new(Cell::new(0));

        {
            let scope = Scope::new();
            let cleaned_up_clone = cleaned_up.clone();
            scope.add_disposer(move || cleaned_up_clone.set(cleaned_up_clone.get() + 1));
            assert_eq!(cleaned_up.get(), 0);
        }

        assert_eq!(cleaned_up.get(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose_runs_once() {
        let cleaned_up = Rc::new(Cell::new(0));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || cleaned_up_clone.set(cleaned_up_clone.get() + 1));

        scope.dispose();
        scope.dispose();
        drop(scope);
        assert_eq!(cleaned_up.get(), 1);
    }

    #[test]
    fn test_scope_children_dispose_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();

        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent"));
        let o = order.clone();
        child.add_disposer(move || o.borrow_mut().push("child"));

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(child.is_disposed());
    }

    #[test]
    fn test_scope_run_restores_after_panic() {
        let outer = Scope::new();
        let inner = Scope::new();
        outer.run(|| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                inner.run::<()>(|| panic!("boom"));
            }));
            assert!(result.is_err());
            let current = current_scope().expect("outer scope still current");
            current.add_disposer(|| {});
        });
        assert!(current_scope().is_none());
    }

    #[test]
    fn test_dispose_runs_at_most_once() {
        let runs = Rc::new(Cell::new(0));
        let d = {
            let runs = runs.clone();
            Dispose::new(move || runs.set(runs.get() + 1))
        };
        let d2 = d.clone();
        assert!(d.is_pending());
        d.run();
        d2.run();
        assert!(!d2.is_pending());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_post_commit_runs_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        batch(|| {
            for i in 0..3 {
                let log = log.clone();
                post_commit(move || log.borrow_mut().push(i));
            }
            assert!(log.borrow().is_empty());
            assert_eq!(pending_effects(), 3);
        });
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_post_commit_outside_batch_is_immediate() {
        let ran = Rc::new(Cell::new(false));
        {
            let ran = ran.clone();
            post_commit(move || ran.set(true));
        }
        assert!(ran.get());
    }

    #[test]
    fn test_nested_post_commit_is_queued_behind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        batch(|| {
            let l = log.clone();
            post_commit(move || {
                l.borrow_mut().push("a");
                let l2 = l.clone();
                post_commit(move || l2.borrow_mut().push("c"));
            });
            let l = log.clone();
            post_commit(move || l.borrow_mut().push("b"));
        });
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_key_based_remember() {
        let mut host = Host::new();
        let (a, b) = host.compose(|| {
            let val1 = remember_with_key("test", || 42);
            let val2 = remember_with_key("test", || 100);
            (*val1, *val2)
        });

        assert_eq!(a, 42);
        assert_eq!(b, 42); // Not 100, because key exists
    }

    #[test]
    fn test_slot_remember_keeps_identity_across_passes() {
        let mut host = Host::new();
        let first = host.compose(|| remember(|| signal(0)));
        first.set(9);
        let second = host.compose(|| remember(|| signal(0)));
        assert!(first.ptr_eq(&second));
        assert_eq!(second.get(), 9);
    }

    #[test]
    fn test_remember_outside_host_is_fresh() {
        let a = remember_with_key("orphan", || Cell::new(1));
        a.set(2);
        let b = remember_with_key("orphan", || Cell::new(1));
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_host_unmount_runs_scoped_effects_once() {
        let mounted = Rc::new(Cell::new(0));
        let unmounted = Rc::new(Cell::new(0));
        let mut host = Host::new();

        for _ in 0..3 {
            let mounted = mounted.clone();
            let unmounted = unmounted.clone();
            host.compose(move || {
                disposable_effect("mount", (), move || {
                    mounted.set(mounted.get() + 1);
                    on_unmount(move || unmounted.set(unmounted.get() + 1))
                });
            });
        }

        assert_eq!(mounted.get(), 1);
        assert_eq!(unmounted.get(), 0);
        host.unmount();
        assert_eq!(unmounted.get(), 1);
    }

    #[test]
    fn test_disposable_effect_reruns_on_dep_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = Host::new();

        for dep in [1, 1, 2] {
            let log = log.clone();
            host.compose(move || {
                disposable_effect("dep", dep, move || {
                    log.borrow_mut().push(format!("start {dep}"));
                    on_unmount(move || log.borrow_mut().push(format!("stop {dep}")))
                });
            });
        }
        drop(host);

        assert_eq!(
            *log.borrow(),
            vec!["start 1", "stop 1", "start 2", "stop 2"]
        );
    }

    #[test]
    fn test_recompose_request_is_cleared_by_pass() {
        let mut host = Host::new();
        let inv = host.compose(|| invalidator().expect("composing"));
        inv.invalidate();
        assert!(host.needs_recompose());
        host.compose(|| {});
        assert!(!host.needs_recompose());
        assert_eq!(host.passes(), 2);
    }

    #[test]
    fn test_recompose_flag_is_per_host() {
        let mut a = Host::new();
        let mut b = Host::new();
        let inv_a = a.compose(|| invalidator().expect("composing"));
        b.compose(|| {});
        assert!(invalidator().is_none());

        inv_a.invalidate();
        assert!(a.needs_recompose());
        assert!(!b.needs_recompose());

        b.compose(|| {});
        assert!(a.needs_recompose());
    }
}
