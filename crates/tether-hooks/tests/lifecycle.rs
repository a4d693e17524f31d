use std::cell::RefCell;
use std::rc::Rc;

use tether_core::Host;
use tether_hooks::*;

#[test]
fn toggle_keeps_identity_across_passes() {
    let mut host = Host::new();
    let first = host.compose(|| remember_toggle("menu", false));
    first.toggle();
    assert!(host.needs_recompose());

    let second = host.compose(|| remember_toggle("menu", false));
    assert!(second.value());
    assert!(!host.needs_recompose());
}

#[test]
fn toggle_default_tracks_construction_argument() {
    let mut host = Host::new();
    host.compose(|| remember_toggle("t", false));
    let t = host.compose(|| remember_toggle("t", true));
    assert!(!t.value());
    t.reset();
    assert!(t.value());
}

#[test]
fn unmount_stops_recompose_requests() {
    let mut host = Host::new();
    let t = host.compose(|| remember_toggle("t", false));
    assert_eq!(t.signal().subscriber_count(), 1);
    host.unmount();
    assert_eq!(t.signal().subscriber_count(), 0);
}

#[test]
fn counter_reconfigures_but_keeps_count() {
    let mut host = Host::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let c = host.compose(|| remember_counter("c", CounterOptions::new().initial_value(3).max(10)));
    c.increment();
    assert_eq!(c.count(), 4);

    let sink = calls.clone();
    let c = host.compose(move || {
        remember_counter(
            "c",
            CounterOptions::new()
                .initial_value(0)
                .max(2)
                .on_change(move |v| sink.borrow_mut().push(v)),
        )
    });
    // bounds changed but the stored count is not re-clamped until a write
    assert_eq!(c.count(), 4);
    assert!(c.is_max());
    c.reset();
    assert_eq!(c.count(), 2);
    assert_eq!(*calls.borrow(), vec![2]);
}

#[test]
fn counter_changes_during_compose_notify_after_commit() {
    let mut host = Host::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let seen_during = Rc::new(RefCell::new(None));
    let seen = seen_during.clone();

    host.compose(move || {
        let c = remember_counter(
            "c",
            CounterOptions::new().on_change(move |v: i64| sink.borrow_mut().push(v)),
        );
        c.increment();
        c.increment();
        *seen.borrow_mut() = Some(c.count());
    });

    assert_eq!(*seen_during.borrow(), Some(2));
    assert_eq!(*calls.borrow(), vec![1, 2]);
}

#[test]
fn recompose_requests_stay_with_their_host() {
    let mut a = Host::new();
    let mut b = Host::new();
    let ta = a.compose(|| remember_toggle("t", false));
    b.compose(|| remember_toggle("t", false));

    ta.toggle();
    assert!(a.needs_recompose());
    assert!(!b.needs_recompose());

    b.compose(|| remember_toggle("t", false));
    assert!(a.needs_recompose());
}

#[test]
fn title_written_after_pass_commits() {
    let title = MemoryTitle::new("Home");
    let mut host = Host::new();

    let seen = host.compose(|| {
        use_title("t", title.clone(), "App", TitleOptions::new());
        title.value()
    });
    assert_eq!(seen, "Home");
    assert_eq!(title.value(), "App");

    let seen = host.compose(|| {
        use_title("t", title.clone(), "Inbox", TitleOptions::new());
        title.value()
    });
    assert_eq!(seen, "App");
    assert_eq!(title.value(), "Inbox");
}

#[test]
fn title_captured_once_and_restored_on_unmount() {
    let title = MemoryTitle::new("Home");
    let mut host = Host::new();
    let options = || TitleOptions::new().template("%s - Mail");

    for page in ["Inbox", "Sent", "Drafts"] {
        host.compose(|| use_title("page", title.clone(), page, options()));
        assert_eq!(title.value(), format!("{page} - Mail"));
    }

    // another writer between passes does not change what gets restored
    title.set("Intruder").unwrap();
    host.compose(|| use_title("page", title.clone(), "Drafts", options()));

    host.unmount();
    assert_eq!(title.value(), "Home");
}

#[test]
fn title_target_fixed_by_first_activation() {
    let first = MemoryTitle::new("Home");
    let other = MemoryTitle::new("Elsewhere");
    let mut host = Host::new();

    host.compose(|| use_title("t", first.clone(), "App", TitleOptions::new()));
    host.compose(|| use_title("t", other.clone(), "Inbox", TitleOptions::new()));
    assert_eq!(first.value(), "Inbox");
    assert_eq!(other.value(), "Elsewhere");
    assert_eq!(other.writes(), 0);

    host.unmount();
    assert_eq!(first.value(), "Home");
    assert_eq!(other.value(), "Elsewhere");
}

#[test]
fn title_restore_flag_from_last_pass_wins() {
    let title = MemoryTitle::new("Home");
    let mut host = Host::new();

    host.compose(|| use_title("t", title.clone(), "App", TitleOptions::new()));
    host.compose(|| {
        use_title(
            "t",
            title.clone(),
            "App",
            TitleOptions::new().restore_on_unmount(false),
        );
    });

    drop(host);
    assert_eq!(title.value(), "App");
}

#[test]
fn title_skip_if_same_across_passes() {
    let title = MemoryTitle::new("Home");
    let mut host = Host::new();
    for _ in 0..3 {
        host.compose(|| use_title("t", title.clone(), "Same", TitleOptions::new()));
    }
    assert_eq!(title.writes(), 1);
    host.unmount();
    assert_eq!(title.writes(), 2);
}

#[test]
fn title_released_when_host_unwinds() {
    let title = MemoryTitle::new("Home");
    let t2 = title.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let mut host = Host::new();
        host.compose(|| use_title("t", t2.clone(), "Busy", TitleOptions::new()));
        assert_eq!(t2.value(), "Busy");
        panic!("handler failed");
    }));
    assert!(result.is_err());
    assert_eq!(title.value(), "Home");
}
