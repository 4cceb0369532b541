// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `VisibilityTracker` observing a simulated scroll host.
//!
//! These exercise change detection on user scrolling, the listener registry
//! policy, and attach/detach bookkeeping on the host side.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use understory_section_scroll::{SectionLayout, SectionListener, VisibilityTracker};

use common::{TestHost, recorder, sample_layout};

#[test]
fn new_tracker_is_detached_and_quiet() {
    let tracker = VisibilityTracker::<TestHost>::new(sample_layout());
    assert!(!tracker.is_attached());
    assert_eq!(tracker.current_section(), None);
    assert_eq!(tracker.listener_count(), 0);
    assert!(!tracker.is_move_in_progress());

    // Nothing to read an offset from.
    tracker.refresh();
    assert_eq!(tracker.current_section(), None);
}

#[test]
fn user_scrolling_reports_each_section_change_once() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(listener);

    host.scroll_to(10.0);
    host.scroll_to(15.0);
    assert_eq!(*seen.borrow(), [0]);

    host.scroll_to(50.0);
    host.scroll_to(79.0);
    assert_eq!(*seen.borrow(), [0, 1]);

    host.scroll_to(500.0);
    host.scroll_to(8000.0);
    host.scroll_to(10.0);
    assert_eq!(*seen.borrow(), [0, 1, 3, 0]);
    assert_eq!(tracker.current_section(), Some(0));
}

#[test]
fn refresh_reports_the_initial_section() {
    let host = TestHost::new();
    host.scroll_to(30.0);
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(listener);
    assert!(seen.borrow().is_empty());

    tracker.refresh();
    tracker.refresh();

    assert_eq!(*seen.borrow(), [1]);
}

#[test]
fn out_of_range_offsets_resolve_to_edge_sections() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(listener);

    host.scroll_to(1.0e9);
    host.scroll_to(-25.0);

    assert_eq!(*seen.borrow(), [4, 0]);
}

#[test]
fn empty_layout_never_notifies() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), SectionLayout::new(vec![]));
    let (listener, seen) = recorder();
    tracker.subscribe(listener);

    host.scroll_to(0.0);
    host.scroll_to(100.0);
    tracker.refresh();

    assert!(seen.borrow().is_empty());
    assert_eq!(tracker.current_section(), None);
}

#[test]
fn failing_listener_does_not_stop_the_others() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let calls = Rc::new(Cell::new(0));
    let failing: SectionListener = {
        let calls = Rc::clone(&calls);
        Rc::new(move |_| {
            calls.set(calls.get() + 1);
            Err("listener exploded".into())
        })
    };
    let (listener, seen) = recorder();
    tracker.subscribe(failing);
    tracker.subscribe(listener);

    host.scroll_to(0.0);
    host.scroll_to(40.0);

    assert_eq!(calls.get(), 2);
    assert_eq!(*seen.borrow(), [0, 1]);
}

#[test]
fn duplicate_subscriptions_are_invoked_per_registration() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(Rc::clone(&listener));
    tracker.subscribe(Rc::clone(&listener));
    assert_eq!(tracker.listener_count(), 2);

    host.scroll_to(0.0);
    assert_eq!(*seen.borrow(), [0, 0]);

    // One unsubscribe removes one registration.
    assert!(tracker.unsubscribe(&listener));
    assert_eq!(tracker.listener_count(), 1);
    host.scroll_to(40.0);
    assert_eq!(*seen.borrow(), [0, 0, 1]);

    assert!(tracker.unsubscribe(&listener));
    assert!(!tracker.unsubscribe(&listener));
    host.scroll_to(0.0);
    assert_eq!(*seen.borrow(), [0, 0, 1]);
}

#[test]
fn unsubscribe_all_removes_every_registration() {
    let tracker = VisibilityTracker::<TestHost>::new(sample_layout());
    let (listener, _) = recorder();
    let (other, _) = recorder();
    for _ in 0..3 {
        tracker.subscribe(Rc::clone(&listener));
    }
    tracker.subscribe(Rc::clone(&other));

    assert_eq!(tracker.unsubscribe_all(&listener), 3);
    assert_eq!(tracker.unsubscribe_all(&listener), 0);
    assert_eq!(tracker.listener_count(), 1);
}

#[test]
fn identical_closures_are_distinct_listeners() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (first, first_seen) = recorder();
    let (second, second_seen) = recorder();
    tracker.subscribe(Rc::clone(&first));
    tracker.subscribe(Rc::clone(&second));

    assert!(tracker.unsubscribe(&first));
    host.scroll_to(0.0);

    assert!(first_seen.borrow().is_empty());
    assert_eq!(*second_seen.borrow(), [0]);
}

#[test]
fn listener_added_during_notification_runs_from_the_next_change() {
    let host = TestHost::new();
    let tracker = Rc::new(VisibilityTracker::attached(
        Rc::clone(&host),
        sample_layout(),
    ));
    let (late, late_seen) = recorder();
    let added = Rc::new(Cell::new(false));
    let adder: SectionListener = {
        let tracker: Weak<VisibilityTracker<TestHost>> = Rc::downgrade(&tracker);
        let added = Rc::clone(&added);
        Rc::new(move |_| {
            if added.replace(true) {
                return Ok(());
            }
            if let Some(tracker) = tracker.upgrade() {
                tracker.subscribe(Rc::clone(&late));
            }
            Ok(())
        })
    };
    tracker.subscribe(adder);

    host.scroll_to(0.0);
    assert!(late_seen.borrow().is_empty());
    assert_eq!(tracker.listener_count(), 2);

    host.scroll_to(40.0);
    assert_eq!(*late_seen.borrow(), [1]);
}

#[test]
fn listener_can_unsubscribe_itself() {
    let host = TestHost::new();
    let tracker = Rc::new(VisibilityTracker::attached(
        Rc::clone(&host),
        sample_layout(),
    ));
    let calls = Rc::new(Cell::new(0));
    let slot: Rc<RefCell<Option<SectionListener>>> = Rc::new(RefCell::new(None));
    let once: SectionListener = {
        let tracker = Rc::downgrade(&tracker);
        let calls = Rc::clone(&calls);
        let slot = Rc::clone(&slot);
        Rc::new(move |_| {
            calls.set(calls.get() + 1);
            let me = slot.borrow_mut().take();
            if let (Some(me), Some(tracker)) = (me, tracker.upgrade()) {
                assert!(tracker.unsubscribe(&me));
            }
            Ok(())
        })
    };
    *slot.borrow_mut() = Some(Rc::clone(&once));
    tracker.subscribe(once);

    host.scroll_to(0.0);
    host.scroll_to(40.0);

    assert_eq!(calls.get(), 1);
    assert_eq!(tracker.listener_count(), 0);
}

#[test]
fn listener_may_scroll_the_host_reentrantly() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let bouncer: SectionListener = {
        let host = Rc::downgrade(&host);
        let seen = Rc::clone(&seen);
        Rc::new(move |section| {
            seen.borrow_mut().push(section);
            // Landing on the anchor snaps into the content.
            if let Some(host) = host.upgrade().filter(|_| section == 1) {
                host.scroll_to(500.0);
            }
            Ok(())
        })
    };
    tracker.subscribe(bouncer);

    host.scroll_to(40.0);

    assert_eq!(*seen.borrow(), [1, 3]);
    assert_eq!(tracker.current_section(), Some(3));
}

#[test]
fn detach_unsubscribes_from_the_host_and_clears_listeners() {
    let host = TestHost::new();
    let mut tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(listener);
    assert!(tracker.is_attached());
    assert_eq!(host.subscriber_count(), 1);

    tracker.detach();

    assert!(!tracker.is_attached());
    assert_eq!(host.subscriber_count(), 0);
    assert_eq!(tracker.listener_count(), 0);
    host.scroll_to(500.0);
    assert!(seen.borrow().is_empty());

    // Detaching twice is harmless.
    tracker.detach();
    assert_eq!(host.subscriber_count(), 0);
}

#[test]
fn attach_moves_the_subscription_and_keeps_listeners() {
    let first = TestHost::new();
    let second = TestHost::new();
    let mut tracker = VisibilityTracker::attached(Rc::clone(&first), sample_layout());
    let (listener, seen) = recorder();
    tracker.subscribe(listener);

    tracker.attach(Rc::clone(&second));

    assert_eq!(first.subscriber_count(), 0);
    assert_eq!(second.subscriber_count(), 1);
    assert_eq!(tracker.listener_count(), 1);
    first.scroll_to(40.0);
    second.scroll_to(500.0);
    assert_eq!(*seen.borrow(), [3]);
}

#[test]
fn dropping_the_tracker_unsubscribes_from_the_host() {
    let host = TestHost::new();
    let tracker = VisibilityTracker::attached(Rc::clone(&host), sample_layout());
    assert_eq!(host.subscriber_count(), 1);

    drop(tracker);

    assert_eq!(host.subscriber_count(), 0);
}
