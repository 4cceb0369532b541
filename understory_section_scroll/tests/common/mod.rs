// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated scroll host shared by the integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary only uses part of the helpers."
)]

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use understory_section_scroll::{
    Curve, MoveOutcome, PositionCallback, ScrollHost, Section, SectionLayout, SectionListener,
};

/// Number of frames an animation emits between its start and its target.
pub(crate) const FRAMES: usize = 4;

struct Animation {
    from: f64,
    target: f64,
    curve: Curve,
    frame: Cell<usize>,
    outcome: Cell<Option<MoveOutcome>>,
    waker: RefCell<Option<Waker>>,
}

impl Animation {
    fn resolve(&self, outcome: MoveOutcome) {
        self.outcome.set(Some(outcome));
        if let Some(waker) = self.waker.borrow_mut().take() {
            waker.wake();
        }
    }
}

/// Future handed out by [`TestHost::animate_to`].
pub(crate) struct TestAnimation(Rc<Animation>);

impl Future for TestAnimation {
    type Output = MoveOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<MoveOutcome> {
        match self.0.outcome.get() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                *self.0.waker.borrow_mut() = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

/// A scroll container driven by hand.
///
/// Animations only advance through [`TestHost::advance`] and
/// [`TestHost::finish`], unless the host is in autoplay mode, in which case
/// every animation plays all of its frames from inside `animate_to`.
#[derive(Default)]
pub(crate) struct TestHost {
    offset: Cell<f64>,
    next_subscription: Cell<usize>,
    subscribers: RefCell<Vec<(usize, Rc<dyn Fn(f64)>)>>,
    running: RefCell<Option<Rc<Animation>>>,
    autoplay: Cell<bool>,
    jumps: Cell<usize>,
    animations: RefCell<Vec<(f64, Duration, Curve)>>,
    emitted: RefCell<Vec<f64>>,
}

impl TestHost {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn autoplay() -> Rc<Self> {
        let host = Self::default();
        host.autoplay.set(true);
        Rc::new(host)
    }

    /// Simulates the user scrolling to `offset`.
    pub(crate) fn scroll_to(&self, offset: f64) {
        self.set_offset(offset);
    }

    /// Plays up to `frames` frames of the running animation.
    pub(crate) fn advance(&self, frames: usize) {
        for _ in 0..frames {
            let Some(animation) = self.running.borrow().clone() else {
                return;
            };
            self.play_frame(&animation);
        }
    }

    /// Plays the running animation to its target.
    pub(crate) fn finish(&self) {
        self.advance(FRAMES + 1);
    }

    /// Stops the running animation where it is.
    pub(crate) fn interrupt(&self) {
        if let Some(animation) = self.running.borrow_mut().take() {
            animation.resolve(MoveOutcome::Interrupted);
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.running.borrow().is_some()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub(crate) fn jump_count(&self) -> usize {
        self.jumps.get()
    }

    /// Every `animate_to` request as `(target, duration, curve)`.
    pub(crate) fn animations(&self) -> Vec<(f64, Duration, Curve)> {
        self.animations.borrow().clone()
    }

    /// Every offset published to subscribers.
    pub(crate) fn emitted(&self) -> Vec<f64> {
        self.emitted.borrow().clone()
    }

    fn play_frame(&self, animation: &Rc<Animation>) {
        let frame = animation.frame.get() + 1;
        animation.frame.set(frame);
        if frame > FRAMES {
            self.running.borrow_mut().take();
            self.set_offset(animation.target);
            animation.resolve(MoveOutcome::Settled);
        } else {
            let t = frame as f64 / (FRAMES + 1) as f64;
            let eased = animation.curve.transform(t);
            self.set_offset(animation.from + (animation.target - animation.from) * eased);
        }
    }

    fn set_offset(&self, offset: f64) {
        self.offset.set(offset);
        self.emitted.borrow_mut().push(offset);
        // Subscribers may (un)subscribe or scroll while being notified.
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(offset);
        }
    }
}

impl ScrollHost for TestHost {
    type Scalar = f64;
    type Animation = TestAnimation;
    type Subscription = usize;

    fn offset(&self) -> f64 {
        self.offset.get()
    }

    fn jump_to(&self, offset: f64) {
        self.jumps.set(self.jumps.get() + 1);
        self.set_offset(offset);
    }

    fn animate_to(&self, offset: f64, duration: Duration, curve: Curve) -> TestAnimation {
        self.animations.borrow_mut().push((offset, duration, curve));
        let previous = self.running.borrow_mut().take();
        if let Some(previous) = previous {
            previous.resolve(MoveOutcome::Superseded);
        }
        let animation = Rc::new(Animation {
            from: self.offset.get(),
            target: offset,
            curve,
            frame: Cell::new(0),
            outcome: Cell::new(None),
            waker: RefCell::new(None),
        });
        *self.running.borrow_mut() = Some(Rc::clone(&animation));
        if self.autoplay.get() {
            self.finish();
        }
        TestAnimation(animation)
    }

    fn on_position_changed(&self, callback: PositionCallback<f64>) -> usize {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn remove_position_changed(&self, subscription: usize) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }
}

/// The layout used throughout the docs:
///
/// | index | section                      | offsets        |
/// |-------|------------------------------|----------------|
/// | 0     | spacer 20                    | `0..20`        |
/// | 1     | anchor 60                    | `20..80`       |
/// | 2     | spacer 10                    | `80..90`       |
/// | 3     | 100 items of 80, spacing 8   | `90..8882`     |
/// | 4     | spacer 20                    | `8882..8902`   |
pub(crate) fn sample_layout() -> SectionLayout<f64> {
    SectionLayout::new(vec![
        Section::spacer(20.0).unwrap(),
        Section::anchor(60.0).unwrap(),
        Section::spacer(10.0).unwrap(),
        Section::content(100, 80.0, 8.0, 1).unwrap(),
        Section::spacer(20.0).unwrap(),
    ])
}

/// A listener that records every section it is notified about.
pub(crate) fn recorder() -> (SectionListener, Rc<RefCell<Vec<usize>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: SectionListener = Rc::new(move |section| {
        sink.borrow_mut().push(section);
        Ok(())
    });
    (listener, seen)
}
