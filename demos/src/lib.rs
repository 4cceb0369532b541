// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Support code for the `understory_section_scroll` demos.
//!
//! Run:
//! - `cargo run -p understory_section_scroll_demos --example section_navigation`

use std::cell::{Cell, RefCell};
use std::future::{Ready, ready};
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;
use understory_section_scroll::{Curve, MoveOutcome, PositionCallback, ScrollHost};

/// Frame interval used to sample animations (60 Hz).
const FRAME: Duration = Duration::from_micros(16_667);

/// A scroll container with no window behind it.
///
/// Animations are sampled at 60 Hz and played to completion from inside
/// [`ScrollHost::animate_to`], so every move has settled by the time its
/// future is first polled.
#[derive(Default)]
pub struct HeadlessHost {
    offset: Cell<f64>,
    next_subscription: Cell<u64>,
    callbacks: RefCell<Vec<(u64, Rc<dyn Fn(f64)>)>>,
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("offset", &self.offset.get())
            .field("subscribers", &self.callbacks.borrow().len())
            .finish_non_exhaustive()
    }
}

impl HeadlessHost {
    /// Creates a host scrolled to the top.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Simulates the user dragging the view to `offset`.
    pub fn drag_to(&self, offset: f64) {
        self.publish(offset);
    }

    fn publish(&self, offset: f64) {
        self.offset.set(offset);
        let callbacks: Vec<_> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(offset);
        }
    }
}

impl ScrollHost for HeadlessHost {
    type Scalar = f64;
    type Animation = Ready<MoveOutcome>;
    type Subscription = u64;

    fn offset(&self) -> f64 {
        self.offset.get()
    }

    fn jump_to(&self, offset: f64) {
        self.publish(offset);
    }

    fn animate_to(&self, offset: f64, duration: Duration, curve: Curve) -> Self::Animation {
        let from = self.offset.get();
        let frames = duration.as_nanos().div_ceil(FRAME.as_nanos()).max(1);
        for frame in 1..=frames {
            let t = frame as f64 / frames as f64;
            let sample = from + (offset - from) * curve.transform(t);
            trace!(?frame, sample, "animation frame");
            self.publish(sample);
        }
        ready(MoveOutcome::Settled)
    }

    fn on_position_changed(&self, callback: PositionCallback<f64>) -> u64 {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.callbacks.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn remove_position_changed(&self, subscription: u64) {
        self.callbacks
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }
}
