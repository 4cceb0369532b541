// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracks which section is visible and notifies listeners when it changes.
//!
//! A [`VisibilityTracker`] subscribes to a [`ScrollHost`]'s position-changed
//! events. For every event it resolves the host offset to a section through
//! [`SectionLayout::offset_to_position`] and, if the section differs from the
//! one it last reported, invokes every registered listener once with the new
//! section index.
//!
//! ## Programmatic moves
//!
//! While the [`Navigator`](crate::Navigator) is driving the host, position
//! events are ignored so that an animation does not report every section it
//! passes through. Moves are counted, so overlapping moves keep events
//! suppressed until the last one finishes. When the count returns to zero the
//! tracker re-evaluates the host offset once and reports the final section.
//!
//! ## Listeners
//!
//! - Listener identity is the `Rc` allocation ([`Rc::ptr_eq`]-style).
//! - Subscribing the same listener twice registers it twice; it is then
//!   invoked twice per notification.
//! - [`VisibilityTracker::unsubscribe`] removes the earliest matching
//!   registration; [`VisibilityTracker::unsubscribe_all`] removes all of them.
//! - A listener returning `Err` is logged and skipped; the remaining listeners
//!   still run and the host never sees the error.
//! - Each notification runs over a snapshot of the registry, so listeners may
//!   subscribe, unsubscribe, or cause re-entrant position events.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{ListenerError, Scalar, ScrollHost, SectionLayout};

/// A section-change listener, invoked with the newly visible section index.
pub type SectionListener = Rc<dyn Fn(usize) -> Result<(), ListenerError>>;

fn same_listener(a: &SectionListener, b: &SectionListener) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

struct TrackerState<S: Scalar> {
    layout: SectionLayout<S>,
    moves_in_flight: Cell<usize>,
    current: Cell<Option<usize>>,
    listeners: RefCell<Vec<SectionListener>>,
}

impl<S: Scalar> TrackerState<S> {
    fn position_changed(&self, offset: S) {
        if self.moves_in_flight.get() > 0 {
            trace!(?offset, "ignoring position change during programmatic move");
            return;
        }
        self.evaluate(offset);
    }

    fn evaluate(&self, offset: S) {
        let Some(position) = self.layout.offset_to_position(offset) else {
            return;
        };
        let section = position.section_index;
        if self.current.replace(Some(section)) == Some(section) {
            return;
        }
        debug!(section, ?offset, "visible section changed");
        self.notify(section);
    }

    fn notify(&self, section: usize) {
        // No borrow is held while listeners run.
        let listeners: SmallVec<[SectionListener; 4]> =
            self.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            if let Err(error) = listener(section) {
                warn!(section, %error, "section listener failed");
            }
        }
    }
}

struct Attachment<H: ScrollHost> {
    host: Rc<H>,
    subscription: H::Subscription,
}

/// Observes a [`ScrollHost`] and reports visible-section changes.
///
/// A tracker is either attached to a host or detached. Dropping an attached
/// tracker detaches it.
pub struct VisibilityTracker<H: ScrollHost> {
    state: Rc<TrackerState<H::Scalar>>,
    attachment: Option<Attachment<H>>,
}

impl<H: ScrollHost> VisibilityTracker<H> {
    /// Creates a detached tracker over `layout`.
    #[must_use]
    pub fn new(layout: SectionLayout<H::Scalar>) -> Self {
        Self {
            state: Rc::new(TrackerState {
                layout,
                moves_in_flight: Cell::new(0),
                current: Cell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
            attachment: None,
        }
    }

    /// Creates a tracker over `layout` and attaches it to `host`.
    #[must_use]
    pub fn attached(host: Rc<H>, layout: SectionLayout<H::Scalar>) -> Self {
        let mut tracker = Self::new(layout);
        tracker.attach(host);
        tracker
    }

    /// Subscribes to `host`'s position-changed events.
    ///
    /// If the tracker is already attached, its subscription moves to `host`;
    /// registered listeners are kept.
    pub fn attach(&mut self, host: Rc<H>) {
        self.release_host();
        let state = Rc::downgrade(&self.state);
        let subscription = host.on_position_changed(Box::new(move |offset| {
            if let Some(state) = state.upgrade() {
                state.position_changed(offset);
            }
        }));
        debug!("visibility tracker attached");
        self.attachment = Some(Attachment { host, subscription });
    }

    /// Unsubscribes from the host, then clears every listener.
    ///
    /// Detaching a detached tracker only clears the listeners.
    pub fn detach(&mut self) {
        if self.release_host() {
            debug!("visibility tracker detached");
        }
        self.state.listeners.borrow_mut().clear();
    }

    fn release_host(&mut self) -> bool {
        match self.attachment.take() {
            Some(Attachment { host, subscription }) => {
                host.remove_position_changed(subscription);
                true
            }
            None => false,
        }
    }

    /// Returns `true` while subscribed to a host.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The layout sections are resolved against.
    #[must_use]
    pub fn layout(&self) -> &SectionLayout<H::Scalar> {
        &self.state.layout
    }

    /// The section index most recently reported to listeners.
    #[must_use]
    pub fn current_section(&self) -> Option<usize> {
        self.state.current.get()
    }

    /// Returns `true` while at least one programmatic move is in flight.
    #[must_use]
    pub fn is_move_in_progress(&self) -> bool {
        self.state.moves_in_flight.get() > 0
    }

    /// Re-evaluates the attached host's current offset.
    ///
    /// Useful to report the initial section right after subscribing. Does
    /// nothing while detached or during a programmatic move.
    pub fn refresh(&self) {
        if let Some(attachment) = &self.attachment {
            self.state.position_changed(attachment.host.offset());
        }
    }

    /// Registers `listener`.
    ///
    /// Duplicates are allowed: a listener subscribed twice is invoked twice.
    pub fn subscribe(&self, listener: SectionListener) {
        self.state.listeners.borrow_mut().push(listener);
    }

    /// Removes the earliest registration of `listener`.
    ///
    /// Returns `false` if `listener` was not registered.
    pub fn unsubscribe(&self, listener: &SectionListener) -> bool {
        let mut listeners = self.state.listeners.borrow_mut();
        match listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => {
                trace!("unsubscribe ignored: listener not registered");
                false
            }
        }
    }

    /// Removes every registration of `listener` and returns how many there were.
    pub fn unsubscribe_all(&self, listener: &SectionListener) -> usize {
        let mut listeners = self.state.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        before - listeners.len()
    }

    /// Number of registrations, counting duplicates.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Marks a programmatic move as started until the guard is dropped.
    pub(crate) fn begin_move(&self) -> MoveGuard<'_, H> {
        let moves = &self.state.moves_in_flight;
        moves.set(moves.get() + 1);
        MoveGuard { tracker: self }
    }

    fn finish_move(&self) {
        let moves = &self.state.moves_in_flight;
        let remaining = moves.get().saturating_sub(1);
        moves.set(remaining);
        if remaining == 0 {
            // Report where the move ended up.
            self.refresh();
        }
    }
}

impl<H: ScrollHost> Drop for VisibilityTracker<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<H: ScrollHost> fmt::Debug for VisibilityTracker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityTracker")
            .field("layout", &self.state.layout)
            .field("attached", &self.is_attached())
            .field("current_section", &self.current_section())
            .field("moves_in_flight", &self.state.moves_in_flight.get())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

/// Releases one programmatic move when dropped, on every exit path of the move.
pub(crate) struct MoveGuard<'a, H: ScrollHost> {
    tracker: &'a VisibilityTracker<H>,
}

impl<H: ScrollHost> Drop for MoveGuard<'_, H> {
    fn drop(&mut self) {
        self.tracker.finish_move();
    }
}
