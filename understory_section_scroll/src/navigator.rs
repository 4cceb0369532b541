// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller that moves a scroll host to `(section, item)` addresses.

use alloc::rc::Rc;
use core::fmt;

use tracing::debug;

use crate::{
    MoveOutcome, NavigationError, ScrollHost, SectionLayout, SectionListener, Transition,
    VisibilityTracker,
};

/// Drives a [`ScrollHost`] to item and section addresses in a [`SectionLayout`].
///
/// This type:
/// - owns the layout (through its [`VisibilityTracker`]),
/// - translates addresses to offsets and asks the host to move there,
/// - keeps the tracker quiet while its own moves are in flight, then lets it
///   report the section the move ended in.
///
/// The move methods are `async`: a [`Transition::Instant`] move completes on
/// the first poll, an animated move completes when the host's animation
/// settles or is superseded. Dropping a move future before it completes ends
/// that move as far as the tracker is concerned.
///
/// Replacing the layout means building a new navigator.
pub struct Navigator<H: ScrollHost> {
    host: Rc<H>,
    tracker: VisibilityTracker<H>,
}

impl<H: ScrollHost> Navigator<H> {
    /// Creates a navigator over `layout` and attaches its tracker to `host`.
    #[must_use]
    pub fn new(host: Rc<H>, layout: SectionLayout<H::Scalar>) -> Self {
        let tracker = VisibilityTracker::attached(Rc::clone(&host), layout);
        Self { host, tracker }
    }

    /// Returns the host being driven.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the layout addresses are resolved against.
    #[must_use]
    pub fn layout(&self) -> &SectionLayout<H::Scalar> {
        self.tracker.layout()
    }

    /// Returns the visibility tracker, e.g. to register listeners.
    #[must_use]
    pub fn tracker(&self) -> &VisibilityTracker<H> {
        &self.tracker
    }

    /// Shorthand for [`VisibilityTracker::subscribe`].
    pub fn subscribe(&self, listener: SectionListener) {
        self.tracker.subscribe(listener);
    }

    /// Shorthand for [`VisibilityTracker::unsubscribe`].
    pub fn unsubscribe(&self, listener: &SectionListener) -> bool {
        self.tracker.unsubscribe(listener)
    }

    /// Returns `true` while at least one move started by this navigator is in flight.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.tracker.is_move_in_progress()
    }

    /// Detaches the tracker from the host and drops all listeners.
    ///
    /// Further moves still drive the host but are no longer reported.
    pub fn detach(&mut self) {
        self.tracker.detach();
    }

    /// Moves the host to the row containing `item_index` in `section_index`.
    ///
    /// Validation happens before the host is touched.
    ///
    /// # Errors
    ///
    /// Returns the [`NavigationError`] from
    /// [`SectionLayout::index_to_offset`] unchanged.
    pub async fn move_to_item(
        &self,
        section_index: usize,
        item_index: usize,
        transition: Transition,
    ) -> Result<MoveOutcome, NavigationError> {
        let offset = self.layout().index_to_offset(section_index, item_index)?;
        debug!(section_index, item_index, ?offset, ?transition, "moving to item");

        let _moving = self.tracker.begin_move();
        let outcome = match transition {
            Transition::Animated { duration, curve } if !transition.is_instant() => {
                self.host.animate_to(offset, duration, curve).await
            }
            Transition::Animated { .. } | Transition::Instant => {
                self.host.jump_to(offset);
                MoveOutcome::Settled
            }
        };
        debug!(section_index, item_index, ?outcome, "move finished");
        Ok(outcome)
    }

    /// Moves the host to the first item of `section_index`.
    ///
    /// # Errors
    ///
    /// As [`Navigator::move_to_item`] with item `0`; in particular an empty
    /// content section yields [`NavigationError::ItemOutOfRange`].
    pub async fn move_to_section(
        &self,
        section_index: usize,
        transition: Transition,
    ) -> Result<MoveOutcome, NavigationError> {
        self.move_to_item(section_index, 0, transition).await
    }

    /// Moves the host to `item_index` in the first content section.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NoContentSections`] if the layout has no content
    ///   section.
    /// - Otherwise as [`Navigator::move_to_item`].
    pub async fn move_to_first_content_section(
        &self,
        item_index: usize,
        transition: Transition,
    ) -> Result<MoveOutcome, NavigationError> {
        let section_index = self
            .layout()
            .first_content_section()
            .ok_or(NavigationError::NoContentSections)?;
        self.move_to_item(section_index, item_index, transition)
            .await
    }
}

impl<H: ScrollHost> fmt::Debug for Navigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("offset", &self.host.offset())
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}
