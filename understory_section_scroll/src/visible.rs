// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which sections a virtualized host has to realize for a viewport.

use core::ops::Range;

use crate::{Scalar, SectionLayout};

/// Result of a visibility query over a [`SectionLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSections<S: Scalar> {
    /// First visible section (inclusive).
    pub start: usize,
    /// One past the last visible section (exclusive).
    pub end: usize,

    /// Offset of `start`, including the leading anchor.
    pub before_extent: S,
    /// Total extent of sections after `end`.
    pub after_extent: S,
    /// Total extent of the layout, including the leading anchor.
    pub content_extent: S,
}

impl<S: Scalar> VisibleSections<S> {
    fn empty(before_extent: S, content_extent: S) -> Self {
        Self {
            start: 0,
            end: 0,
            before_extent,
            after_extent: (content_extent - before_extent).max(S::zero()),
            content_extent,
        }
    }

    /// Returns `true` if no section is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The visible section indices.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl<S: Scalar> SectionLayout<S> {
    /// Computes the sections overlapping a viewport.
    ///
    /// - `scroll_offset`: start of the viewport in layout coordinates.
    /// - `viewport_extent`: size of the viewport.
    /// - `overscan_before` / `overscan_after`: extra margin realized before and
    ///   after the viewport to reduce popping.
    ///
    /// Negative inputs are treated as zero. Hosts instantiate sections
    /// `start..end` and pad with `before_extent` and `after_extent`.
    #[must_use]
    pub fn visible_sections(
        &self,
        scroll_offset: S,
        viewport_extent: S,
        overscan_before: S,
        overscan_after: S,
    ) -> VisibleSections<S> {
        let content_extent = self.total_extent();
        let len = self.len();
        if len == 0 || content_extent <= S::zero() {
            return VisibleSections::empty(S::zero(), content_extent.max(S::zero()));
        }

        let scroll_offset = scroll_offset.clamp_non_negative();
        let min = (scroll_offset - overscan_before.clamp_non_negative()).max(S::zero());
        let max = (scroll_offset
            + viewport_extent.clamp_non_negative()
            + overscan_after.clamp_non_negative())
        .min(content_extent);

        if max <= min {
            // Zero-sized viewport, or scrolled past all content.
            return VisibleSections::empty(min, content_extent);
        }

        let Some(start) = self.section_at_offset(min) else {
            return VisibleSections::empty(S::zero(), content_extent);
        };

        let mut end = start;
        while end < len && self.section_offset(end).is_some_and(|offset| offset < max) {
            end += 1;
        }
        if end == start {
            // The range only covers the leading anchor.
            return VisibleSections::empty(min, content_extent);
        }

        let before_extent = self.section_offset(start).unwrap_or_else(S::zero);
        let end_start = self.section_offset(end).unwrap_or(content_extent);
        VisibleSections {
            start,
            end,
            before_extent,
            after_extent: (content_extent - end_start).max(S::zero()),
            content_extent,
        }
    }
}
