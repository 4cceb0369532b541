// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section values: spacers, anchors, and uniform content grids.
//!
//! A [`ContentSection`] packs a flat sequence of items into *rows* of
//! `main_axis_count` items each. Along the scroll axis every row occupies
//! `item_extent`, and consecutive rows are separated by `item_spacing`:
//!
//! - The offset of an item is the offset of its row.
//! - Rows are counted as `ceil(item_count / main_axis_count)`; a trailing,
//!   partially filled row still occupies a full `item_extent`.
//! - There is no spacing after the last row.
//!
//! Hosts interpret rows as either visual rows (vertical scrolling) or columns
//! (horizontal scrolling).

use core::fmt;
use core::num::NonZeroUsize;
use core::ops::Range;

use crate::{LayoutError, Scalar};

/// A validated, finite, non-negative extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent<S: Scalar>(S);

impl<S: Scalar> Extent<S> {
    /// Validates `value` as an extent.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidExtent`] if `value` is negative, NaN, or
    /// infinite.
    pub fn new(value: S) -> Result<Self, LayoutError> {
        if value.is_valid_extent() {
            // Normalize `-0.0` so that structural equality and display are stable.
            Ok(Self(value.clamp_non_negative()))
        } else {
            Err(LayoutError::InvalidExtent)
        }
    }

    /// The zero extent.
    #[must_use]
    pub fn zero() -> Self {
        Self(S::zero())
    }

    /// Returns the extent value.
    #[must_use]
    pub const fn get(self) -> S {
        self.0
    }
}

/// Discriminant of a [`Section`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// [`Section::Spacer`].
    Spacer,
    /// [`Section::Anchor`].
    Anchor,
    /// [`Section::Content`].
    Content,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spacer => "spacer",
            Self::Anchor => "anchor",
            Self::Content => "content",
        })
    }
}

/// One segment of a sectioned layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Section<S: Scalar> {
    /// Opaque space. Never a scroll target.
    Spacer(Extent<S>),
    /// A fixed marker region such as a header. Laid out like a spacer.
    Anchor(Extent<S>),
    /// A uniform grid of addressable items.
    Content(ContentSection<S>),
}

impl<S: Scalar> Section<S> {
    /// Creates a spacer of the given extent.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidExtent`] for negative or non-finite extents.
    pub fn spacer(extent: S) -> Result<Self, LayoutError> {
        Extent::new(extent).map(Self::Spacer)
    }

    /// Creates an anchor of the given extent.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidExtent`] for negative or non-finite extents.
    pub fn anchor(extent: S) -> Result<Self, LayoutError> {
        Extent::new(extent).map(Self::Anchor)
    }

    /// Creates a content section; see [`ContentSection::new`].
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`ContentSection::new`].
    pub fn content(
        item_count: usize,
        item_extent: S,
        item_spacing: S,
        main_axis_count: usize,
    ) -> Result<Self, LayoutError> {
        ContentSection::new(item_count, item_extent, item_spacing, main_axis_count)
            .map(Self::Content)
    }

    /// Returns which variant this is.
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::Spacer(_) => SectionKind::Spacer,
            Self::Anchor(_) => SectionKind::Anchor,
            Self::Content(_) => SectionKind::Content,
        }
    }

    /// Length of this section along the scroll axis.
    #[must_use]
    pub fn extent(&self) -> S {
        match self {
            Self::Spacer(extent) | Self::Anchor(extent) => extent.get(),
            Self::Content(content) => content.extent(),
        }
    }

    /// Returns the content section, if this is one.
    #[must_use]
    pub const fn as_content(&self) -> Option<&ContentSection<S>> {
        match self {
            Self::Content(content) => Some(content),
            Self::Spacer(_) | Self::Anchor(_) => None,
        }
    }
}

impl<S: Scalar> From<ContentSection<S>> for Section<S> {
    fn from(content: ContentSection<S>) -> Self {
        Self::Content(content)
    }
}

impl<S: Scalar> fmt::Display for Section<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spacer(extent) => write!(f, "spacer({})", extent.get()),
            Self::Anchor(extent) => write!(f, "anchor({})", extent.get()),
            Self::Content(content) => fmt::Display::fmt(content, f),
        }
    }
}

/// A block of `item_count` equally sized items packed into rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentSection<S: Scalar> {
    item_count: usize,
    item_extent: S,
    item_spacing: S,
    main_axis_count: NonZeroUsize,
}

impl<S: Scalar> ContentSection<S> {
    /// Creates a new content section.
    ///
    /// - `item_count` is the number of addressable items (may be zero).
    /// - `item_extent` is the extent of each row along the scroll axis.
    /// - `item_spacing` is the gap between consecutive rows.
    /// - `main_axis_count` is the number of items per row; use `1` for a list.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidItemExtent`] if `item_extent` is not a finite
    ///   value greater than zero.
    /// - [`LayoutError::InvalidSpacing`] if `item_spacing` is negative or not
    ///   finite.
    /// - [`LayoutError::ZeroMainAxisCount`] if `main_axis_count` is zero.
    pub fn new(
        item_count: usize,
        item_extent: S,
        item_spacing: S,
        main_axis_count: usize,
    ) -> Result<Self, LayoutError> {
        if !item_extent.is_valid_extent() || item_extent <= S::zero() {
            return Err(LayoutError::InvalidItemExtent);
        }
        if !item_spacing.is_valid_extent() {
            return Err(LayoutError::InvalidSpacing);
        }
        let main_axis_count =
            NonZeroUsize::new(main_axis_count).ok_or(LayoutError::ZeroMainAxisCount)?;
        Ok(Self {
            item_count,
            item_extent,
            item_spacing: item_spacing.clamp_non_negative(),
            main_axis_count,
        })
    }

    /// Number of items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns `true` if this section has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Extent of one row.
    #[must_use]
    pub const fn item_extent(&self) -> S {
        self.item_extent
    }

    /// Gap between consecutive rows.
    #[must_use]
    pub const fn item_spacing(&self) -> S {
        self.item_spacing
    }

    /// Number of items per row.
    #[must_use]
    pub const fn main_axis_count(&self) -> usize {
        self.main_axis_count.get()
    }

    /// Number of rows needed for all items: `ceil(item_count / main_axis_count)`.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.main_axis_count.get())
    }

    /// Distance between the starts of consecutive rows.
    #[must_use]
    pub fn row_stride(&self) -> S {
        self.item_extent + self.item_spacing
    }

    /// Total extent: every row plus the gaps between them.
    #[must_use]
    pub fn extent(&self) -> S {
        let rows = self.row_count();
        if rows == 0 {
            return S::zero();
        }
        S::from_usize(rows) * self.item_extent + S::from_usize(rows - 1) * self.item_spacing
    }

    /// Returns the row containing `item`.
    ///
    /// The result is `item / main_axis_count`; `item` is not bounds-checked.
    #[must_use]
    pub const fn row_of_item(&self, item: usize) -> usize {
        item / self.main_axis_count.get()
    }

    /// Returns the zero-based position of `item` within its row.
    ///
    /// The result is `item % main_axis_count`.
    #[must_use]
    pub const fn column_of_item(&self, item: usize) -> usize {
        item % self.main_axis_count.get()
    }

    /// Offset of the start of `row` from the start of this section.
    #[must_use]
    pub fn row_offset(&self, row: usize) -> S {
        S::from_usize(row) * self.row_stride()
    }

    /// Item indices that share `row`.
    ///
    /// Empty if `row` is past the last row.
    #[must_use]
    pub fn items_in_row(&self, row: usize) -> Range<usize> {
        let per_row = self.main_axis_count.get();
        let start = row.saturating_mul(per_row).min(self.item_count);
        let end = start.saturating_add(per_row).min(self.item_count);
        start..end
    }

    /// Returns the first item of the row at `offset` (relative to this section).
    ///
    /// The row is clamped into `0..row_count()`, so offsets before the section
    /// resolve to item `0` and offsets past it to the first item of the last
    /// row. An empty section always returns `0`.
    #[must_use]
    pub fn item_at_offset(&self, offset: S) -> usize {
        let rows = self.row_count();
        if rows == 0 {
            return 0;
        }
        let row = (offset.clamp_non_negative() / self.row_stride())
            .whole_steps()
            .min(rows - 1);
        (row * self.main_axis_count.get()).min(self.item_count - 1)
    }
}

impl<S: Scalar> fmt::Display for ContentSection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "content(items: {}, item_extent: {}, spacing: {}, per_row: {})",
            self.item_count, self.item_extent, self.item_spacing, self.main_axis_count
        )
    }
}
