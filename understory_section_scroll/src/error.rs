// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::boxed::Box;

use crate::SectionKind;

/// A section or layout was configured with an invalid value.
///
/// Returned by the fallible constructors of [`Section`](crate::Section),
/// [`ContentSection`](crate::ContentSection), and
/// [`SectionLayout`](crate::SectionLayout). Invalid values are never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A spacer, anchor, or leading anchor extent was negative or not finite.
    #[error("extent must be finite and non-negative")]
    InvalidExtent,
    /// A content section's item spacing was negative or not finite.
    #[error("item spacing must be finite and non-negative")]
    InvalidSpacing,
    /// A content section's item extent was zero, negative, or not finite.
    #[error("item extent must be finite and greater than zero")]
    InvalidItemExtent,
    /// A content section was configured with zero items per row.
    #[error("main axis count must be at least one")]
    ZeroMainAxisCount,
}

/// A `(section, item)` address could not be resolved to an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// The section index is past the end of the layout.
    #[error("section {index} is out of range for a layout of {len} sections")]
    SectionOutOfRange {
        /// Requested section index.
        index: usize,
        /// Number of sections in the layout.
        len: usize,
    },
    /// The section exists but is not a content section.
    #[error("section {index} is a {kind} section and cannot be targeted by item")]
    NotContent {
        /// Requested section index.
        index: usize,
        /// What the section actually is.
        kind: SectionKind,
    },
    /// The item index is past the end of the content section.
    #[error("item {item} is out of range for section {section} with {count} items")]
    ItemOutOfRange {
        /// Section that was targeted.
        section: usize,
        /// Requested item index.
        item: usize,
        /// Number of items in the section.
        count: usize,
    },
    /// The layout has no content section to navigate into.
    #[error("layout has no content sections")]
    NoContentSections,
}

/// Error returned by a section listener.
///
/// Listener errors are logged and discarded by the
/// [`VisibilityTracker`](crate::VisibilityTracker); they never reach the host.
pub type ListenerError = Box<dyn core::error::Error + 'static>;
