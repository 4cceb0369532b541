// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An ordered sequence of sections with eagerly computed prefix sums.

use alloc::vec::Vec;

use crate::{ContentSection, Extent, LayoutError, NavigationError, Scalar, Section};

/// Where an offset lands in a [`SectionLayout`].
///
/// Produced on demand by [`SectionLayout::offset_to_position`]; it is a
/// snapshot and is not kept in sync with later scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionInfo<S: Scalar> {
    /// Index of the section containing the offset.
    pub section_index: usize,
    /// First item of the row containing the offset.
    ///
    /// `None` for spacers and anchors. For a content section with no items
    /// this is `Some(0)`; check [`ContentSection::item_count`] before using it.
    pub item_index: Option<usize>,
    /// The section itself.
    pub section: Section<S>,
}

/// An immutable, ordered list of [`Section`]s laid out end to end.
///
/// An optional leading anchor extent precedes the first section, shifting
/// every offset in the layout by that amount.
///
/// Offsets are resolved through prefix sums computed once at construction.
/// Equality is structural.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout<S: Scalar> {
    sections: Vec<Section<S>>,
    leading_anchor: Extent<S>,
    // `section_ends[i]` is the offset one past the end of section `i`.
    section_ends: Vec<S>,
}

impl<S: Scalar> SectionLayout<S> {
    /// Creates a layout without a leading anchor.
    #[must_use]
    pub fn new(sections: Vec<Section<S>>) -> Self {
        Self::from_parts(sections, Extent::zero())
    }

    /// Creates a layout whose first section starts at `leading_anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidExtent`] if `leading_anchor` is negative
    /// or not finite.
    pub fn with_leading_anchor(
        sections: Vec<Section<S>>,
        leading_anchor: S,
    ) -> Result<Self, LayoutError> {
        Ok(Self::from_parts(sections, Extent::new(leading_anchor)?))
    }

    fn from_parts(sections: Vec<Section<S>>, leading_anchor: Extent<S>) -> Self {
        let mut section_ends = Vec::with_capacity(sections.len());
        let mut pos = leading_anchor.get();
        for section in &sections {
            pos = pos + section.extent();
            section_ends.push(pos);
        }
        Self {
            sections,
            leading_anchor,
            section_ends,
        }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the layout has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All sections in order.
    #[must_use]
    pub fn sections(&self) -> &[Section<S>] {
        &self.sections
    }

    /// Returns the section at `index`, if any.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section<S>> {
        self.sections.get(index)
    }

    /// Extent that precedes the first section.
    #[must_use]
    pub fn leading_anchor(&self) -> S {
        self.leading_anchor.get()
    }

    /// Total extent of the layout, including the leading anchor.
    #[must_use]
    pub fn total_extent(&self) -> S {
        self.section_ends
            .last()
            .copied()
            .unwrap_or_else(|| self.leading_anchor.get())
    }

    /// Offset of the start of section `index`, or `None` if out of range.
    #[must_use]
    pub fn section_offset(&self, index: usize) -> Option<S> {
        (index < self.sections.len()).then(|| self.start_of(index))
    }

    // Callers guarantee `index <= len`.
    fn start_of(&self, index: usize) -> S {
        if index == 0 {
            self.leading_anchor.get()
        } else {
            self.section_ends[index - 1]
        }
    }

    /// Iterates content sections together with their layout indices.
    pub fn content_sections(&self) -> impl Iterator<Item = (usize, &ContentSection<S>)> {
        self.sections
            .iter()
            .enumerate()
            .filter_map(|(index, section)| section.as_content().map(|content| (index, content)))
    }

    /// Index of the first content section, if there is one.
    #[must_use]
    pub fn first_content_section(&self) -> Option<usize> {
        self.content_sections().next().map(|(index, _)| index)
    }

    /// Index of the section containing `offset`.
    ///
    /// This is the first section whose end lies past `offset`, so zero-extent
    /// sections are never hit unless they are last. Offsets past the end
    /// resolve to the last section and negative offsets to the first.
    /// Returns `None` only for an empty layout.
    #[must_use]
    pub fn section_at_offset(&self, offset: S) -> Option<usize> {
        let last = self.sections.len().checked_sub(1)?;
        let offset = offset.clamp_non_negative();
        let index = self.section_ends.partition_point(|end| *end <= offset);
        Some(index.min(last))
    }

    /// Offset of the row containing `item_index` in section `section_index`.
    ///
    /// All items of one row share the same offset.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::SectionOutOfRange`] if `section_index >= len()`.
    /// - [`NavigationError::NotContent`] if the section is a spacer or anchor.
    /// - [`NavigationError::ItemOutOfRange`] if `item_index` is not below the
    ///   section's item count.
    pub fn index_to_offset(
        &self,
        section_index: usize,
        item_index: usize,
    ) -> Result<S, NavigationError> {
        let section =
            self.sections
                .get(section_index)
                .ok_or(NavigationError::SectionOutOfRange {
                    index: section_index,
                    len: self.sections.len(),
                })?;
        let content = section.as_content().ok_or(NavigationError::NotContent {
            index: section_index,
            kind: section.kind(),
        })?;
        if item_index >= content.item_count() {
            return Err(NavigationError::ItemOutOfRange {
                section: section_index,
                item: item_index,
                count: content.item_count(),
            });
        }
        let row = content.row_of_item(item_index);
        Ok(self.start_of(section_index) + content.row_offset(row))
    }

    /// Resolves `offset` to a section and, for content sections, an item.
    ///
    /// Never fails for a non-empty layout: offsets past the end clamp to the
    /// last section (and its last row), which keeps overscroll and flings
    /// addressable. Returns `None` for an empty layout.
    #[must_use]
    pub fn offset_to_position(&self, offset: S) -> Option<PositionInfo<S>> {
        let section_index = self.section_at_offset(offset)?;
        let section = self.sections[section_index];
        let item_index = section.as_content().map(|content| {
            let row = self.row_at(section_index, content, offset.clamp_non_negative());
            content.items_in_row(row).start
        });
        Some(PositionInfo {
            section_index,
            item_index,
            section,
        })
    }

    /// Row of `content` (at `section_index`) containing the absolute `offset`.
    ///
    /// The floor division is only an estimate under rounding; the result is
    /// settled against the same sums [`SectionLayout::index_to_offset`]
    /// produces, so every row start maps back to its own row.
    fn row_at(&self, section_index: usize, content: &ContentSection<S>, offset: S) -> usize {
        let start = self.start_of(section_index);
        let rows = content.row_count();
        let mut row = content.row_of_item(content.item_at_offset(offset - start));
        while row + 1 < rows && start + content.row_offset(row + 1) <= offset {
            row += 1;
        }
        while row > 0 && start + content.row_offset(row) > offset {
            row -= 1;
        }
        row
    }
}

impl<S: Scalar> FromIterator<Section<S>> for SectionLayout<S> {
    fn from_iter<I: IntoIterator<Item = Section<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
