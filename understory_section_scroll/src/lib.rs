// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_section_scroll --heading-base-level=0

//! Understory Section Scroll: scroll geometry for sectioned lists and grids.
//!
//! This crate maps a one-dimensional scroll offset in a long view made of
//! heterogeneous, fixed-size *sections* to a `(section, item)` address and
//! back, and keeps an external scroll position in sync with that address space.
//! It is renderer-agnostic and intended to sit underneath any UI stack's
//! scroll container.
//!
//! The core concepts are:
//!
//! - [`Scalar`]: a small abstraction over `f32`/`f64` used for extents,
//!   offsets, and scroll positions.
//! - [`Section`]: a spacer, an anchor, or a [`ContentSection`] of equally sized
//!   items packed `main_axis_count` to a row.
//! - [`SectionLayout`]: an ordered list of sections with prefix-summed offsets.
//!   It translates addresses to offsets ([`SectionLayout::index_to_offset`])
//!   and offsets to [`PositionInfo`] ([`SectionLayout::offset_to_position`]),
//!   and reports which sections overlap a viewport
//!   ([`SectionLayout::visible_sections`]).
//! - [`ScrollHost`]: the contract a scroll container implements: read the
//!   offset, jump or animate to an offset, and publish position changes.
//! - [`Navigator`]: moves a host to an address with a [`Transition`].
//! - [`VisibilityTracker`]: watches the host and tells listeners when the
//!   visible section changes, staying quiet while the navigator is moving.
//!
//! This crate deliberately does **not** render, measure, or animate anything.
//! Item sizes are declared up front; hosts own the actual scroll container and
//! its animations.
//!
//! ## Geometry
//!
//! ```rust
//! use understory_section_scroll::{Section, SectionLayout};
//!
//! let layout = SectionLayout::new(vec![
//!     Section::spacer(20.0_f64)?,
//!     Section::anchor(60.0)?,
//!     Section::spacer(10.0)?,
//!     // 100 rows of 80 units, 8 units apart.
//!     Section::content(100, 80.0, 8.0, 1)?,
//!     Section::spacer(20.0)?,
//! ]);
//!
//! assert_eq!(layout.index_to_offset(3, 5)?, 530.0);
//!
//! let position = layout.offset_to_position(530.0).unwrap();
//! assert_eq!(position.section_index, 3);
//! assert_eq!(position.item_index, Some(5));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Navigation and tracking
//!
//! A host only needs a readable offset, a way to move it, and change
//! notifications. Here is a host that applies every move immediately:
//!
//! ```rust
//! use core::future::{Ready, ready};
//! use core::time::Duration;
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use understory_section_scroll::{
//!     Curve, MoveOutcome, Navigator, PositionCallback, ScrollHost, Section, SectionLayout,
//!     SectionListener, Transition,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     offset: Cell<f64>,
//!     callbacks: RefCell<Vec<Option<PositionCallback<f64>>>>,
//! }
//!
//! impl Host {
//!     fn set(&self, offset: f64) {
//!         self.offset.set(offset);
//!         for callback in self.callbacks.borrow().iter().flatten() {
//!             callback(offset);
//!         }
//!     }
//! }
//!
//! impl ScrollHost for Host {
//!     type Scalar = f64;
//!     type Animation = Ready<MoveOutcome>;
//!     type Subscription = usize;
//!
//!     fn offset(&self) -> f64 {
//!         self.offset.get()
//!     }
//!     fn jump_to(&self, offset: f64) {
//!         self.set(offset);
//!     }
//!     fn animate_to(&self, offset: f64, _: Duration, _: Curve) -> Self::Animation {
//!         self.set(offset);
//!         ready(MoveOutcome::Settled)
//!     }
//!     fn on_position_changed(&self, callback: PositionCallback<f64>) -> usize {
//!         let mut callbacks = self.callbacks.borrow_mut();
//!         callbacks.push(Some(callback));
//!         callbacks.len() - 1
//!     }
//!     fn remove_position_changed(&self, subscription: usize) {
//!         self.callbacks.borrow_mut()[subscription] = None;
//!     }
//! }
//!
//! let layout = SectionLayout::new(vec![
//!     Section::anchor(60.0)?,
//!     Section::content(100, 80.0, 8.0, 1)?,
//!     Section::spacer(20.0)?,
//! ]);
//! let host = Rc::new(Host::default());
//! let navigator = Navigator::new(Rc::clone(&host), layout);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let listener: SectionListener = Rc::new(move |section| {
//!     sink.borrow_mut().push(section);
//!     Ok(())
//! });
//! navigator.subscribe(listener);
//!
//! pollster::block_on(navigator.move_to_item(1, 5, Transition::Instant))?;
//! assert_eq!(host.offset(), 60.0 + 5.0 * 88.0);
//! assert_eq!(*seen.borrow(), [1]);
//!
//! // User scrolling is reported too.
//! host.set(0.0);
//! assert_eq!(*seen.borrow(), [1, 0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! All extents and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels). Everything is single-threaded: hosts, trackers,
//! and navigators are shared through `Rc` and are not `Send`.
//!
//! ## Features
//!
//! - `std` *(default)*: forwards `std` to `tracing` and `thiserror`.
//!
//! Without `std` this crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod host;
mod layout;
mod navigator;
mod scalar;
mod section;
mod tracker;
mod visible;

pub use error::{LayoutError, ListenerError, NavigationError};
pub use host::{Curve, MoveOutcome, PositionCallback, ScrollHost, Transition};
pub use layout::{PositionInfo, SectionLayout};
pub use navigator::Navigator;
pub use scalar::Scalar;
pub use section::{ContentSection, Extent, Section, SectionKind};
pub use tracker::{SectionListener, VisibilityTracker};
pub use visible::VisibleSections;
