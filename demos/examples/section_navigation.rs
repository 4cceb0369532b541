// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigating a sectioned feed and watching the visible section.
//!
//! This example shows how to:
//! - describe a feed as spacers, anchors, and content grids,
//! - move a host to items and sections with a `Navigator`,
//! - observe section changes from both navigation and user drags,
//! - ask the layout which sections a viewport overlaps.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_section_scroll_demos --example section_navigation`

use std::rc::Rc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_section_scroll::{
    Curve, Navigator, ScrollHost, Section, SectionLayout, SectionListener, Transition,
};
use understory_section_scroll_demos::HeadlessHost;

const VIEWPORT: f64 = 640.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Header, a pinned title, a photo grid, a divider, a comment list, footer.
    let layout = SectionLayout::with_leading_anchor(
        vec![
            Section::spacer(24.0)?,
            Section::anchor(56.0)?,
            Section::content(30, 120.0, 4.0, 3)?,
            Section::spacer(16.0)?,
            Section::anchor(48.0)?,
            Section::content(200, 72.0, 1.0, 1)?,
            Section::spacer(96.0)?,
        ],
        32.0,
    )?;
    for (index, section) in layout.sections().iter().enumerate() {
        info!(index, %section, offset = ?layout.section_offset(index), "section");
    }
    info!(total = layout.total_extent(), "layout ready");

    let host = HeadlessHost::new();
    let navigator = Navigator::new(Rc::clone(&host), layout);

    let listener: SectionListener = {
        let host = Rc::clone(&host);
        Rc::new(move |section| {
            info!(section, offset = host.offset(), "now showing section");
            Ok(())
        })
    };
    navigator.subscribe(listener);
    navigator.tracker().refresh();

    let glide = Transition::animated(Duration::from_millis(350), Curve::EaseInOut);
    pollster::block_on(async {
        navigator.move_to_first_content_section(7, glide).await?;
        navigator.move_to_section(5, Transition::Instant).await?;
        navigator.move_to_item(5, 150, glide).await?;
        // Anchors hold no items.
        if let Err(error) = navigator.move_to_item(4, 0, glide).await {
            info!(%error, "rejected move");
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    })?;

    host.drag_to(100.0);

    let visible = navigator
        .layout()
        .visible_sections(host.offset(), VIEWPORT, 0.0, 0.0);
    info!(
        sections = ?visible.indices(),
        before = visible.before_extent,
        after = visible.after_extent,
        "visible at rest"
    );
    Ok(())
}
