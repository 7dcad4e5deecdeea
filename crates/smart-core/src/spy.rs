//! Table-of-contents scroll-spy.
//!
//! Picks the heading nearest the current scroll position.

use crate::config::ScrollSpyConfig;

/// A heading tracked by the scroll-spy.
#[derive(Debug, Clone, PartialEq)]
pub struct TocHeading {
    /// Anchor id of the heading element.
    pub id: String,

    /// Vertical document offset of the heading (px).
    pub offset: f64,
}

impl TocHeading {
    /// Create a new heading entry.
    pub fn new(id: impl Into<String>, offset: f64) -> Self {
        Self {
            id: id.into(),
            offset,
        }
    }
}

/// Scroll metrics sampled from the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll position.
    pub scroll_top: f64,

    /// Inner height of the window.
    pub window_height: f64,

    /// Total scrollable height of the document.
    pub document_height: f64,
}

/// Ordered headings plus the thresholds used to pick the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSpy {
    headings: Vec<TocHeading>,
    thresholds: ScrollSpyConfig,
}

impl ScrollSpy {
    /// Build a spy. Headings are sorted by document offset.
    pub fn new(mut headings: Vec<TocHeading>, thresholds: ScrollSpyConfig) -> Self {
        headings.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self {
            headings,
            thresholds,
        }
    }

    /// Headings in document order.
    pub fn headings(&self) -> &[TocHeading] {
        &self.headings
    }

    /// Whether there is nothing to track.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Replace the offsets after a layout change, keeping ids.
    ///
    /// `offset_of` returns `None` for headings that left the document; those
    /// keep their previous offset.
    pub fn remeasure(&mut self, mut offset_of: impl FnMut(&str) -> Option<f64>) {
        for heading in &mut self.headings {
            if let Some(offset) = offset_of(&heading.id) {
                heading.offset = offset;
            }
        }
        self.headings.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    }

    /// Index of the active heading, if any.
    pub fn active_index(&self, viewport: Viewport) -> Option<usize> {
        let t = &self.thresholds;
        if self.headings.is_empty() || viewport.scroll_top < t.top_threshold {
            return None;
        }

        let near_bottom = viewport.scroll_top + viewport.window_height
            >= viewport.document_height - t.bottom_margin;
        if near_bottom {
            return Some(self.headings.len() - 1);
        }

        let reach = viewport.scroll_top + t.header_offset;
        self.headings
            .iter()
            .rposition(|h| reach >= h.offset - t.lookahead)
    }

    /// The active heading, if any.
    pub fn active(&self, viewport: Viewport) -> Option<&TocHeading> {
        self.active_index(viewport).map(|i| &self.headings[i])
    }
}
