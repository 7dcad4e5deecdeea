//! Header border once the page is scrolled.

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use smart_core::config::HeaderConfig;
use web_sys::Element;

use crate::dom::Page;

const BORDER_CLASS: &str = "border-b";

/// Toggles `border-b` on the page `header` past a scroll threshold.
pub struct HeaderBorder {
    _listener: EventListener,
    header: Element,
}

fn update(page: &Page, header: &Element, threshold: f64) {
    let classes = header.class_list();
    let _ = if page.scroll_top() > threshold {
        classes.add_1(BORDER_CLASS)
    } else {
        classes.remove_1(BORDER_CLASS)
    };
}

impl HeaderBorder {
    /// Attach to the first `header`. Returns `None` without one.
    pub fn mount(page: &Page, config: &HeaderConfig) -> Option<Self> {
        let header = page.query("header")?;
        let threshold = config.border_threshold;

        let scroll_page = page.clone();
        let scroll_header = header.clone();
        let listener = EventListener::new_with_options(
            &page.window,
            "scroll",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_| update(&scroll_page, &scroll_header, threshold),
        );
        update(page, &header, threshold);

        Some(Self {
            _listener: listener,
            header,
        })
    }

    /// Whether the border is currently shown.
    pub fn has_border(&self) -> bool {
        self.header.class_list().contains(BORDER_CLASS)
    }
}
