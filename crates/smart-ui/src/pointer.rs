//! Pressed-state feedback for touch and mouse.

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use web_sys::Element;

use crate::dom::Page;

const INTERACTIVE: &str = ".sd-card, .admonition, a:not(.headerlink), button";
const ACTIVE_CLASS: &str = "is-active";

const PASSIVE: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: true,
};

fn listen(element: &Element, event_type: &'static str, active: bool) -> EventListener {
    let target = element.clone();
    EventListener::new_with_options(element, event_type, PASSIVE, move |_| {
        let classes = target.class_list();
        let _ = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
    })
}

/// `is-active` on interactive elements while a pointer presses them.
pub struct PointerActive {
    _listeners: Vec<EventListener>,
}

impl PointerActive {
    /// Attach to cards, admonitions, links and buttons.
    pub fn mount(page: &Page) -> Self {
        let listeners = page
            .query_all(INTERACTIVE)
            .iter()
            .flat_map(|element| {
                [
                    listen(element, "pointerdown", true),
                    listen(element, "pointerup", false),
                    listen(element, "pointerleave", false),
                    listen(element, "blur", false),
                ]
            })
            .collect();
        Self {
            _listeners: listeners,
        }
    }
}
