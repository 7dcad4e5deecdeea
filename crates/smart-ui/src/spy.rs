//! Table-of-contents highlighting.

use std::{cell::RefCell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_render::{AnimationFrame, request_animation_frame};
use smart_core::{ScrollSpy, TocHeading, config::ScrollSpyConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom::{self, Page};

const ACTIVE_CLASS: &str = "toc-active";
const ACTIVE_COLOR: &str = "hsl(var(--foreground))";

struct Tracked {
    element: Element,
    link: Element,
}

struct SpyState {
    page: Page,
    spy: ScrollSpy,
    /// Heading element and TOC link per heading id.
    tracked: Vec<(String, Tracked)>,
    links: Vec<Element>,
    /// Pending animation frame; `Some` while an update is scheduled.
    frame: Option<AnimationFrame>,
}

impl SpyState {
    fn update(&self) {
        let active = self
            .spy
            .active(self.page.viewport())
            .and_then(|heading| self.tracked.iter().find(|(id, _)| *id == heading.id))
            .map(|(_, tracked)| &tracked.link);

        for link in &self.links {
            let _ = link.class_list().remove_1(ACTIVE_CLASS);
            dom::remove_style(link, "color");
        }
        if let Some(link) = active {
            let _ = link.class_list().add_1(ACTIVE_CLASS);
            dom::set_styles(link, &[("color", ACTIVE_COLOR)]);
        }
    }

    fn remeasure(&mut self) {
        let tracked = &self.tracked;
        self.spy.remeasure(|id| {
            tracked
                .iter()
                .find(|(tracked_id, _)| tracked_id == id)
                .map(|(_, t)| offset_top(&t.element))
        });
    }

    fn active_id(&self) -> Option<String> {
        self.spy.active(self.page.viewport()).map(|h| h.id.clone())
    }
}

fn offset_top(element: &Element) -> f64 {
    element
        .dyn_ref::<HtmlElement>()
        .map(|e| f64::from(e.offset_top()))
        .unwrap_or_else(|| element.get_bounding_client_rect().top())
}

/// Highlights the TOC link of the heading nearest the scroll position.
pub struct TocScrollSpy {
    _listeners: Vec<EventListener>,
    state: Rc<RefCell<SpyState>>,
}

impl TocScrollSpy {
    /// Attach to `#right-sidebar`. Returns `None` if it is missing or links
    /// to no existing heading.
    pub fn mount(page: &Page, config: &ScrollSpyConfig) -> Option<Self> {
        let toc = page.document.get_element_by_id("right-sidebar")?;
        let links = dom::query_all_in(&toc, "a[href^=\"#\"]");

        let mut headings = Vec::new();
        let mut tracked = Vec::new();
        for link in &links {
            let Some(id) = link
                .get_attribute("href")
                .and_then(|href| href.strip_prefix('#').map(str::to_string))
            else {
                continue;
            };
            let Some(element) = page.document.get_element_by_id(&id) else {
                continue;
            };
            headings.push(TocHeading::new(id.clone(), offset_top(&element)));
            tracked.push((
                id,
                Tracked {
                    element,
                    link: link.clone(),
                },
            ));
        }
        if headings.is_empty() {
            log::debug!("table of contents has no resolvable headings");
            return None;
        }

        let state = Rc::new(RefCell::new(SpyState {
            page: page.clone(),
            spy: ScrollSpy::new(headings, *config),
            tracked,
            links,
            frame: None,
        }));

        let scroll_state = Rc::clone(&state);
        let on_scroll = EventListener::new_with_options(
            &page.window,
            "scroll",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_| schedule(&scroll_state),
        );

        let resize_state = Rc::clone(&state);
        let on_resize = EventListener::new(&page.window, "resize", move |_| {
            let mut state = resize_state.borrow_mut();
            state.remeasure();
            state.update();
        });

        state.borrow().update();
        log::debug!(
            "scroll-spy tracking {} headings",
            state.borrow().spy.headings().len()
        );

        Some(Self {
            _listeners: vec![on_scroll, on_resize],
            state,
        })
    }

    /// Id of the heading currently considered active.
    pub fn active_id(&self) -> Option<String> {
        self.state.borrow().active_id()
    }

    /// Recompute the highlight immediately.
    pub fn refresh(&self) {
        self.state.borrow().update();
    }
}

/// Coalesce scroll events into one update per animation frame. The update
/// reads the scroll position when the frame runs, so the latest position
/// always wins.
fn schedule(state: &Rc<RefCell<SpyState>>) {
    if state.borrow().frame.is_some() {
        return;
    }
    let pending = Rc::clone(state);
    let frame = request_animation_frame(move |_| {
        let mut state = pending.borrow_mut();
        state.update();
        state.frame = None;
    });
    state.borrow_mut().frame = Some(frame);
}
