//! Mobile sidebar drawer.

use std::{cell::RefCell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions};
use smart_core::{DrawerEvent, DrawerState, config::DrawerConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

use crate::dom::{self, Page};

const SIDEBAR: &str = "#left-sidebar, #sidebar, .sidebar";
const TRIGGERS: &str = "[data-sidebar-toggle], .sidebar-toggle, #sidebar-toggle, [aria-controls=\"sidebar\"]";
const CLOSERS: &str = "[data-sidebar-close]";
const OPEN_CLASS: &str = "sidebar-open";

struct Drawer {
    state: DrawerState,
    body: HtmlElement,
}

impl Drawer {
    fn dispatch(&mut self, event: DrawerEvent) {
        if self.state.apply(event) {
            let classes = self.body.class_list();
            let _ = if self.state.is_open() {
                classes.add_1(OPEN_CLASS)
            } else {
                classes.remove_1(OPEN_CLASS)
            };
            log::debug!("drawer {}", if self.state.is_open() { "opened" } else { "closed" });
        }
    }
}

/// The sidebar presented as an overlay on narrow viewports.
pub struct MobileDrawer {
    _listeners: Vec<EventListener>,
    drawer: Rc<RefCell<Drawer>>,
    backdrop: Element,
}

impl MobileDrawer {
    /// Attach to the page's sidebar. Returns `None` without one.
    pub fn mount(page: &Page, config: &DrawerConfig) -> Option<Self> {
        uncloak(page);

        let sidebar = page.query(SIDEBAR)?;
        let body = page.body().ok()?;
        let backdrop = match page.query(".sidebar-backdrop") {
            Some(existing) => existing,
            None => {
                let created = page.document.create_element("div").ok()?;
                created.set_class_name("sidebar-backdrop");
                body.append_child(&created).ok()?;
                created
            }
        };

        let drawer = Rc::new(RefCell::new(Drawer {
            state: DrawerState::new(page.inner_width(), config.desktop_breakpoint),
            body,
        }));
        let mut listeners = Vec::new();

        for trigger in page.query_all(TRIGGERS) {
            let drawer = Rc::clone(&drawer);
            listeners.push(EventListener::new_with_options(
                &trigger,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    drawer.borrow_mut().dispatch(DrawerEvent::Toggle);
                },
            ));
        }

        for closer in page.query_all(CLOSERS) {
            let drawer = Rc::clone(&drawer);
            listeners.push(EventListener::new_with_options(
                &closer,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    drawer.borrow_mut().dispatch(DrawerEvent::Close);
                },
            ));
        }

        let state = Rc::clone(&drawer);
        listeners.push(EventListener::new(&backdrop, "click", move |_| {
            state.borrow_mut().dispatch(DrawerEvent::BackdropClick);
        }));

        let state = Rc::clone(&drawer);
        listeners.push(EventListener::new(&page.document, "keydown", move |event| {
            if event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|e| e.key() == "Escape")
            {
                state.borrow_mut().dispatch(DrawerEvent::Escape);
            }
        }));

        let state = Rc::clone(&drawer);
        listeners.push(EventListener::new(&sidebar, "click", move |event| {
            if dom::closest(event.target(), "a").is_some() {
                state.borrow_mut().dispatch(DrawerEvent::LinkClick);
            }
        }));

        let state = Rc::clone(&drawer);
        let window = page.window.clone();
        listeners.push(EventListener::new(&page.window, "resize", move |_| {
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            state.borrow_mut().dispatch(DrawerEvent::Resize(width));
        }));

        log::debug!("mobile drawer mounted");
        Some(Self {
            _listeners: listeners,
            drawer,
            backdrop,
        })
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.drawer.borrow().state.is_open()
    }

    /// Feed an event to the drawer, as the DOM listeners do.
    pub fn dispatch(&self, event: DrawerEvent) {
        self.drawer.borrow_mut().dispatch(event);
    }

    /// The backdrop element behind the drawer.
    pub fn backdrop(&self) -> &Element {
        &self.backdrop
    }
}

/// Reveal elements hidden until scripts run.
fn uncloak(page: &Page) {
    for element in page.query_all("[x-cloak]") {
        let _ = element.remove_attribute("x-cloak");
        dom::remove_style(&element, "display");
    }
}
