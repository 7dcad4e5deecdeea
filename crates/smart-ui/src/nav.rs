//! Sidebar accordion over the server-rendered navigation lists.

use std::{cell::RefCell, rc::Rc};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use gloo_timers::callback::Timeout;
use smart_core::{LinkAction, NavKey, NavTree, NodeId, config::NavConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom::{self, Page};

const SIDEBARS: &str = "#left-sidebar, #sidebar, .sidebar";
const TOGGLE: &str = "button.nav-toggle";

struct Sidebar {
    tree: NavTree,
    /// `li` element of every node, indexed by `NodeId`.
    items: Vec<Element>,
}

impl Sidebar {
    fn sync(&self, changed: &[NodeId]) {
        for &id in changed {
            set_expanded(&self.items[id], self.tree.is_expanded(id));
        }
    }

    fn node_of(&self, li: &Element) -> Option<NodeId> {
        self.items.iter().position(|item| item == li)
    }

    fn update(&mut self, id: NodeId, f: impl FnOnce(&mut NavTree, NodeId) -> Vec<NodeId>) {
        let changed = f(&mut self.tree, id);
        self.sync(&changed);
    }
}

fn set_expanded(li: &Element, expanded: bool) {
    let _ = li.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
}

/// Accordion behaviour for every sidebar on the page.
pub struct SidebarAccordion {
    _listeners: Vec<EventListener>,
    _reveal: Vec<AnimationFrame>,
    sidebars: Vec<Rc<RefCell<Sidebar>>>,
}

impl SidebarAccordion {
    /// Attach to every sidebar. Returns `None` if the page has none.
    pub fn mount(page: &Page, config: &NavConfig) -> Option<Self> {
        let roots = page.query_all(SIDEBARS);
        if roots.is_empty() {
            log::debug!("no sidebar found, accordion disabled");
            return None;
        }

        let mut uid = 0usize;
        let mut listeners = Vec::new();
        let mut sidebars = Vec::new();
        let mut reveal = Vec::new();

        for root in roots {
            let (sidebar, branches) = scan(&root, config, &mut uid);
            let pending = {
                let mut sidebar = sidebar.borrow_mut();
                let pending = sidebar.tree.initialize();
                for id in sidebar.tree.branches() {
                    set_expanded(&sidebar.items[id], false);
                }
                pending
            };

            if !pending.is_empty() {
                let state = Rc::clone(&sidebar);
                let frame = request_animation_frame(move |_| {
                    let mut sidebar = state.borrow_mut();
                    let changed = sidebar.tree.reveal(&pending);
                    sidebar.sync(&changed);
                });
                reveal.push(frame);
            }

            for (id, anchor) in branches {
                listeners.push(link_click(page, &sidebar, id, &anchor, config));
                listeners.push(link_keydown(&sidebar, id, &anchor));
            }
            listeners.push(toggle_click(&sidebar, &root));
            log::debug!(
                "sidebar accordion mounted with {} branches",
                sidebar.borrow().tree.branches().count()
            );
            sidebars.push(sidebar);
        }

        Some(Self {
            _listeners: listeners,
            _reveal: reveal,
            sidebars,
        })
    }

    /// Number of sidebars being managed.
    pub fn sidebar_count(&self) -> usize {
        self.sidebars.len()
    }
}

/// Build the tree for one sidebar and prepare branch markup. Returns the
/// state plus the link of every branch.
fn scan(
    root: &Element,
    config: &NavConfig,
    uid: &mut usize,
) -> (Rc<RefCell<Sidebar>>, Vec<(NodeId, Element)>) {
    let mut tree = NavTree::new();
    let mut items: Vec<Element> = Vec::new();
    let mut branches = Vec::new();

    for li in dom::query_all_in(root, "li") {
        let parent = li
            .parent_element()
            .and_then(|p| p.closest("li").ok().flatten())
            .filter(|p| root.contains(Some(p.as_ref())))
            .and_then(|p| items.iter().position(|item| *item == p));

        let child_list = dom::query_in(&li, ":scope > ul");
        let anchor = dom::query_in(&li, ":scope > a, :scope > p > a");
        let is_current = li.class_list().contains("current")
            || anchor
                .as_ref()
                .is_some_and(|a| a.class_list().contains("current"));

        let branch = match (child_list, anchor) {
            (Some(list), Some(anchor)) => {
                let _ = list.remove_attribute("hidden");
                dom::remove_style(&list, "display");
                let _ = li.class_list().add_1("has-children");
                if list.id().is_empty() {
                    *uid += 1;
                    list.set_id(&format!("{}{}", config.branch_id_prefix, uid));
                }
                if let Some(button) =
                    dom::query_in(&li, ":scope > button.nav-toggle, :scope > a > button.nav-toggle")
                {
                    let _ = button.set_attribute("aria-controls", &list.id());
                }
                Some(anchor)
            }
            _ => None,
        };

        let id = tree.push(parent, branch.is_some(), is_current);
        items.push(li);
        if let Some(anchor) = branch {
            branches.push((id, anchor));
        }
    }

    (Rc::new(RefCell::new(Sidebar { tree, items })), branches)
}

/// Delegated chevron handler: toggles without navigating.
fn toggle_click(sidebar: &Rc<RefCell<Sidebar>>, root: &Element) -> EventListener {
    let state = Rc::clone(sidebar);
    EventListener::new_with_options(
        root,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(li) = dom::closest(event.target(), TOGGLE)
                .and_then(|button| button.closest("li").ok().flatten())
            else {
                return;
            };
            if !li.class_list().contains("has-children") {
                return;
            }
            let mut sidebar = state.borrow_mut();
            let Some(id) = sidebar.node_of(&li) else {
                return;
            };
            event.prevent_default();
            event.stop_propagation();
            sidebar.update(id, NavTree::toggle);
        },
    )
}

fn link_click(
    page: &Page,
    sidebar: &Rc<RefCell<Sidebar>>,
    id: NodeId,
    anchor: &Element,
    config: &NavConfig,
) -> EventListener {
    let state = Rc::clone(sidebar);
    let page = page.clone();
    let link = anchor.clone();
    let reveal_before_navigate = config.reveal_before_navigate;
    EventListener::new_with_options(
        anchor,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            // Chevrons nested in the link are handled by the sidebar listener.
            if dom::closest(event.target(), TOGGLE).is_some() {
                return;
            }
            let href = link.get_attribute("href").unwrap_or_default();
            match LinkAction::for_href(&href, reveal_before_navigate) {
                LinkAction::Navigate => {}
                LinkAction::Toggle => {
                    event.prevent_default();
                    event.stop_propagation();
                    state.borrow_mut().update(id, NavTree::toggle);
                }
                LinkAction::RevealThenNavigate => {
                    event.prevent_default();
                    event.stop_propagation();
                    state.borrow_mut().update(id, NavTree::expand);
                    let delay = page.duration_ms("--duration-normal", 500.0);
                    let location = page.window.location();
                    Timeout::new(delay as u32, move || {
                        let _ = location.set_href(&href);
                    })
                    .forget();
                }
            }
        },
    )
}

fn link_keydown(sidebar: &Rc<RefCell<Sidebar>>, id: NodeId, anchor: &Element) -> EventListener {
    let state = Rc::clone(sidebar);
    EventListener::new_with_options(
        anchor,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|e| NavKey::from_key(&e.key()))
            else {
                return;
            };
            event.prevent_default();
            event.stop_propagation();
            state
                .borrow_mut()
                .update(id, |tree, id| tree.apply_key(id, key));
        },
    )
}
