//! Eased scrolling to in-page anchors.
//!
//! Every scroll is an async operation that resolves with a
//! [`ScrollOutcome`]. Starting a new scroll cancels the animation in flight,
//! which then resolves as [`ScrollOutcome::Superseded`].

use std::{cell::RefCell, future::Future, rc::Rc};

use futures::channel::oneshot;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use smart_core::{
    ScrollOutcome, ScrollPlan,
    config::AnchorConfig,
    scroll::header_clearance,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

use crate::dom::Page;

struct Running {
    generation: u64,
    frame: Option<AnimationFrame>,
    done: Option<oneshot::Sender<ScrollOutcome>>,
}

impl Running {
    fn finish(mut self, outcome: ScrollOutcome) {
        if let Some(done) = self.done.take() {
            let _ = done.send(outcome);
        }
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    running: Option<Running>,
}

/// Drives eased scroll animations, one at a time.
#[derive(Clone)]
pub struct Scroller {
    page: Page,
    config: AnchorConfig,
    slot: Rc<RefCell<Slot>>,
}

impl Scroller {
    /// Create a scroller for the page.
    pub fn new(page: &Page, config: &AnchorConfig) -> Self {
        Self {
            page: page.clone(),
            config: *config,
            slot: Rc::new(RefCell::new(Slot::default())),
        }
    }

    /// Space kept free above scroll targets for the fixed header.
    pub fn clearance(&self) -> f64 {
        let header = self
            .page
            .query("header")
            .map(|h| h.get_bounding_client_rect().height());
        header_clearance(
            self.page
                .length_px("--header-offset", self.config.header_offset_px),
            self.page
                .length_px("--anchor-offset-extra", self.config.extra_offset_px),
            header,
        )
    }

    /// Plan a scroll to `element`, honouring reduced motion.
    pub fn plan_to(&self, element: &Element) -> ScrollPlan {
        ScrollPlan::to_element(
            self.page.scroll_top(),
            self.page.document_top(element),
            self.clearance(),
            self.page.max_scroll(),
            self.page
                .duration_ms("--duration-slow", self.config.base_duration_ms),
            self.page.prefers_reduced_motion(),
            &self.config,
        )
    }

    /// Cancel the animation in flight, if any.
    pub fn cancel(&self) {
        let previous = self.slot.borrow_mut().running.take();
        if let Some(running) = previous {
            log::debug!("scroll animation superseded");
            running.finish(ScrollOutcome::Superseded);
        }
    }

    /// Run a scroll plan. The returned future resolves once the target is
    /// reached or a newer scroll took over.
    pub fn run(&self, plan: ScrollPlan) -> impl Future<Output = ScrollOutcome> + use<> {
        self.cancel();
        let (done, finished) = oneshot::channel();

        if plan.is_instant() {
            self.page.jump_to(plan.target);
            let _ = done.send(ScrollOutcome::Completed);
        } else {
            let generation = {
                let mut slot = self.slot.borrow_mut();
                slot.generation += 1;
                slot.running = Some(Running {
                    generation: slot.generation,
                    frame: None,
                    done: Some(done),
                });
                slot.generation
            };
            step(
                Rc::clone(&self.slot),
                self.page.clone(),
                plan,
                self.page.now(),
                generation,
            );
        }

        async move { finished.await.unwrap_or(ScrollOutcome::Superseded) }
    }
}

fn step(slot: Rc<RefCell<Slot>>, page: Page, plan: ScrollPlan, start: f64, generation: u64) {
    let next = Rc::clone(&slot);
    let frame = request_animation_frame(move |now| {
        if next.borrow().generation != generation {
            return;
        }
        let (y, done) = plan.sample(now - start);
        page.jump_to(y);
        if done {
            let finished = next.borrow_mut().running.take();
            if let Some(running) = finished {
                running.finish(ScrollOutcome::Completed);
            }
        } else {
            step(Rc::clone(&next), page, plan, start, generation);
        }
    });

    let mut slot = slot.borrow_mut();
    if let Some(running) = slot
        .running
        .as_mut()
        .filter(|r| r.generation == generation)
    {
        running.frame = Some(frame);
    }
}

/// Intercepts same-page link clicks and scrolls with an eased curve.
pub struct AnchorScroller {
    _listeners: Vec<EventListener>,
    _initial: Option<AnimationFrame>,
    scroller: Scroller,
}

impl AnchorScroller {
    /// Attach to every `a[href^="#"]` and correct an initial hash position.
    pub fn mount(page: &Page, config: &AnchorConfig) -> Self {
        let scroller = Scroller::new(page, config);
        let listeners = page
            .query_all("a[href^=\"#\"]")
            .iter()
            .map(|link| {
                let scroller = scroller.clone();
                let link_href = link.get_attribute("href").unwrap_or_default();
                EventListener::new_with_options(
                    link,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| on_anchor_click(&scroller, &link_href, event),
                )
            })
            .collect();

        Self {
            _initial: correct_initial_hash(&scroller),
            _listeners: listeners,
            scroller,
        }
    }

    /// Scroll to the element with `id`. Returns `None` if it does not exist.
    pub fn scroll_to_id(&self, id: &str) -> Option<impl Future<Output = ScrollOutcome> + use<>> {
        let target = self.scroller.page.document.get_element_by_id(id)?;
        Some(self.scroller.run(self.scroller.plan_to(&target)))
    }

    /// The underlying scroller.
    pub fn scroller(&self) -> &Scroller {
        &self.scroller
    }
}

fn on_anchor_click(scroller: &Scroller, href: &str, event: &Event) {
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        return;
    };
    let Some(target) = scroller.page.document.get_element_by_id(id) else {
        return;
    };
    event.prevent_default();

    let plan = scroller.plan_to(&target);
    log::debug!(
        "scrolling to #{id}: {:.0} -> {:.0} over {:.0}ms",
        plan.start,
        plan.target,
        plan.duration_ms
    );
    let finished = scroller.run(plan);
    let history = scroller.page.window.history();
    let fragment = format!("#{id}");
    spawn_local(async move {
        if finished.await == ScrollOutcome::Completed
            && let Ok(history) = history
        {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&fragment));
        }
    });
}

/// Re-align an initial `#fragment` below the fixed header on the next frame.
fn correct_initial_hash(scroller: &Scroller) -> Option<AnimationFrame> {
    let hash = scroller.page.window.location().hash().ok()?;
    let raw = hash.strip_prefix('#').filter(|h| !h.is_empty())?;
    let id: String = js_sys::decode_uri_component(raw)
        .map(String::from)
        .unwrap_or_else(|_| raw.to_string());
    let target = scroller.page.document.get_element_by_id(&id)?;

    let scroller = scroller.clone();
    Some(request_animation_frame(move |_| {
        let top = scroller.page.document_top(&target);
        let y = (top - scroller.clearance()).max(0.0);
        scroller.cancel();
        scroller.page.jump_to(y);
        log::debug!("initial hash #{id} corrected to {y:.0}");
    }))
}
