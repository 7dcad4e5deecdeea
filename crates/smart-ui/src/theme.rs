//! Smooth colour fade when switching themes.

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_render::request_animation_frame;
use gloo_timers::callback::Timeout;
use smart_core::{TransitionTiming, theme::is_fade_property};
use wasm_bindgen::JsCast;
use web_sys::TransitionEvent;

use crate::{dom::Page, error::Result};

const TRANSITION_CLASS: &str = "theme-transition";

/// Resolves on the next animation frame.
pub async fn next_frame() -> f64 {
    let (tx, rx) = oneshot::channel();
    let _frame = request_animation_frame(move |timestamp| {
        let _ = tx.send(timestamp);
    });
    rx.await.unwrap_or_default()
}

#[derive(Default)]
struct Settle {
    timer: Option<Timeout>,
    done: Option<oneshot::Sender<()>>,
}

/// Replace the pending timer. Whichever timer fires last ends the fade.
fn arm(settle: &Rc<RefCell<Settle>>, millis: u32) {
    let fired = Rc::clone(settle);
    let timer = Timeout::new(millis, move || {
        if let Some(done) = fired.borrow_mut().done.take() {
            let _ = done.send(());
        }
    });
    settle.borrow_mut().timer = Some(timer);
}

/// Switch `data-theme` on the root element to `mode` while the
/// `theme-transition` class is applied.
///
/// The class is removed once colour transitions have been quiet for the
/// debounce period, or when the fallback timer fires first. `max_wait_ms`
/// overrides the fallback.
pub async fn apply_theme(page: &Page, mode: &str, max_wait_ms: Option<f64>) -> Result<()> {
    let root = page.root()?;
    let timing = TransitionTiming::new(page.duration_ms("--duration-normal", 500.0), max_wait_ms);

    root.class_list().add_1(TRANSITION_CLASS)?;
    next_frame().await;
    root.set_attribute("data-theme", mode)?;

    let (done, settled) = oneshot::channel();
    let settle = Rc::new(RefCell::new(Settle {
        timer: None,
        done: Some(done),
    }));

    let on_end = {
        let settle = Rc::clone(&settle);
        let debounce = timing.debounce_ms;
        EventListener::new_with_options(
            &root,
            "transitionend",
            EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: true,
            },
            move |event| {
                if event
                    .dyn_ref::<TransitionEvent>()
                    .is_some_and(|e| is_fade_property(&e.property_name()))
                {
                    arm(&settle, debounce);
                }
            },
        )
    };
    arm(&settle, timing.fallback_ms);

    let _ = settled.await;
    drop(on_end);
    settle.borrow_mut().timer = None;
    root.class_list().remove_1(TRANSITION_CLASS)?;
    log::debug!("theme switched to {mode}");
    Ok(())
}
