//! Typing animation in the search button.

use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::TimeoutFuture;
use smart_core::{
    Typewriter,
    config::PlaceholderConfig,
    placeholder::{LinkCandidate, build_placeholders},
};
use wasm_bindgen_futures::spawn_local;

use crate::dom::Page;

const TARGET: &str = ".DocSearch-Button-Placeholder";
const LINKS: &str = "#left-sidebar a, nav a, .toctree a";
const HEADINGS: &str = "h1, h2, .document-title, .page-title";

/// Placeholder texts derived from the page's navigation and headings.
pub fn placeholders(page: &Page, config: &PlaceholderConfig) -> Vec<String> {
    let links: Vec<(String, String)> = page
        .query_all(LINKS)
        .iter()
        .filter_map(|a| Some((a.get_attribute("href")?, a.text_content().unwrap_or_default())))
        .collect();
    let headings: Vec<String> = page
        .query_all(HEADINGS)
        .iter()
        .filter_map(|h| h.text_content())
        .collect();

    build_placeholders(
        links.iter().map(|(href, text)| LinkCandidate {
            href: href.as_str(),
            text: text.as_str(),
        }),
        headings.iter().map(String::as_str),
        config,
    )
}

async fn animate(page: Page, config: PlaceholderConfig) {
    let target = loop {
        if let Some(target) = page.query(TARGET) {
            break target;
        }
        TimeoutFuture::new(config.retry_ms).await;
    };

    let texts = placeholders(&page, &config);
    log::debug!("search placeholder cycling through {} texts", texts.len());
    let mut typewriter = Typewriter::new(texts, &config);
    loop {
        let frame = typewriter.tick();
        target.set_text_content(Some(&frame.text));
        TimeoutFuture::new(frame.delay_ms).await;
    }
}

/// The running animation. Dropping it stops the animation.
pub struct SearchPlaceholder {
    handle: AbortHandle,
}

impl SearchPlaceholder {
    /// Start animating once the search button is rendered.
    pub fn start(page: &Page, config: &PlaceholderConfig) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(animate(page.clone(), config.clone()), registration);
        spawn_local(async move {
            let _ = task.await;
        });
        Self { handle }
    }
}

impl Drop for SearchPlaceholder {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
