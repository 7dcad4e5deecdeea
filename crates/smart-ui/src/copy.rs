//! "Copy URL" links with tooltip feedback.

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Promise, Reflect};
use smart_core::{CopyOutcome, CoreError, config::CopyConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, Event, HtmlDocument, HtmlLinkElement, HtmlTextAreaElement};

use crate::{
    dom::{self, Page},
    error::{DomError, Result},
};

const LINKS: &str = "a.copy-url";
const TOOLTIP_CLASS: &str = "show-tooltip";

/// The page's canonical URL, or the current location.
pub fn canonical_url(page: &Page) -> String {
    page.query("link[rel=\"canonical\"]")
        .and_then(|link| link.dyn_into::<HtmlLinkElement>().ok())
        .map(|link| link.href())
        .filter(|href| !href.is_empty())
        .or_else(|| page.window.location().href().ok())
        .unwrap_or_default()
}

/// `navigator.clipboard.writeText`, or `None` if the API is unavailable.
pub async fn write_clipboard(page: &Page, text: &str) -> Option<Result<()>> {
    let clipboard = Reflect::get(&page.window, &JsValue::from_str("navigator"))
        .and_then(|navigator| Reflect::get(&navigator, &JsValue::from_str("clipboard")))
        .ok()
        .filter(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;

    let written = match write_text.call1(&clipboard, &JsValue::from_str(text)) {
        Ok(promise) => JsFuture::from(Promise::resolve(&promise)).await.map(|_| ()),
        Err(err) => Err(err),
    };
    Some(written.map_err(DomError::from))
}

/// Copy through a hidden textarea and `execCommand("copy")`, restoring the
/// user's selection afterwards.
fn copy_with_selection(page: &Page, text: &str) -> Result<()> {
    let body = page.body()?;
    let area = page
        .document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| DomError::Missing("textarea"))?;
    area.set_value(text);
    area.set_attribute("readonly", "")?;
    dom::set_styles(
        &area,
        &[("position", "absolute"), ("left", "-9999px"), ("font-size", "12pt")],
    );
    body.append_child(&area)?;

    let selection = page.document.get_selection().ok().flatten();
    let saved = selection
        .as_ref()
        .filter(|s| s.range_count() > 0)
        .and_then(|s| s.get_range_at(0).ok());

    area.select();
    let _ = area.set_selection_range(0, area.value().encode_utf16().count() as u32);
    let copied = page
        .document
        .dyn_ref::<HtmlDocument>()
        .ok_or(DomError::Missing("HTML document"))
        .and_then(|doc| doc.exec_command("copy").map_err(DomError::from));
    area.remove();

    if let (Some(selection), Some(range)) = (selection, saved) {
        let _ = selection.remove_all_ranges();
        let _ = selection.add_range(&range);
    }

    if copied? {
        Ok(())
    } else {
        Err(CoreError::clipboard("execCommand copy failed").into())
    }
}

/// Copy `text`, falling back from the Clipboard API to a selection copy.
pub async fn copy_text(page: &Page, text: &str) -> CopyOutcome {
    let modern = write_clipboard(page, text)
        .await
        .map(|r| r.map_err(|e| CoreError::clipboard(e.to_string())));
    CopyOutcome::resolve(modern, || {
        copy_with_selection(page, text).map_err(|e| CoreError::clipboard(e.to_string()))
    })
}

async fn show_tooltip(link: Element, text: String, duration_ms: u32) {
    let _ = link.set_attribute("data-tooltip", &text);
    let _ = link.class_list().add_1(TOOLTIP_CLASS);
    TimeoutFuture::new(duration_ms).await;
    let _ = link.class_list().remove_1(TOOLTIP_CLASS);
}

/// Click and touch handlers for every `a.copy-url`.
pub struct CopyUrlLinks {
    _listeners: Vec<EventListener>,
}

impl CopyUrlLinks {
    /// Attach to the page's copy links. Returns `None` if there are none.
    pub fn mount(page: &Page, config: &CopyConfig) -> Option<Self> {
        let links = page.query_all(LINKS);
        if links.is_empty() {
            return None;
        }

        let listeners = links
            .iter()
            .flat_map(|link| {
                ["click", "touchend"].map(|event_type| {
                    let page = page.clone();
                    let config = config.clone();
                    let target = link.clone();
                    EventListener::new_with_options(
                        link,
                        event_type,
                        EventListenerOptions::enable_prevent_default(),
                        move |event: &Event| {
                            event.prevent_default();
                            event.stop_propagation();
                            let page = page.clone();
                            let config = config.clone();
                            let link = target.clone();
                            spawn_local(async move {
                                let url = canonical_url(&page);
                                let outcome = copy_text(&page, &url).await;
                                log::debug!("copy {url}: {outcome:?}");
                                let text = if outcome.is_success() {
                                    config.success_text
                                } else {
                                    config.failure_text
                                };
                                show_tooltip(link, text, config.tooltip_ms).await;
                            });
                        },
                    )
                })
            })
            .collect();

        log::debug!("copy-url attached to {} links", links.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}
