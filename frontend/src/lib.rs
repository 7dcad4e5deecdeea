//! WebAssembly entry point.
//!
//! Loaded by the theme's layout template. Mounts every enhancement once the
//! document is parsed and exposes a few helpers to inline scripts.

use std::cell::RefCell;

use gloo_events::EventListener;
use smart_core::{ScrollOutcome, ThemeConfig};
use smart_ui::{Enhancements, Page};
use wasm_bindgen::prelude::*;

thread_local! {
    static ENHANCEMENTS: RefCell<Option<Enhancements>> = const { RefCell::new(None) };
    static CONFIG: RefCell<ThemeConfig> = RefCell::new(ThemeConfig::default());
}

fn mount(page: &Page) {
    ENHANCEMENTS.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return;
        }
        let config = CONFIG.with(|c| c.borrow().clone());
        *slot = Enhancements::mount(page, &config);
    });
}

fn is_loading(page: &Page) -> bool {
    js_sys::Reflect::get(&page.document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading")
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let page = match Page::current() {
        Ok(page) => page,
        Err(err) => {
            _ = console_log::init_with_level(log::Level::Info);
            log::error!("theme enhancements disabled: {err}");
            return;
        }
    };

    let config = smart_ui::load_config(&page);
    _ = console_log::init_with_level(config.log_level.into());
    CONFIG.with(|c| *c.borrow_mut() = config);

    if is_loading(&page) {
        let document = page.document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(&page)).forget();
    } else {
        mount(&page);
    }
}

/// Get the version of the theme runtime.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Switch the colour theme with a smooth fade.
#[wasm_bindgen(js_name = applyTheme)]
pub async fn apply_theme(mode: String, max_wait: Option<f64>) -> Result<(), JsValue> {
    let page = Page::current()?;
    smart_ui::apply_theme(&page, &mode, max_wait).await?;
    Ok(())
}

/// Read a CSS duration custom property in milliseconds.
#[wasm_bindgen(js_name = durationMs)]
pub fn duration_ms(name: Option<String>, fallback: Option<f64>) -> f64 {
    let name = name.unwrap_or_else(|| "--duration-normal".to_string());
    let fallback = fallback.unwrap_or(500.0);
    match Page::current() {
        Ok(page) => page.duration_ms(&name, fallback),
        Err(_) => fallback,
    }
}

/// Scroll to the element with `id`. Resolves to `true` when the scroll ran
/// to completion and `false` when it was superseded or the id is unknown.
#[wasm_bindgen(js_name = scrollToAnchor)]
pub async fn scroll_to_anchor(id: String) -> bool {
    let scroll = ENHANCEMENTS.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|enhancements| enhancements.anchors.scroll_to_id(&id))
    });
    match scroll {
        Some(scroll) => scroll.await == ScrollOutcome::Completed,
        None => false,
    }
}

/// The effective configuration, as a plain object.
#[wasm_bindgen(js_name = themeConfig)]
pub fn theme_config() -> Result<JsValue, JsValue> {
    CONFIG.with(|c| serde_wasm_bindgen::to_value(&*c.borrow())).map_err(JsValue::from)
}
