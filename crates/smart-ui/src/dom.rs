//! Shared DOM helpers.

use smart_core::{
    Viewport,
    css::{self, FontContext},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{DomError, Result};

/// Handles to the current window and document.
///
/// Components receive a `Page` instead of looking the globals up on every
/// event.
#[derive(Clone)]
pub struct Page {
    /// The global `window`.
    pub window: Window,
    /// `window.document`.
    pub document: Document,
}

impl Page {
    /// Wrap the global window and document.
    pub fn current() -> Result<Self> {
        let window = web_sys::window().ok_or(DomError::Missing("window"))?;
        let document = window.document().ok_or(DomError::Missing("document"))?;
        Ok(Self { window, document })
    }

    /// First element matching `selector`, swallowing selector errors.
    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    /// All elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    /// The `<body>` element.
    pub fn body(&self) -> Result<HtmlElement> {
        self.document.body().ok_or(DomError::Missing("body"))
    }

    /// The `<html>` element.
    pub fn root(&self) -> Result<Element> {
        self.document
            .document_element()
            .ok_or(DomError::Missing("document element"))
    }

    /// Raw value of a custom property on the root element, or `""`.
    pub fn css_var(&self, name: &str) -> String {
        self.root()
            .ok()
            .and_then(|root| self.window.get_computed_style(&root).ok().flatten())
            .and_then(|style| style.get_property_value(name).ok())
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn font_size_of(&self, element: Option<Element>) -> Option<f64> {
        let style = self.window.get_computed_style(&element?).ok().flatten()?;
        css::font_size_px(&style.get_property_value("font-size").ok()?)
    }

    /// Root and body font sizes for resolving `rem`/`em`.
    pub fn fonts(&self) -> FontContext {
        let default = FontContext::default();
        FontContext {
            root_px: self.font_size_of(self.root().ok()).unwrap_or(default.root_px),
            body_px: self
                .font_size_of(self.document.body().map(Element::from))
                .unwrap_or(default.body_px),
        }
    }

    /// A duration token in milliseconds.
    pub fn duration_ms(&self, name: &str, fallback: f64) -> f64 {
        css::duration_or(name, &self.css_var(name), fallback)
    }

    /// A length token in pixels.
    pub fn length_px(&self, name: &str, fallback: f64) -> f64 {
        css::length_or(name, &self.css_var(name), self.fonts(), fallback)
    }

    /// Current vertical scroll position.
    pub fn scroll_top(&self) -> f64 {
        self.window
            .scroll_y()
            .ok()
            .or_else(|| self.root().ok().map(|r| f64::from(r.scroll_top())))
            .unwrap_or(0.0)
    }

    /// `window.innerWidth`.
    pub fn inner_width(&self) -> f64 {
        number(self.window.inner_width())
    }

    /// `window.innerHeight`.
    pub fn inner_height(&self) -> f64 {
        number(self.window.inner_height())
    }

    /// Total scrollable height of the document.
    pub fn document_height(&self) -> f64 {
        self.root()
            .map(|r| f64::from(r.scroll_height()))
            .unwrap_or(0.0)
    }

    /// Largest reachable scroll position.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.inner_height()).max(0.0)
    }

    /// Scroll metrics for the scroll-spy.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll_top(),
            window_height: self.inner_height(),
            document_height: self.document_height(),
        }
    }

    /// Whether the user asked for reduced motion.
    pub fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    /// High resolution timestamp in milliseconds.
    pub fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Absolute document offset of an element's top edge.
    pub fn document_top(&self, element: &Element) -> f64 {
        self.scroll_top() + element.get_bounding_client_rect().top()
    }

    /// Jump to a vertical position, overriding a root `scroll-behavior:
    /// smooth` for the duration of the call.
    pub fn jump_to(&self, y: f64) {
        let root = self.root().ok().and_then(|r| r.dyn_into::<HtmlElement>().ok());
        let previous = root.as_ref().map(|r| {
            let style = r.style();
            let value = style.get_property_value("scroll-behavior").unwrap_or_default();
            let _ = style.set_property("scroll-behavior", "auto");
            value
        });
        self.window.scroll_to_with_x_and_y(0.0, y);
        if let (Some(root), Some(previous)) = (root, previous) {
            let style = root.style();
            let _ = if previous.is_empty() {
                style.remove_property("scroll-behavior").map(|_| ())
            } else {
                style.set_property("scroll-behavior", &previous)
            };
        }
    }
}

fn number(value: std::result::Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Collect the elements of a `NodeList`.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements below `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

/// First element below `root` matching `selector`.
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Closest ancestor-or-self of an event target matching `selector`.
pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Set inline style properties on an element. Non-HTML elements are skipped.
pub fn set_styles(element: &Element, properties: &[(&str, &str)]) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (name, value) in properties {
            let _ = style.set_property(name, value);
        }
    }
}

/// Remove an inline style property.
pub fn remove_style(element: &Element, name: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(name);
    }
}

/// Set a `data-*` attribute (`key` in camelCase).
pub fn set_data(element: &Element, key: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.dataset().set(key, value);
    }
}

/// Read a `data-*` attribute (`key` in camelCase).
pub fn data(element: &Element, key: &str) -> Option<String> {
    element.dyn_ref::<HtmlElement>()?.dataset().get(key)
}
