//! Error type for DOM operations.

use smart_core::CoreError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type alias using `DomError`.
pub type Result<T> = std::result::Result<T, DomError>;

/// Errors raised while enhancing the page.
///
/// None of these are fatal: components log them and leave the static page
/// as it was.
#[derive(Error, Debug)]
pub enum DomError {
    /// A browser API threw.
    #[error("JavaScript error: {0}")]
    Js(String),

    /// An element or global the operation needs is not present.
    #[error("Missing {0}")]
    Missing(&'static str),

    /// A network request failed before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// A network request did not settle in time.
    #[error("Timed out after {0}ms")]
    Timeout(u32),

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Error from the core library.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<gloo_net::Error> for DomError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
