//! Parsing of CSS custom property values (design tokens).
//!
//! The theme stylesheet exposes durations and spacing as custom properties
//! such as `--duration-slow: 0.6s` or `--header-offset: 2.5rem`. Values are
//! read through `getComputedStyle`, so they arrive as raw, possibly padded
//! strings.

use crate::error::{CoreError, Result};

/// Font sizes needed to resolve relative lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontContext {
    /// Computed font size of the root element (for `rem`).
    pub root_px: f64,
    /// Computed font size of the body element (for `em`).
    pub body_px: f64,
}

impl Default for FontContext {
    fn default() -> Self {
        Self {
            root_px: 16.0,
            body_px: 16.0,
        }
    }
}

/// Parse a CSS duration token into milliseconds.
///
/// Accepts `ms`, `s` and unitless values. Negative durations clamp to zero.
pub fn parse_duration_ms(name: &str, raw: &str) -> Result<f64> {
    let value = raw.trim();
    let (number, scale) = if let Some(ms) = value.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = value.strip_suffix('s') {
        (s, 1000.0)
    } else {
        (value, 1.0)
    };

    let parsed: f64 = number
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_token(name, raw))?;
    if !parsed.is_finite() {
        return Err(CoreError::invalid_token(name, raw));
    }

    Ok((parsed * scale).max(0.0))
}

/// Resolve a duration token, falling back when it is empty or invalid.
pub fn duration_or(name: &str, raw: &str, fallback: f64) -> f64 {
    if raw.trim().is_empty() {
        return fallback;
    }
    parse_duration_ms(name, raw).unwrap_or_else(|e| {
        log::debug!("{e}; using {fallback}ms");
        fallback
    })
}

/// Parse a CSS length token into pixels.
///
/// Supports `px`, `rem`, `em` and unitless values.
pub fn parse_length_px(name: &str, raw: &str, fonts: FontContext) -> Result<f64> {
    let value = raw.trim();
    let (number, scale) = if let Some(px) = value.strip_suffix("px") {
        (px, 1.0)
    } else if let Some(rem) = value.strip_suffix("rem") {
        (rem, fonts.root_px)
    } else if let Some(em) = value.strip_suffix("em") {
        (em, fonts.body_px)
    } else {
        (value, 1.0)
    };

    let parsed: f64 = number
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_token(name, raw))?;
    if !parsed.is_finite() {
        return Err(CoreError::invalid_token(name, raw));
    }

    Ok(parsed * scale)
}

/// Resolve a length token, falling back when it is empty or invalid.
pub fn length_or(name: &str, raw: &str, fonts: FontContext, fallback: f64) -> f64 {
    if raw.trim().is_empty() {
        return fallback;
    }
    parse_length_px(name, raw, fonts).unwrap_or_else(|e| {
        log::debug!("{e}; using {fallback}px");
        fallback
    })
}

/// Parse a computed `font-size` such as `"16px"`.
pub fn font_size_px(raw: &str) -> Option<f64> {
    raw.trim()
        .strip_suffix("px")
        .unwrap_or(raw.trim())
        .trim()
        .parse()
        .ok()
        .filter(|px: &f64| px.is_finite() && *px > 0.0)
}
