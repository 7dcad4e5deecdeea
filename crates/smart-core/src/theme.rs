//! Timing of the theme-switch colour fade.

/// CSS properties whose `transitionend` marks the fade as settling.
pub const FADE_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "fill",
    "stroke",
    "box-shadow",
    "text-decoration-color",
];

/// Whether a `transitionend` for `property` belongs to the theme fade.
pub fn is_fade_property(property: &str) -> bool {
    FADE_PROPERTIES.contains(&property)
}

/// Timers used while `theme-transition` is applied to the root element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    /// Quiet period after the last relevant `transitionend` (ms).
    pub debounce_ms: u32,

    /// Hard upper bound on how long the class stays (ms).
    pub fallback_ms: u32,
}

impl TransitionTiming {
    /// Derive timers from `--duration-normal` and an optional caller limit.
    pub fn new(duration_ms: f64, max_wait_ms: Option<f64>) -> Self {
        let duration_ms = duration_ms.max(0.0);
        let debounce_ms = (duration_ms * 0.25).round().max(60.0);
        let fallback_ms =
            max_wait_ms.unwrap_or_else(|| (duration_ms * 3.0).max(duration_ms + 500.0));
        Self {
            debounce_ms: debounce_ms as u32,
            fallback_ms: fallback_ms.max(0.0) as u32,
        }
    }
}
