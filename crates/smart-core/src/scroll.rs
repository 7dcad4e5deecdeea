//! Eased anchor scrolling math.
//!
//! The DOM layer measures positions and drives animation frames; everything
//! that decides *where* and *how fast* to scroll lives here.

use crate::config::AnchorConfig;

/// Ease-out cubic: fast start, slow end.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Space to leave above a scroll target for the fixed header.
///
/// The configured offset (`--header-offset` + `--anchor-offset-extra`) is
/// used unless the rendered header is taller.
pub fn header_clearance(css_offset_px: f64, css_extra_px: f64, header_height: Option<f64>) -> f64 {
    let header_px = header_height.map(f64::ceil).unwrap_or(0.0);
    0.0_f64.max(css_offset_px + css_extra_px).max(header_px)
}

/// Animation duration for a given travel distance, in milliseconds.
pub fn duration_for(distance: f64, base_ms: f64, config: &AnchorConfig) -> f64 {
    let bonus = (distance.abs() * config.per_px_ms).min(config.distance_cap_ms);
    (base_ms + bonus).clamp(config.min_duration_ms, config.max_duration_ms)
}

/// A fully resolved scroll from one position to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Scroll position when the animation starts.
    pub start: f64,

    /// Final scroll position, already clamped to the scrollable range.
    pub target: f64,

    /// Animation length in milliseconds; zero means jump.
    pub duration_ms: f64,
}

impl ScrollPlan {
    /// Plan a scroll to an element.
    ///
    /// `element_top` is the element's absolute document offset, `max_scroll`
    /// the largest reachable scroll position.
    pub fn to_element(
        start: f64,
        element_top: f64,
        clearance: f64,
        max_scroll: f64,
        base_ms: f64,
        reduced_motion: bool,
        config: &AnchorConfig,
    ) -> Self {
        let target = (element_top - clearance).clamp(0.0, max_scroll.max(0.0));
        let distance = target - start;
        let duration_ms = if reduced_motion || distance.abs() < 1.0 {
            0.0
        } else {
            duration_for(distance, base_ms, config)
        };
        Self {
            start,
            target,
            duration_ms,
        }
    }

    /// Whether the scroll should happen instantly.
    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0
    }

    /// Position after `elapsed_ms`, and whether the animation is finished.
    pub fn sample(&self, elapsed_ms: f64) -> (f64, bool) {
        if self.is_instant() {
            return (self.target, true);
        }
        let t = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.target, true);
        }
        let eased = ease_out_cubic(t);
        (self.start + (self.target - self.start) * eased, false)
    }
}

/// How an animated scroll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The target was reached.
    Completed,
    /// A newer scroll took over before the target was reached.
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-9);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        // Front-loaded: more than half the distance in the first third.
        assert!(ease_out_cubic(1.0 / 3.0) > 0.5);
    }

    #[test]
    fn test_header_clearance() {
        assert_eq!(header_clearance(40.0, 12.0, None), 52.0);
        assert_eq!(header_clearance(40.0, 12.0, Some(63.2)), 64.0);
        assert_eq!(header_clearance(40.0, 12.0, Some(30.0)), 52.0);
        assert_eq!(header_clearance(-80.0, 0.0, None), 0.0);
    }

    #[test]
    fn test_duration_scales_and_clamps() {
        let config = AnchorConfig::default();
        assert_eq!(duration_for(100.0, 600.0, &config), 750.0);
        assert_eq!(duration_for(-100.0, 600.0, &config), 750.0);
        assert_eq!(duration_for(5000.0, 600.0, &config), 1600.0);
        assert_eq!(duration_for(5000.0, 2500.0, &config), 1800.0);
        assert_eq!(duration_for(0.0, 0.0, &config), 300.0);
    }

    #[test]
    fn test_plan_clamps_target() {
        let config = AnchorConfig::default();
        let plan = ScrollPlan::to_element(0.0, 30.0, 52.0, 4000.0, 600.0, false, &config);
        assert_eq!(plan.target, 0.0);
        assert!(plan.is_instant());

        let plan = ScrollPlan::to_element(0.0, 9000.0, 52.0, 4000.0, 600.0, false, &config);
        assert_eq!(plan.target, 4000.0);
    }

    #[test]
    fn test_plan_reduced_motion_jumps() {
        let config = AnchorConfig::default();
        let plan = ScrollPlan::to_element(0.0, 1552.0, 52.0, 4000.0, 600.0, true, &config);
        assert!(plan.is_instant());
        assert_eq!(plan.sample(0.0), (1500.0, true));
    }

    #[test]
    fn test_sample_reaches_target_exactly() {
        let config = AnchorConfig::default();
        let plan = ScrollPlan::to_element(200.0, 1252.0, 52.0, 4000.0, 600.0, false, &config);
        assert_eq!(plan.target, 1200.0);

        let (first, done) = plan.sample(0.0);
        assert_eq!(first, 200.0);
        assert!(!done);

        let (mid, done) = plan.sample(plan.duration_ms / 2.0);
        assert!(!done);
        assert!(mid > 700.0 && mid < 1200.0);

        let (last, done) = plan.sample(plan.duration_ms + 16.0);
        assert!(done);
        assert!((last - 1200.0).abs() < 1.0);
    }

    #[test]
    fn test_sample_is_monotonic() {
        let config = AnchorConfig::default();
        let plan = ScrollPlan::to_element(3000.0, 552.0, 52.0, 4000.0, 600.0, false, &config);
        let mut previous = plan.start;
        let mut elapsed = 0.0;
        loop {
            let (y, done) = plan.sample(elapsed);
            assert!(y <= previous);
            previous = y;
            if done {
                break;
            }
            elapsed += 16.0;
        }
        assert_eq!(previous, 500.0);
    }
}
