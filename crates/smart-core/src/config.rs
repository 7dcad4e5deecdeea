//! Theme configuration.
//!
//! Every tunable constant of the enhancements lives here. Pages may override
//! any subset of it with a JSON document; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for the theme enhancements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Sidebar accordion settings.
    #[serde(default)]
    pub nav: NavConfig,

    /// Mobile drawer settings.
    #[serde(default)]
    pub drawer: DrawerConfig,

    /// Table-of-contents scroll-spy thresholds.
    #[serde(default)]
    pub scroll_spy: ScrollSpyConfig,

    /// Eased anchor scrolling settings.
    #[serde(default)]
    pub anchor: AnchorConfig,

    /// Reading time estimation settings.
    #[serde(default)]
    pub reading: ReadingConfig,

    /// Copy-URL feedback settings.
    #[serde(default)]
    pub copy: CopyConfig,

    /// Header border settings.
    #[serde(default)]
    pub header: HeaderConfig,

    /// Search placeholder animation settings.
    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    /// Video card enrichment settings.
    #[serde(default)]
    pub video: VideoConfig,

    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Sidebar accordion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Expand a branch before following its (non-anchor) link, navigating
    /// after `--duration-normal` so the reveal is visible.
    #[serde(default)]
    pub reveal_before_navigate: bool,

    /// Prefix of generated ids for child lists without one.
    #[serde(default = "default_branch_id_prefix")]
    pub branch_id_prefix: String,
}

/// Mobile drawer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerConfig {
    /// Viewport width (px) at and above which the drawer is forced closed.
    #[serde(default = "default_desktop_breakpoint")]
    pub desktop_breakpoint: f64,
}

/// Scroll-spy thresholds, all in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpyConfig {
    /// Allowance added to the scroll position for the fixed header.
    #[serde(default = "default_spy_header_offset")]
    pub header_offset: f64,

    /// How far before its offset a heading already counts as reached.
    #[serde(default)]
    pub lookahead: f64,

    /// Distance from the document end within which the last heading wins.
    #[serde(default = "default_spy_bottom_margin")]
    pub bottom_margin: f64,

    /// Scroll positions above this activate nothing.
    #[serde(default = "default_spy_top_threshold")]
    pub top_threshold: f64,
}

/// Eased anchor scrolling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Fallback for `--header-offset` (px).
    #[serde(default = "default_header_offset_px")]
    pub header_offset_px: f64,

    /// Fallback for `--anchor-offset-extra` (px).
    #[serde(default = "default_extra_offset_px")]
    pub extra_offset_px: f64,

    /// Fallback for `--duration-slow` (ms).
    #[serde(default = "default_base_duration_ms")]
    pub base_duration_ms: f64,

    /// Extra milliseconds per pixel travelled.
    #[serde(default = "default_per_px_ms")]
    pub per_px_ms: f64,

    /// Cap on the distance-dependent part of the duration (ms).
    #[serde(default = "default_distance_cap_ms")]
    pub distance_cap_ms: f64,

    /// Lower duration bound (ms).
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: f64,

    /// Upper duration bound (ms).
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: f64,
}

/// Reading time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Average reading speed.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Paragraphs with fewer characters are ignored.
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,
}

/// Copy-URL feedback configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// How long the tooltip stays visible (ms).
    #[serde(default = "default_tooltip_ms")]
    pub tooltip_ms: u32,

    /// Tooltip text after a successful copy.
    #[serde(default = "default_copy_success")]
    pub success_text: String,

    /// Tooltip text after every copy strategy failed.
    #[serde(default = "default_copy_failure")]
    pub failure_text: String,
}

/// Header border configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Scroll position (px) past which the header gets its border.
    #[serde(default = "default_border_threshold")]
    pub border_threshold: f64,
}

/// Search placeholder typing animation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// Delay between typed characters (ms).
    #[serde(default = "default_type_delay_ms")]
    pub type_delay_ms: u32,

    /// Delay between deleted characters (ms).
    #[serde(default = "default_delete_delay_ms")]
    pub delete_delay_ms: u32,

    /// Pause once a placeholder is fully typed (ms).
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u32,

    /// Poll interval while the search button is not yet rendered (ms).
    #[serde(default = "default_retry_ms")]
    pub retry_ms: u32,

    /// Maximum number of page titles used.
    #[serde(default = "default_max_titles")]
    pub max_titles: usize,

    /// Below this many link titles, headings are added as candidates.
    #[serde(default = "default_min_titles")]
    pub min_titles: usize,

    /// Prefixes applied in rotation.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,

    /// Placeholders used when no title was found.
    #[serde(default = "default_fallbacks")]
    pub fallbacks: Vec<String>,
}

/// Video card enrichment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// oEmbed endpoint.
    #[serde(default = "default_oembed_endpoint")]
    pub endpoint: String,

    /// Network timeout (ms).
    #[serde(default = "default_video_timeout_ms")]
    pub timeout_ms: u32,

    /// Intersection observer root margin.
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
}

/// Console log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

// Default value functions
fn default_branch_id_prefix() -> String {
    "nav-branch-".to_string()
}

fn default_desktop_breakpoint() -> f64 {
    1024.0
}

fn default_spy_header_offset() -> f64 {
    250.0
}

fn default_spy_bottom_margin() -> f64 {
    250.0
}

fn default_spy_top_threshold() -> f64 {
    100.0
}

fn default_header_offset_px() -> f64 {
    40.0
}

fn default_extra_offset_px() -> f64 {
    12.0
}

fn default_base_duration_ms() -> f64 {
    600.0
}

fn default_per_px_ms() -> f64 {
    1.5
}

fn default_distance_cap_ms() -> f64 {
    1000.0
}

// Short hops may finish in as little as 300ms. Older theme builds floored
// every anchor scroll at 1500ms, so their window was [1500, 1800]; set
// `min_duration_ms` to 1500 to restore that feel.
fn default_min_duration_ms() -> f64 {
    300.0
}

fn default_max_duration_ms() -> f64 {
    1800.0
}

fn default_words_per_minute() -> u32 {
    225
}

fn default_min_paragraph_chars() -> usize {
    20
}

fn default_tooltip_ms() -> u32 {
    1800
}

fn default_copy_success() -> String {
    "Copied!".to_string()
}

fn default_copy_failure() -> String {
    "Copy failed".to_string()
}

fn default_border_threshold() -> f64 {
    250.0
}

fn default_type_delay_ms() -> u32 {
    100
}

fn default_delete_delay_ms() -> u32 {
    50
}

fn default_pause_ms() -> u32 {
    5500
}

fn default_retry_ms() -> u32 {
    100
}

fn default_max_titles() -> usize {
    6
}

fn default_min_titles() -> usize {
    3
}

fn default_prefixes() -> Vec<String> {
    ["Search for", "Read more about", "Explore", "Discover", "Learn about"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_fallbacks() -> Vec<String> {
    [
        "Search for content",
        "Find documentation",
        "Explore projects",
        "Discover guides",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_video_timeout_ms() -> u32 {
    8000
}

fn default_root_margin() -> String {
    "200px".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            reveal_before_navigate: false,
            branch_id_prefix: default_branch_id_prefix(),
        }
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint: default_desktop_breakpoint(),
        }
    }
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            header_offset: default_spy_header_offset(),
            lookahead: 0.0,
            bottom_margin: default_spy_bottom_margin(),
            top_threshold: default_spy_top_threshold(),
        }
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            header_offset_px: default_header_offset_px(),
            extra_offset_px: default_extra_offset_px(),
            base_duration_ms: default_base_duration_ms(),
            per_px_ms: default_per_px_ms(),
            distance_cap_ms: default_distance_cap_ms(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
        }
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            min_paragraph_chars: default_min_paragraph_chars(),
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            tooltip_ms: default_tooltip_ms(),
            success_text: default_copy_success(),
            failure_text: default_copy_failure(),
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            border_threshold: default_border_threshold(),
        }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            type_delay_ms: default_type_delay_ms(),
            delete_delay_ms: default_delete_delay_ms(),
            pause_ms: default_pause_ms(),
            retry_ms: default_retry_ms(),
            max_titles: default_max_titles(),
            min_titles: default_min_titles(),
            prefixes: default_prefixes(),
            fallbacks: default_fallbacks(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            endpoint: default_oembed_endpoint(),
            timeout_ms: default_video_timeout_ms(),
            root_margin: default_root_margin(),
        }
    }
}

impl ThemeConfig {
    /// Parse configuration overrides from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ThemeConfig = serde_json::from_str(json)
            .map_err(|e| CoreError::config_with_source("Failed to parse theme config", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.reading.words_per_minute == 0 {
            return Err(CoreError::config("reading.words_per_minute must be positive"));
        }

        if self.anchor.min_duration_ms > self.anchor.max_duration_ms {
            return Err(CoreError::config(
                "anchor.min_duration_ms cannot exceed anchor.max_duration_ms",
            ));
        }

        if self.placeholder.fallbacks.is_empty() {
            return Err(CoreError::config("placeholder.fallbacks cannot be empty"));
        }

        if self.video.timeout_ms == 0 {
            return Err(CoreError::config("video.timeout_ms must be positive"));
        }

        if self.drawer.desktop_breakpoint <= 0.0 {
            log::warn!("drawer.desktop_breakpoint is not positive; the drawer closes on every resize");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ThemeConfig::default();

        assert_eq!(config.drawer.desktop_breakpoint, 1024.0);
        assert_eq!(config.scroll_spy.header_offset, 250.0);
        assert_eq!(config.scroll_spy.top_threshold, 100.0);
        assert_eq!(config.reading.words_per_minute, 225);
        assert_eq!(config.video.timeout_ms, 8000);
        assert_eq!(config.placeholder.prefixes.len(), 5);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{
            "drawer": { "desktop_breakpoint": 900 },
            "scroll_spy": { "lookahead": 40 },
            "log_level": "debug"
        }"#;

        let config = ThemeConfig::from_json(json).expect("parse config");

        assert_eq!(config.drawer.desktop_breakpoint, 900.0);
        assert_eq!(config.scroll_spy.lookahead, 40.0);
        assert_eq!(config.scroll_spy.header_offset, 250.0);
        assert_eq!(config.anchor.max_duration_ms, 1800.0);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(log::Level::from(config.log_level), log::Level::Debug);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = ThemeConfig::from_json("{}").expect("parse config");
        assert_eq!(config, ThemeConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_reading_speed() {
        let result = ThemeConfig::from_json(r#"{ "reading": { "words_per_minute": 0 } }"#);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("words_per_minute must be positive")
        );
    }

    #[test]
    fn test_validation_rejects_inverted_duration_bounds() {
        let json = r#"{ "anchor": { "min_duration_ms": 2000, "max_duration_ms": 1000 } }"#;
        assert!(ThemeConfig::from_json(json).is_err());
    }

    #[test]
    fn test_default_anchor_duration_window() {
        use crate::scroll::duration_for;

        let anchor = AnchorConfig::default();
        assert_eq!(anchor.min_duration_ms, 300.0);
        assert_eq!(anchor.max_duration_ms, 1800.0);
        assert_eq!(duration_for(0.0, 600.0, &anchor), 600.0);
        assert_eq!(duration_for(0.0, 100.0, &anchor), 300.0);
        assert_eq!(duration_for(5000.0, 600.0, &anchor), 1600.0);
        assert_eq!(duration_for(5000.0, 1200.0, &anchor), 1800.0);

        let legacy = ThemeConfig::from_json(r#"{ "anchor": { "min_duration_ms": 1500 } }"#)
            .expect("parse config")
            .anchor;
        assert_eq!(duration_for(0.0, 600.0, &legacy), 1500.0);
        assert_eq!(duration_for(5000.0, 600.0, &legacy), 1600.0);
    }

    #[test]
    fn test_malformed_json() {
        let result = ThemeConfig::from_json("{ not json");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
