//! SMART Theme Core Library
//!
//! Target-independent state and algorithms behind the SMART documentation
//! theme's client-side enhancements. Nothing here touches the DOM; the
//! `smart-ui` crate measures the page and applies the decisions made here.
//!
//! # Modules
//!
//! - [`nav`] - sidebar accordion tree
//! - [`drawer`] - mobile drawer open/closed state
//! - [`spy`] - table-of-contents scroll-spy
//! - [`scroll`] - eased anchor scrolling math
//! - [`reading`] - reading time estimation
//! - [`placeholder`] - search placeholder typewriter
//! - [`clipboard`] - copy fallback chain
//! - [`theme`] - theme fade timing
//! - [`oembed`] - video card metadata
//! - [`css`] - CSS duration and length tokens

pub mod clipboard;
pub mod config;
pub mod css;
pub mod drawer;
pub mod error;
pub mod nav;
pub mod oembed;
pub mod placeholder;
pub mod reading;
pub mod scroll;
pub mod spy;
pub mod theme;

pub use clipboard::CopyOutcome;
pub use config::ThemeConfig;
pub use drawer::{DrawerEvent, DrawerState};
pub use error::{CoreError, Result};
pub use nav::{LinkAction, NavKey, NavTree, NodeId};
pub use oembed::VideoMeta;
pub use placeholder::Typewriter;
pub use reading::ReadingTime;
pub use scroll::{ScrollOutcome, ScrollPlan};
pub use spy::{ScrollSpy, TocHeading, Viewport};
pub use theme::TransitionTiming;
