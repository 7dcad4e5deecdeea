//! DOM side of the SMART documentation theme.
//!
//! Every enhancement is a value that owns its event listeners, timers and
//! animation frames. Dropping it detaches everything it attached, so a page
//! holds exactly one [`Enhancements`] for its lifetime.

pub mod anchor;
pub mod copy;
pub mod dom;
pub mod drawer;
pub mod error;
pub mod header;
pub mod headings;
pub mod nav;
pub mod placeholder;
pub mod pointer;
pub mod reading;
pub mod spy;
pub mod theme;
pub mod video;
pub mod zoom;

use smart_core::{ReadingTime, ThemeConfig};
use web_sys::HtmlElement;

pub use anchor::{AnchorScroller, Scroller};
pub use copy::CopyUrlLinks;
pub use dom::Page;
pub use drawer::MobileDrawer;
pub use error::{DomError, Result};
pub use header::HeaderBorder;
pub use nav::SidebarAccordion;
pub use placeholder::SearchPlaceholder;
pub use pointer::PointerActive;
pub use spy::TocScrollSpy;
pub use theme::apply_theme;
pub use video::VideoCards;
pub use zoom::ImageZoom;

/// Attribute set on `<body>` while a page is enhanced. Shared by every copy
/// of the runtime loaded into the document.
pub const MOUNTED_ATTR: &str = "data-sidebar-init";

/// Id of the optional inline JSON configuration script.
pub const CONFIG_SCRIPT_ID: &str = "smart-theme-config";

/// Read the page's configuration, falling back to defaults when the script
/// is absent or invalid.
pub fn load_config(page: &Page) -> ThemeConfig {
    let Some(json) = page
        .document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
        .filter(|text| !text.trim().is_empty())
    else {
        return ThemeConfig::default();
    };

    match ThemeConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_SCRIPT_ID}: {err}");
            ThemeConfig::default()
        }
    }
}

/// All enhancements mounted on one page.
pub struct Enhancements {
    pub nav: Option<SidebarAccordion>,
    pub drawer: Option<MobileDrawer>,
    pub scroll_spy: Option<TocScrollSpy>,
    pub anchors: AnchorScroller,
    pub copy_links: Option<CopyUrlLinks>,
    pub header: Option<HeaderBorder>,
    pub pointer: PointerActive,
    pub zoom: Option<ImageZoom>,
    pub placeholder: SearchPlaceholder,
    pub videos: Option<VideoCards>,
    pub reading_time: Option<ReadingTime>,
    _marker: MountMarker,
}

/// Holds the body's mounted marker and clears it on drop.
struct MountMarker {
    body: HtmlElement,
}

impl MountMarker {
    fn claim(page: &Page) -> Option<Self> {
        let body = match page.body() {
            Ok(body) => body,
            Err(err) => {
                log::warn!("theme enhancements not mounted: {err}");
                return None;
            }
        };
        if body.get_attribute(MOUNTED_ATTR).as_deref() == Some("1") {
            log::warn!("theme enhancements already mounted on this page");
            return None;
        }
        if let Err(err) = body.set_attribute(MOUNTED_ATTR, "1") {
            log::warn!("cannot mark page as enhanced: {}", DomError::from(err));
            return None;
        }
        Some(Self { body })
    }
}

impl Drop for MountMarker {
    fn drop(&mut self) {
        let _ = self.body.remove_attribute(MOUNTED_ATTR);
    }
}

impl Enhancements {
    /// Mount every enhancement. Missing page regions simply skip the
    /// enhancements that need them.
    ///
    /// Returns `None` if the page is already enhanced, including by another
    /// instance of the runtime.
    pub fn mount(page: &Page, config: &ThemeConfig) -> Option<Self> {
        let marker = MountMarker::claim(page)?;
        let trimmed = headings::trim_h1(page);
        if trimmed > 0 {
            log::debug!("trimmed leading whitespace from {trimmed} h1 elements");
        }

        let enhancements = Self {
            nav: SidebarAccordion::mount(page, &config.nav),
            drawer: MobileDrawer::mount(page, &config.drawer),
            scroll_spy: TocScrollSpy::mount(page, &config.scroll_spy),
            anchors: AnchorScroller::mount(page, &config.anchor),
            copy_links: CopyUrlLinks::mount(page, &config.copy),
            header: HeaderBorder::mount(page, &config.header),
            pointer: PointerActive::mount(page),
            zoom: ImageZoom::mount(page),
            placeholder: SearchPlaceholder::start(page, &config.placeholder),
            videos: VideoCards::mount(page, &config.video),
            reading_time: reading::render(page, &config.reading),
            _marker: marker,
        };
        log::info!("theme enhancements mounted");
        Some(enhancements)
    }
}
