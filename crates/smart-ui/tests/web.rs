//! Browser tests. Run with `wasm-pack test --headless --firefox crates/smart-ui`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use js_sys::{Object, Reflect};
use smart_core::{CopyOutcome, DrawerEvent, ScrollOutcome, ThemeConfig, VideoMeta};
use smart_ui::{
    AnchorScroller, Enhancements, ImageZoom, MobileDrawer, Page, SidebarAccordion, TocScrollSpy,
    apply_theme, copy, headings, load_config, reading, theme::next_frame, video,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

/// Replace the body with `html` and reset page state left by earlier tests.
fn fixture(html: &str) -> Page {
    let page = Page::current().unwrap();
    let body = page.body().unwrap();
    body.set_class_name("");
    body.remove_attribute(smart_ui::MOUNTED_ATTR).unwrap();
    body.set_inner_html(html);
    page.jump_to(0.0);
    page
}

fn element(page: &Page, id: &str) -> Element {
    page.document.get_element_by_id(id).unwrap()
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

fn expanded(page: &Page, id: &str) -> bool {
    element(page, id).get_attribute("aria-expanded").as_deref() == Some("true")
}

const SIDEBAR: &str = r##"
<nav id="left-sidebar">
  <ul>
    <li id="guide"><a id="guide-link" href="#">Guide</a><button class="nav-toggle"></button>
      <ul><li><a href="/guide/intro.html">Intro</a></li></ul>
    </li>
    <li id="api"><a id="api-link" href="#">API</a><button id="api-toggle" class="nav-toggle"></button>
      <ul><li><a class="current" href="/api/tensor.html">Tensor</a></li></ul>
    </li>
  </ul>
</nav>
"##;

#[wasm_bindgen_test]
async fn accordion_reveals_current_and_keeps_one_sibling_open() {
    let page = fixture(SIDEBAR);
    let accordion = SidebarAccordion::mount(&page, &ThemeConfig::default().nav).unwrap();
    assert_eq!(accordion.sidebar_count(), 1);
    assert!(!expanded(&page, "api"));

    next_frame().await;
    assert!(expanded(&page, "api"));
    assert!(!expanded(&page, "guide"));

    click(&element(&page, "guide-link"));
    assert!(expanded(&page, "guide"));
    assert!(!expanded(&page, "api"));

    click(&element(&page, "api-toggle"));
    assert!(expanded(&page, "api"));
    assert!(!expanded(&page, "guide"));
}

#[wasm_bindgen_test]
fn accordion_assigns_ids_to_child_lists() {
    let page = fixture(SIDEBAR);
    let _accordion = SidebarAccordion::mount(&page, &ThemeConfig::default().nav).unwrap();
    let toggle = element(&page, "api-toggle");
    let controls = toggle.get_attribute("aria-controls").unwrap();
    assert!(controls.starts_with("nav-branch-"));
    assert!(page.document.get_element_by_id(&controls).is_some());
    assert!(element(&page, "api").class_list().contains("has-children"));
}

#[wasm_bindgen_test]
fn drawer_opens_and_closes() {
    let page = fixture(
        r#"<button id="trigger" data-sidebar-toggle></button>
           <aside id="sidebar"><a id="inner" href="javascript:void(0)">Link</a></aside>"#,
    );
    let drawer = MobileDrawer::mount(&page, &ThemeConfig::default().drawer).unwrap();
    let body = page.body().unwrap();

    click(&element(&page, "trigger"));
    assert!(drawer.is_open());
    assert!(body.class_list().contains("sidebar-open"));

    click(drawer.backdrop());
    assert!(!drawer.is_open());
    assert!(!body.class_list().contains("sidebar-open"));

    click(&element(&page, "trigger"));
    click(&element(&page, "inner"));
    assert!(!drawer.is_open());

    drawer.dispatch(DrawerEvent::Resize(900.0));
    drawer.dispatch(DrawerEvent::Open);
    drawer.dispatch(DrawerEvent::Resize(1200.0));
    assert!(!drawer.is_open());
}

#[wasm_bindgen_test]
fn second_mount_on_marked_page_is_refused() {
    let page = fixture(
        r#"<button id="trigger" data-sidebar-toggle></button>
           <aside id="sidebar"><a href="javascript:void(0)">Link</a></aside>"#,
    );
    let config = ThemeConfig::default();
    let body = page.body().unwrap();

    let first = Enhancements::mount(&page, &config).unwrap();
    assert_eq!(body.get_attribute("data-sidebar-init").as_deref(), Some("1"));
    assert!(Enhancements::mount(&page, &config).is_none());

    click(&element(&page, "trigger"));
    let drawer = first.drawer.as_ref().unwrap();
    assert!(drawer.is_open());
    assert!(body.class_list().contains("sidebar-open"));

    drop(first);
    assert!(body.get_attribute("data-sidebar-init").is_none());
    assert!(Enhancements::mount(&page, &config).is_some());
}

#[wasm_bindgen_test]
fn scroll_spy_highlights_reached_heading() {
    let page = fixture(
        r##"<div id="right-sidebar"><a id="toc-one" href="#one">One</a><a id="toc-two" href="#two">Two</a></div>
            <div style="height: 200px"></div>
            <h2 id="one">One</h2>
            <div style="height: 2000px"></div>
            <h2 id="two">Two</h2>
            <div style="height: 6000px"></div>"##,
    );
    let spy = TocScrollSpy::mount(&page, &ThemeConfig::default().scroll_spy).unwrap();
    assert_eq!(spy.active_id(), None);

    page.jump_to(300.0);
    spy.refresh();
    assert_eq!(spy.active_id().as_deref(), Some("one"));
    assert!(element(&page, "toc-one").class_list().contains("toc-active"));
    assert!(!element(&page, "toc-two").class_list().contains("toc-active"));
    page.jump_to(0.0);
}

const LONG_PAGE: &str = r##"
<a id="to-near" href="#near">Near</a>
<div style="height: 1000px"></div>
<h2 id="near">Near</h2>
<div style="height: 2000px"></div>
<h2 id="far">Far</h2>
<div style="height: 5000px"></div>
"##;

#[wasm_bindgen_test]
async fn newer_scroll_supersedes_older_one() {
    let page = fixture(LONG_PAGE);
    if page.prefers_reduced_motion() {
        return;
    }
    let anchors = AnchorScroller::mount(&page, &ThemeConfig::default().anchor);

    let first = anchors.scroll_to_id("far").unwrap();
    let second = anchors.scroll_to_id("near").unwrap();
    assert_eq!(first.await, ScrollOutcome::Superseded);
    assert_eq!(second.await, ScrollOutcome::Completed);

    let near = element(&page, "near");
    let expected = page.document_top(&near) - anchors.scroller().clearance();
    assert!((page.scroll_top() - expected.max(0.0)).abs() <= 1.0);
    page.jump_to(0.0);
}

#[wasm_bindgen_test]
async fn anchor_click_updates_hash_after_scroll() {
    let page = fixture(LONG_PAGE);
    let history = page.window.history().unwrap();
    history
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some("#"))
        .unwrap();
    let _anchors = AnchorScroller::mount(&page, &ThemeConfig::default().anchor);

    click(&element(&page, "to-near"));
    if !page.prefers_reduced_motion() {
        assert_ne!(page.window.location().hash().unwrap(), "#near");
    }

    TimeoutFuture::new(2500).await;
    assert_eq!(page.window.location().hash().unwrap(), "#near");
    page.jump_to(0.0);
}

#[wasm_bindgen_test]
fn reading_time_counts_prose_only() {
    let prose = "word ".repeat(300);
    let page = fixture(&format!(
        r#"<div id="content">
             <span id="readingTime"></span>
             <p>{prose}</p>
             <p>Too short.</p>
             <div class="admonition"><p>{prose}</p></div>
           </div>"#
    ));
    let estimate = reading::render(&page, &ThemeConfig::default().reading).unwrap();
    assert_eq!(estimate.words, 300);
    assert_eq!(estimate.minutes, 2);
    let label = element(&page, "readingTime").text_content().unwrap();
    assert!(label.ends_with("2 min read"));
}

#[wasm_bindgen_test]
fn reading_time_leaves_empty_pages_alone() {
    let page = fixture(r#"<div id="content"><span id="readingTime">-</span></div>"#);
    assert!(reading::render(&page, &ThemeConfig::default().reading).is_none());
    assert_eq!(element(&page, "readingTime").text_content().unwrap(), "-");
}

#[wasm_bindgen_test]
fn leading_whitespace_is_trimmed_from_h1() {
    let page = fixture("<h1 id=\"title\">\n   Getting started</h1><h1>Clean</h1>");
    assert_eq!(headings::trim_h1(&page), 1);
    assert_eq!(
        element(&page, "title").text_content().unwrap(),
        "Getting started"
    );
}

#[wasm_bindgen_test]
fn zoomable_images_are_wrapped_once() {
    let page = fixture(r#"<div id="content"><img id="pic" class="zoom" alt=""></div>"#);
    let Some(zoom) = ImageZoom::mount(&page) else {
        // Reduced motion.
        return;
    };
    assert_eq!(zoom.wrapped(), 1);
    let scale = element(&page, "pic").parent_element().unwrap();
    assert_eq!(scale.class_name(), "zoom-scale");
    assert_eq!(scale.parent_element().unwrap().class_name(), "zoom-inner");

    let again = ImageZoom::mount(&page).unwrap();
    assert_eq!(again.wrapped(), 0);
}

#[wasm_bindgen_test]
async fn theme_switch_removes_transition_class() {
    let page = Page::current().unwrap();
    apply_theme(&page, "dark", Some(0.0)).await.unwrap();
    let root = page.root().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert!(!root.class_list().contains("theme-transition"));
}

#[wasm_bindgen_test]
fn inline_config_overrides_defaults() {
    let page = fixture(
        r#"<script type="application/json" id="smart-theme-config">
             {"reading": {"words_per_minute": 100}, "log_level": "debug"}
           </script>"#,
    );
    let config = load_config(&page);
    assert_eq!(config.reading.words_per_minute, 100);
    assert_eq!(config.anchor, ThemeConfig::default().anchor);

    let page = fixture(r#"<script type="application/json" id="smart-theme-config">{oops</script>"#);
    assert_eq!(load_config(&page), ThemeConfig::default());
}

#[wasm_bindgen_test]
async fn video_card_without_id_is_marked_enriched() {
    let page = fixture(
        r#"<div id="card" class="youtube-card-container" data-youtube-id="">
             <span class="youtube-title">Video</span>
           </div>"#,
    );
    let card = element(&page, "card");
    video::enrich(card.clone(), ThemeConfig::default().video).await;
    assert_eq!(card.get_attribute("data-youtube-enriched").as_deref(), Some("1"));
    assert_eq!(
        smart_ui::dom::query_in(&card, ".youtube-title")
            .unwrap()
            .text_content()
            .as_deref(),
        Some("Video")
    );
}

#[wasm_bindgen_test]
fn video_card_keeps_channel_without_author() {
    let page = fixture(
        r#"<div id="card" class="youtube-card-container" data-youtube-id="abc">
             <span id="title" class="youtube-title">Video</span>
             <span id="channel" class="youtube-channel">YouTube</span>
           </div>"#,
    );
    let card = element(&page, "card");
    let meta = VideoMeta::from_json(r#"{ "title": "Attention" }"#).unwrap();
    video::fill(&card, &meta);
    assert_eq!(element(&page, "title").text_content().unwrap(), "Attention");
    assert_eq!(element(&page, "channel").text_content().unwrap(), "YouTube");

    let meta = VideoMeta::from_json(r#"{ "title": "Attention", "author_name": "SMART" }"#).unwrap();
    video::fill(&card, &meta);
    assert_eq!(element(&page, "channel").text_content().unwrap(), "SMART");
}

#[wasm_bindgen_test]
async fn copy_falls_back_without_clipboard_api() {
    let page = fixture(r#"<p id="text">Selected</p>"#);
    let navigator: Object = Reflect::get(&page.window, &"navigator".into())
        .unwrap()
        .unchecked_into();
    let descriptor = Object::new();
    Reflect::set(&descriptor, &"value".into(), &JsValue::UNDEFINED).unwrap();
    Reflect::set(&descriptor, &"configurable".into(), &JsValue::TRUE).unwrap();
    assert!(Reflect::define_property(&navigator, &"clipboard".into(), &descriptor).unwrap());

    let detected = copy::write_clipboard(&page, "https://example.com/").await;
    let outcome = copy::copy_text(&page, "https://example.com/").await;
    Reflect::delete_property(&navigator, &"clipboard".into()).unwrap();

    assert!(detected.is_none());
    assert_ne!(outcome, CopyOutcome::Clipboard);
    assert!(page.query("textarea").is_none());
    assert_eq!(element(&page, "text").text_content().unwrap(), "Selected");
}
