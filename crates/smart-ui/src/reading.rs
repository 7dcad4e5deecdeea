//! Reading time label.

use smart_core::{ReadingTime, config::ReadingConfig};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::{self, Page};

const ROOTS: &[&str] = &["#content", "[role=\"main\"]", "section"];
const EXCLUDED: &str = "pre, code, figure, figcaption, .literal-block-wrapper, .highlight, \
                        .code-block-caption, .math, .sidebar, .sphinxsidebar, .admonition, \
                        nav, header, footer";
const STRIPPED: &str = "code, pre, kbd, samp, .linenos, .copybtn, .headerlink, svg, i.fa, .fa";
const ICON: &str = "<i class='fa-regular fa-stopwatch' style='margin-right: 8px;'></i>";

/// Readable text of one paragraph, without inline code and decorations.
fn prose(paragraph: &Element) -> Option<String> {
    let clone = paragraph.clone_node_with_deep(true).ok()?.dyn_into::<Element>().ok()?;
    for node in dom::query_all_in(&clone, STRIPPED) {
        node.remove();
    }
    clone.text_content()
}

/// Paragraph texts counted towards the estimate.
pub fn paragraphs(page: &Page) -> Vec<String> {
    let Some(root) = ROOTS.iter().find_map(|selector| page.query(selector)) else {
        return Vec::new();
    };
    dom::query_all_in(&root, "p")
        .iter()
        .filter(|p| p.closest(EXCLUDED).ok().flatten().is_none())
        .filter_map(prose)
        .collect()
}

/// Estimate the reading time and write it into `#readingTime`.
///
/// Pages without countable prose are left untouched.
pub fn render(page: &Page, config: &ReadingConfig) -> Option<ReadingTime> {
    let texts = paragraphs(page);
    let estimate = ReadingTime::estimate(texts.iter().map(String::as_str), config)?;
    log::debug!("{} words, {} min read", estimate.words, estimate.minutes);
    if let Some(target) = page.document.get_element_by_id("readingTime") {
        target.set_inner_html(&format!("{ICON}{}", estimate.label()));
    }
    Some(estimate)
}
