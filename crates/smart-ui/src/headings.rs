//! Heading text cleanup.

use crate::dom::Page;

/// Strip leading whitespace from every `h1`. Returns how many changed.
pub fn trim_h1(page: &Page) -> usize {
    page.query_all("h1")
        .iter()
        .filter(|h1| {
            let text = h1.text_content().unwrap_or_default();
            let trimmed = text.trim_start();
            if trimmed.len() == text.len() {
                return false;
            }
            h1.set_text_content(Some(trimmed));
            true
        })
        .count()
}
