//! Typing animation for the search button placeholder.

use crate::config::PlaceholderConfig;

const IGNORED_TITLES: &[&str] = &[
    "home", "index", "back", "next", "previous", "toc", "contents",
];

/// A navigation link found on the page.
#[derive(Debug, Clone, Copy)]
pub struct LinkCandidate<'a> {
    /// Raw `href` attribute.
    pub href: &'a str,
    /// Link text.
    pub text: &'a str,
}

fn usable_title(text: &str) -> bool {
    text.chars().count() > 2 && !IGNORED_TITLES.iter().any(|t| t.eq_ignore_ascii_case(text))
}

/// Build the placeholder texts from navigation links and page headings.
///
/// Headings are only consulted when the links yield fewer than
/// `config.min_titles` titles.
pub fn build_placeholders<'a>(
    links: impl IntoIterator<Item = LinkCandidate<'a>>,
    headings: impl IntoIterator<Item = &'a str>,
    config: &PlaceholderConfig,
) -> Vec<String> {
    fn add(titles: &mut Vec<String>, text: &str) {
        if !titles.iter().any(|t| t == text) {
            titles.push(text.to_string());
        }
    }

    let mut titles: Vec<String> = Vec::new();

    for link in links {
        if link.href.is_empty() || link.href.starts_with('#') || link.href.starts_with("http") {
            continue;
        }
        let text = link.text.trim();
        if usable_title(text) {
            add(&mut titles, text);
        }
    }

    if titles.len() < config.min_titles {
        for heading in headings {
            let text = heading.trim();
            if text.chars().count() > 2 {
                add(&mut titles, text);
            }
        }
    }

    if titles.is_empty() || config.prefixes.is_empty() {
        return config.fallbacks.clone();
    }

    titles
        .into_iter()
        .take(config.max_titles)
        .enumerate()
        .map(|(i, title)| format!("{} {title}", config.prefixes[i % config.prefixes.len()]))
        .collect()
}

/// One step of the typewriter: text to display and the delay before the next
/// step, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

/// Types a placeholder character by character, pauses, deletes it, then moves
/// on to the next one, forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    placeholders: Vec<Vec<char>>,
    index: usize,
    chars: usize,
    typing: bool,
    type_delay_ms: u32,
    delete_delay_ms: u32,
    pause_ms: u32,
}

impl Typewriter {
    /// Create a typewriter over `placeholders`.
    ///
    /// An empty list falls back to the configured fallbacks.
    pub fn new(placeholders: Vec<String>, config: &PlaceholderConfig) -> Self {
        let source = if placeholders.is_empty() {
            config.fallbacks.clone()
        } else {
            placeholders
        };
        Self {
            placeholders: source.into_iter().map(|p| p.chars().collect()).collect(),
            index: 0,
            chars: 0,
            typing: true,
            type_delay_ms: config.type_delay_ms,
            delete_delay_ms: config.delete_delay_ms,
            pause_ms: config.pause_ms,
        }
    }

    /// Advance by one step.
    pub fn tick(&mut self) -> Frame {
        let Some(full) = self.placeholders.get(self.index) else {
            return Frame {
                text: String::new(),
                delay_ms: self.pause_ms,
            };
        };

        if self.typing {
            let text: String = full.iter().take(self.chars).collect();
            self.chars += 1;
            if self.chars > full.len() {
                self.chars = full.len();
                self.typing = false;
                return Frame {
                    text,
                    delay_ms: self.pause_ms,
                };
            }
            Frame {
                text,
                delay_ms: self.type_delay_ms,
            }
        } else {
            self.chars = self.chars.saturating_sub(1);
            let text: String = full.iter().take(self.chars).collect();
            if self.chars == 0 {
                self.typing = true;
                self.index = (self.index + 1) % self.placeholders.len();
                return Frame {
                    text,
                    delay_ms: self.type_delay_ms,
                };
            }
            Frame {
                text,
                delay_ms: self.delete_delay_ms,
            }
        }
    }
}
