//! Reading time estimation.

use crate::config::ReadingConfig;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count the words of one paragraph.
///
/// Paragraphs shorter than `min_chars` (after whitespace normalization) count
/// as zero. A word is a whitespace-separated token with at least one letter or
/// digit, so stray punctuation and symbols are skipped.
pub fn paragraph_words(text: &str, min_chars: usize) -> usize {
    let text = normalize_whitespace(text);
    if text.chars().count() < min_chars {
        return 0;
    }
    text.split(' ')
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Estimate of how long a page takes to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    /// Counted words.
    pub words: usize,

    /// Minutes, rounded up.
    pub minutes: u32,
}

impl ReadingTime {
    /// Estimate from paragraph texts. Returns `None` if no words were found.
    pub fn estimate<'a>(
        paragraphs: impl IntoIterator<Item = &'a str>,
        config: &ReadingConfig,
    ) -> Option<Self> {
        let words: usize = paragraphs
            .into_iter()
            .map(|p| paragraph_words(p, config.min_paragraph_chars))
            .sum();
        if words == 0 || config.words_per_minute == 0 {
            return None;
        }
        let minutes = words.div_ceil(config.words_per_minute as usize) as u32;
        Some(Self { words, minutes })
    }

    /// Label shown next to the stopwatch icon.
    pub fn label(&self) -> String {
        format!("{} min read", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
    }

    #[test]
    fn test_short_paragraph_skipped() {
        assert_eq!(paragraph_words("Too short.", 20), 0);
    }

    #[test]
    fn test_symbols_are_not_words() {
        let text = "Rust is fast — and safe, 100 % of the time → really";
        assert_eq!(paragraph_words(text, 20), 10);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(paragraph_words("Größe und Straße sind übliche Wörter", 20), 6);
    }

    #[test]
    fn test_estimate_rounds_up() {
        let paragraph = "word ".repeat(226);
        let time = ReadingTime::estimate([paragraph.as_str()], &ReadingConfig::default())
            .expect("words counted");
        assert_eq!(time.words, 226);
        assert_eq!(time.minutes, 2);
        assert_eq!(time.label(), "2 min read");
    }

    #[test]
    fn test_estimate_empty() {
        assert_eq!(ReadingTime::estimate(["", "tiny"], &ReadingConfig::default()), None);
    }
}
