//! Estimated reading time.

use std::fmt;

/// Default reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Reading time estimate for a block of text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadingTime {
    /// Number of words counted.
    pub words: usize,
    /// Exact minutes at the configured speed.
    pub minutes: f64,
}

impl ReadingTime {
    /// Estimate reading time for `text` at `words_per_minute`.
    ///
    /// Words are runs of non-whitespace characters; each CJK character counts
    /// as a word of its own.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of(text: &str, words_per_minute: u32) -> Self {
        let words = count_words(text);
        let minutes = if words_per_minute == 0 {
            0.0
        } else {
            words as f64 / f64::from(words_per_minute)
        };
        Self { words, minutes }
    }

    /// Estimate reading time at [`DEFAULT_WORDS_PER_MINUTE`].
    #[must_use]
    pub fn of_default(text: &str) -> Self {
        Self::of(text, DEFAULT_WORDS_PER_MINUTE)
    }

    /// Whole minutes shown to readers: minutes rounded to two decimals, then
    /// rounded up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn displayed_minutes(&self) -> u64 {
        ((self.minutes * 100.0).round() / 100.0).ceil() as u64
    }

    /// Human-readable label, e.g. `"3 min read"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.displayed_minutes())
    }
}

fn count_words(text: &str) -> usize {
    let mut words = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_cjk(c) {
            words += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            words += 1;
            in_word = true;
        }
    }
    words
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30ff}' // Hiragana, Katakana
            | '\u{3400}'..='\u{4dbf}' // CJK Extension A
            | '\u{4e00}'..='\u{9fff}' // CJK Unified Ideographs
            | '\u{ac00}'..='\u{d7af}' // Hangul Syllables
            | '\u{f900}'..='\u{faff}' // CJK Compatibility Ideographs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let time = ReadingTime::of("", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(time.words, 0);
        assert_eq!(time.label(), "0 min read");
    }

    #[test]
    fn test_short_text_rounds_up() {
        let time = ReadingTime::of("just a few words here", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(time.words, 5);
        assert_eq!(time.label(), "1 min read");
    }

    #[test]
    fn test_exact_minutes() {
        let text = "word ".repeat(400);
        let time = ReadingTime::of(&text, DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(time.words, 400);
        assert_eq!(time.label(), "2 min read");
    }

    #[test]
    fn test_rounding_to_two_decimals_first() {
        let time = ReadingTime {
            words: 0,
            minutes: 2.004,
        };
        assert_eq!(time.displayed_minutes(), 2);

        let text = "word ".repeat(402);
        assert_eq!(ReadingTime::of(&text, DEFAULT_WORDS_PER_MINUTE).label(), "3 min read");
    }

    #[test]
    fn test_cjk_characters_count_as_words() {
        let time = ReadingTime::of("日本語 text", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(time.words, 4);
    }

    #[test]
    fn test_of_default() {
        assert_eq!(ReadingTime::of_default("one two").words, 2);
    }

    #[test]
    fn test_custom_speed() {
        let text = "word ".repeat(100);
        let time = ReadingTime::of(&text, 50);
        assert_eq!(time.label(), "2 min read");
    }
}
