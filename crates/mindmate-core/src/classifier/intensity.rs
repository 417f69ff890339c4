//! Emotional intensity from surface text features.
//!
//! Four indicators are counted: intensifier words, exclamation marks, long
//! words (more than 8 characters), and `" not "` negations. Their sum is
//! divided by `word_count + 1` and clamped to `[0.0, 1.0]`.

/// Words that amplify whatever follows them.
const INTENSIFIERS: &[&str] = &["very", "extremely", "really", "so", "too"];

/// Words longer than this many characters count as intense.
const LONG_WORD_CHARS: usize = 8;

const NEGATION: &str = " not ";

/// Raw indicator counts behind an intensity score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntensityIndicators {
    pub intensifiers: usize,
    pub exclamations: usize,
    pub long_words: usize,
    pub negations: usize,
    pub word_count: usize,
}

impl IntensityIndicators {
    /// Counts indicators in already-lowercased text.
    pub fn count(text_lower: &str) -> Self {
        let words: Vec<&str> = text_lower.split_whitespace().collect();

        Self {
            intensifiers: words.iter().filter(|w| INTENSIFIERS.contains(w)).count(),
            exclamations: text_lower.matches('!').count(),
            long_words: words
                .iter()
                .filter(|w| w.chars().count() > LONG_WORD_CHARS)
                .count(),
            negations: text_lower.matches(NEGATION).count(),
            word_count: words.len(),
        }
    }

    /// Normalized intensity in `[0.0, 1.0]`.
    pub fn score(&self) -> f32 {
        let total = self.intensifiers + self.exclamations + self.long_words + self.negations;
        (total as f32 / (self.word_count + 1) as f32).clamp(0.0, 1.0)
    }
}

/// Computes the emotional intensity of already-lowercased text.
pub fn emotional_intensity(text_lower: &str) -> f32 {
    IntensityIndicators::count(text_lower).score()
}
