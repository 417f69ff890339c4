//! Versioned keyword table and phrase matcher.
//!
//! Every category owns a fixed list of trigger phrases. Crisis-tier
//! categories (high and medium severity) match as literal substrings so a
//! trigger phrase is never missed because of surrounding punctuation or
//! glued words. Affect-only categories match on word boundaries, which keeps
//! "mad" out of "made" and "down" out of "download".

use regex::RegexSet;

use super::{IssueCategory, Severity};

/// Version of [`KEYWORD_TABLE`]. Bump whenever a phrase list changes.
pub const KEYWORD_TABLE_VERSION: u32 = 1;

/// Trigger phrases per category, in priority order. All lowercase.
pub const KEYWORD_TABLE: &[(IssueCategory, &[&str])] = &[
    (
        IssueCategory::Suicidal,
        &[
            "kill myself",
            "end it all",
            "suicide",
            "suicidal",
            "want to die",
            "not worth living",
            "end my life",
        ],
    ),
    (
        IssueCategory::SelfHarm,
        &[
            "cut myself",
            "self harm",
            "self-harm",
            "hurt myself",
            "bleeding",
        ],
    ),
    (
        IssueCategory::Panic,
        &[
            "panic attack",
            "cant breathe",
            "can't breathe",
            "heart racing",
            "losing control",
        ],
    ),
    (
        IssueCategory::Depression,
        &[
            "hopeless",
            "empty inside",
            "no point",
            "cant get out of bed",
            "can't get out of bed",
        ],
    ),
    (
        IssueCategory::Anxious,
        &["anxious", "nervous", "worried", "stressed"],
    ),
    (IssueCategory::Sad, &["sad", "unhappy", "depressed", "down"]),
    (IssueCategory::Angry, &["angry", "mad", "frustrated"]),
    (IssueCategory::Happy, &["happy", "joyful", "excited", "glad"]),
];

/// How a trigger phrase is located in the lowercased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Literal substring anywhere in the text.
    Substring,
    /// Whole words only (`\b` on both ends of the phrase).
    WordBoundary,
}

impl MatchPolicy {
    /// Returns the policy used for a category of the given severity.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High | Severity::Medium => MatchPolicy::Substring,
            Severity::Affect => MatchPolicy::WordBoundary,
        }
    }

    fn pattern(&self, phrase: &str) -> String {
        let escaped = regex::escape(phrase);
        match self {
            MatchPolicy::Substring => escaped,
            MatchPolicy::WordBoundary => format!(r"\b{}\b", escaped),
        }
    }
}

/// A category hit together with the first phrase that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub category: IssueCategory,
    pub phrase: &'static str,
}

/// Compiled patterns for one category.
#[derive(Debug)]
struct CategoryPatterns {
    category: IssueCategory,
    phrases: &'static [&'static str],
    /// Regex set for fast multi-pattern matching.
    regex_set: RegexSet,
}

/// Matches text against the keyword table.
#[derive(Debug)]
pub struct KeywordMatcher {
    patterns: Vec<CategoryPatterns>,
}

impl KeywordMatcher {
    /// Compiles the default keyword table.
    pub fn new() -> Self {
        Self {
            patterns: KEYWORD_TABLE
                .iter()
                .map(|(category, phrases)| Self::build_category_patterns(*category, phrases))
                .collect(),
        }
    }

    /// Returns one match per category that has at least one phrase in `text_lower`.
    ///
    /// Categories are reported in priority order; overlapping hits across
    /// categories are all kept.
    pub fn find(&self, text_lower: &str) -> Vec<KeywordMatch> {
        let mut matches = Vec::new();

        for cat_patterns in &self.patterns {
            let hits = cat_patterns.regex_set.matches(text_lower);
            if let Some(idx) = hits.iter().next() {
                matches.push(KeywordMatch {
                    category: cat_patterns.category,
                    phrase: cat_patterns.phrases[idx],
                });
            }
        }

        matches
    }

    fn build_category_patterns(
        category: IssueCategory,
        phrases: &'static [&'static str],
    ) -> CategoryPatterns {
        let policy = MatchPolicy::for_severity(category.severity());
        let patterns: Vec<String> = phrases.iter().map(|p| policy.pattern(p)).collect();
        let regex_set = RegexSet::new(&patterns).expect("Invalid keyword patterns");

        CategoryPatterns {
            category,
            phrases,
            regex_set,
        }
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(text: &str) -> Vec<IssueCategory> {
        KeywordMatcher::new()
            .find(&text.to_lowercase())
            .into_iter()
            .map(|m| m.category)
            .collect()
    }

    #[test]
    fn table_is_lowercase_and_in_priority_order() {
        for (_, phrases) in KEYWORD_TABLE {
            for phrase in *phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
        assert!(KEYWORD_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn neutral_has_no_keywords() {
        assert!(KEYWORD_TABLE
            .iter()
            .all(|(c, _)| *c != IssueCategory::Neutral));
    }

    #[test]
    fn crisis_phrases_match_inside_words() {
        assert_eq!(categories("nosuicide pact"), vec![IssueCategory::Suicidal]);
        assert_eq!(
            categories("i had a panic attacks again"),
            vec![IssueCategory::Panic]
        );
    }

    #[test]
    fn affect_phrases_need_word_boundaries() {
        assert!(categories("I made dinner").is_empty());
        assert!(categories("the download finished").is_empty());
        assert_eq!(categories("I am so mad"), vec![IssueCategory::Angry]);
        assert_eq!(categories("feeling down."), vec![IssueCategory::Sad]);
    }

    #[test]
    fn overlapping_categories_are_all_reported() {
        assert_eq!(
            categories("I feel hopeless and sad and I want to die"),
            vec![
                IssueCategory::Suicidal,
                IssueCategory::Depression,
                IssueCategory::Sad
            ]
        );
    }

    #[test]
    fn reports_first_matching_phrase() {
        let matches = KeywordMatcher::new().find("i cut myself and i was bleeding");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, IssueCategory::SelfHarm);
        assert_eq!(matches[0].phrase, "cut myself");
    }

    #[test]
    fn apostrophes_are_matched_literally() {
        assert_eq!(categories("I can't breathe"), vec![IssueCategory::Panic]);
        assert_eq!(categories("I cant breathe"), vec![IssueCategory::Panic]);
    }

    #[test]
    fn policy_follows_severity() {
        assert_eq!(MatchPolicy::for_severity(Severity::High), MatchPolicy::Substring);
        assert_eq!(MatchPolicy::for_severity(Severity::Medium), MatchPolicy::Substring);
        assert_eq!(MatchPolicy::for_severity(Severity::Affect), MatchPolicy::WordBoundary);
        assert_eq!(MatchPolicy::WordBoundary.pattern("can't"), r"can't");
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert!(categories("").is_empty());
        assert!(categories("   \n\t").is_empty());
    }
}
