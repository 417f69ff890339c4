//! Deterministic template bank keyed by issue category.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifier::IssueCategory;

/// How a template is picked when a category has several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStrategy {
    /// Always the first template.
    #[default]
    First,
    /// Reproducible choice from a seed mixed with the message text.
    ///
    /// The mix is FNV-1a over the message bytes followed by a splitmix64
    /// finalizer, so a given seed and message pick the same template on
    /// every build and platform.
    Seeded(u64),
    /// Thread-local randomness.
    Random,
}

impl TemplateStrategy {
    fn pick(&self, message: &str, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        match self {
            TemplateStrategy::First => 0,
            TemplateStrategy::Seeded(seed) => {
                (splitmix64(seed ^ fnv1a(message)) % len as u64) as usize
            }
            TemplateStrategy::Random => rand::thread_rng().gen_range(0..len),
        }
    }
}

fn fnv1a(message: &str) -> u64 {
    message.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Returns every template for a category.
pub fn templates_for(category: IssueCategory) -> &'static [&'static str] {
    match category {
        IssueCategory::Suicidal | IssueCategory::SelfHarm => &[
            "I'm deeply concerned about what you're sharing. Your life is precious and there are people who want to help you through this.",
            "Thank you for telling me. What you're feeling matters, and you deserve support from someone who can be with you right now.",
        ],
        IssueCategory::Panic => &[
            "I understand this feels overwhelming right now. Let's work through it together:\n\n1. **Grounding**: Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste\n2. **Breathing**: Inhale for 4 counts, hold for 4, exhale for 6\n3. **Remember**: This feeling is temporary, and you've gotten through difficult moments before.",
            "You're safe in this moment. Try breathing in for 4, holding for 4, and out for 6. Focus on one steady object near you while the wave passes.",
        ],
        IssueCategory::Depression => &[
            "It sounds like everything feels really heavy right now. Small steps count: is there one tiny thing you could do for yourself today?",
            "Feeling hopeless is exhausting, and it's not your fault. Feelings aren't facts, and they can change. I'm here to listen.",
            "Thank you for sharing something so hard. Reaching out to even one person today can make a difference.",
        ],
        IssueCategory::Sad => &[
            "I'm really sorry you're feeling this way. I'm here for you.",
            "It's okay to feel sad. You're not alone.",
            "Your feelings are valid. Do you want to talk more about it?",
        ],
        IssueCategory::Anxious => &[
            "It sounds like you're feeling overwhelmed. Take a deep breath, I'm with you.",
            "Anxiety can be tough, but talking about it helps.",
            "You're doing your best, and that's enough. Let's work through this together.",
        ],
        IssueCategory::Angry => &[
            "It's okay to feel angry. Something must have really affected you.",
            "If you want, you can tell me what triggered your anger.",
            "Anger often hides deeper hurt. I'm listening.",
        ],
        IssueCategory::Happy => &[
            "That's amazing! I'm genuinely happy for you!",
            "Love hearing positive things from you. Keep it going!",
            "Great! Want to tell me more about it?",
        ],
        IssueCategory::Neutral => &[
            "Thank you for sharing what's on your mind. I'm here to listen and support you. Would you like to tell me more about what's been going on?",
            "Thanks for opening up. Tell me more.",
            "I'm here to support you however I can.",
        ],
    }
}

/// Selects a template for `category` using `strategy`.
pub fn select_template(
    category: IssueCategory,
    message: &str,
    strategy: TemplateStrategy,
) -> &'static str {
    let templates = templates_for(category);
    templates[strategy.pick(message, templates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_templates() {
        for category in IssueCategory::all() {
            assert!(!templates_for(*category).is_empty(), "{}", category);
        }
    }

    #[test]
    fn first_strategy_is_fixed() {
        let a = select_template(IssueCategory::Sad, "a", TemplateStrategy::First);
        let b = select_template(IssueCategory::Sad, "b", TemplateStrategy::First);
        assert_eq!(a, b);
        assert_eq!(a, templates_for(IssueCategory::Sad)[0]);
    }

    #[test]
    fn seeded_strategy_is_reproducible() {
        let strategy = TemplateStrategy::Seeded(42);
        for text in ["I feel sad", "so sad today", "sad"] {
            assert_eq!(
                select_template(IssueCategory::Sad, text, strategy),
                select_template(IssueCategory::Sad, text, strategy)
            );
        }
    }

    #[test]
    fn message_hash_is_stable() {
        assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn seeded_picks_are_pinned() {
        let sad = templates_for(IssueCategory::Sad);
        let pick = |seed, text| {
            select_template(IssueCategory::Sad, text, TemplateStrategy::Seeded(seed))
        };

        assert_eq!(pick(42, "I feel sad"), sad[1]);
        assert_eq!(pick(2, "I feel sad"), sad[2]);
        assert_eq!(pick(0, "I feel sad"), sad[0]);
        assert_eq!(pick(3, "so sad today"), sad[2]);
        assert_eq!(pick(2, "sad"), sad[0]);
    }

    #[test]
    fn random_strategy_stays_in_bank() {
        for _ in 0..20 {
            let picked = select_template(IssueCategory::Angry, "x", TemplateStrategy::Random);
            assert!(templates_for(IssueCategory::Angry).contains(&picked));
        }
    }

    #[test]
    fn strategy_deserializes_from_json() {
        let first: TemplateStrategy = serde_json::from_str("\"first\"").unwrap();
        assert_eq!(first, TemplateStrategy::First);
        let seeded: TemplateStrategy = serde_json::from_str("{\"seeded\": 7}").unwrap();
        assert_eq!(seeded, TemplateStrategy::Seeded(7));
    }
}
