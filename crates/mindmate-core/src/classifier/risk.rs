//! Risk classifier: keyword tiers, intensity escalation, and risk scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::intensity::emotional_intensity;
use super::{ClassificationResult, CrisisLevel, IssueCategory, KeywordMatcher};

/// Tunable constants of the risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    /// Intensity above which a `Low` message is escalated to `Medium`.
    pub escalation_threshold: f32,
    /// Per-category risk weights. Entries given in config are merged over
    /// the defaults rather than replacing them.
    #[serde(deserialize_with = "merge_issue_weights")]
    pub issue_weights: BTreeMap<IssueCategory, f32>,
    /// Weight for categories missing from `issue_weights`.
    pub generic_weight: f32,
    /// Added when the text contains "help".
    pub help_bonus: f32,
    /// Added when the text contains "alone" or "lonely".
    pub loneliness_bonus: f32,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            escalation_threshold: 0.8,
            issue_weights: BTreeMap::from([
                (IssueCategory::Suicidal, 1.0),
                (IssueCategory::SelfHarm, 0.9),
                (IssueCategory::Panic, 0.7),
                (IssueCategory::Depression, 0.6),
            ]),
            generic_weight: 0.5,
            help_bonus: 0.3,
            loneliness_bonus: 0.2,
        }
    }
}

fn merge_issue_weights<'de, D>(deserializer: D) -> Result<BTreeMap<IssueCategory, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<IssueCategory, f32>::deserialize(deserializer)?;
    let mut weights = RiskPolicy::default().issue_weights;
    weights.extend(overrides);
    Ok(weights)
}

impl RiskPolicy {
    /// Returns the weight for a detected category.
    pub fn weight(&self, category: IssueCategory) -> f32 {
        self.issue_weights
            .get(&category)
            .copied()
            .unwrap_or(self.generic_weight)
    }

    /// Computes the risk score for lowercased text and its detected issues.
    pub fn risk_score(&self, text_lower: &str, issues: &[IssueCategory]) -> f32 {
        let mut score = issues.iter().fold(0.0f32, |acc, c| acc + self.weight(*c));

        if text_lower.contains("help") {
            score += self.help_bonus;
        }
        if text_lower.contains("alone") || text_lower.contains("lonely") {
            score += self.loneliness_bonus;
        }

        score.clamp(0.0, 1.0)
    }
}

/// Maps raw message text to a [`ClassificationResult`].
///
/// Classification is a pure function of the text and the policy; it never
/// fails and holds no mutable state.
#[derive(Debug)]
pub struct RiskClassifier {
    keywords: KeywordMatcher,
    policy: RiskPolicy,
}

impl RiskClassifier {
    /// Creates a classifier with the default policy.
    pub fn new() -> Self {
        Self::with_policy(RiskPolicy::default())
    }

    /// Creates a classifier with a custom policy.
    pub fn with_policy(policy: RiskPolicy) -> Self {
        Self {
            keywords: KeywordMatcher::new(),
            policy,
        }
    }

    /// Classifies a message.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let text_lower = text.to_lowercase();

        let matches = self.keywords.find(&text_lower);
        let detected_issues: Vec<IssueCategory> = matches.iter().map(|m| m.category).collect();

        for m in &matches {
            debug!(category = %m.category, phrase = m.phrase, "Keyword match");
        }

        // High is terminal: the max over severities can never be lowered by more matches.
        let mut crisis_level = detected_issues
            .iter()
            .map(|c| c.severity().crisis_level())
            .max()
            .unwrap_or(CrisisLevel::Low);

        let emotional_intensity = emotional_intensity(&text_lower);
        if crisis_level == CrisisLevel::Low
            && emotional_intensity > self.policy.escalation_threshold
        {
            debug!(emotional_intensity, "Escalating on intensity");
            crisis_level = CrisisLevel::Medium;
        }

        let risk_score = self.policy.risk_score(&text_lower, &detected_issues);

        let emotions = detected_issues
            .first()
            .copied()
            .unwrap_or(IssueCategory::Neutral)
            .emotion_labels()
            .to_string();

        if crisis_level == CrisisLevel::High {
            warn!(issues = ?detected_issues, risk_score, "Crisis indicators detected");
        }

        ClassificationResult {
            crisis_level,
            detected_issues,
            risk_score,
            emotional_intensity,
            emotions,
        }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new()
    }
}
