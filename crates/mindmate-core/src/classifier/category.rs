//! Issue categories, severity tiers, and the classification result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency tier of a classified message.
///
/// Ordered so that `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    /// No keyword hit and ordinary emotional intensity.
    #[default]
    Low,
    /// Panic indicators, or unusually intense affect.
    Medium,
    /// Suicidal or self-harm indicators.
    High,
}

impl CrisisLevel {
    /// Returns the lowercase tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisLevel::Low => "low",
            CrisisLevel::Medium => "medium",
            CrisisLevel::High => "high",
        }
    }

    /// Returns true when the level calls for immediate attention.
    pub fn requires_immediate_action(&self) -> bool {
        *self >= CrisisLevel::Medium
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a matched category contributes to the crisis level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Describes affect only; never raises the crisis level on its own.
    Affect,
    /// Raises the crisis level to at least `Medium`.
    Medium,
    /// Raises the crisis level to `High`.
    High,
}

impl Severity {
    /// The crisis level a match of this severity implies.
    pub fn crisis_level(&self) -> CrisisLevel {
        match self {
            Severity::Affect => CrisisLevel::Low,
            Severity::Medium => CrisisLevel::Medium,
            Severity::High => CrisisLevel::High,
        }
    }
}

/// Categories of concerning or emotional content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Suicidal ideation.
    Suicidal,
    /// Self-harm.
    SelfHarm,
    /// Panic attack symptoms.
    Panic,
    /// Depressive language.
    Depression,
    /// Anxiety and worry.
    Anxious,
    /// Sadness.
    Sad,
    /// Anger and frustration.
    Angry,
    /// Positive affect.
    Happy,
    /// Nothing recognised.
    Neutral,
}

impl IssueCategory {
    /// Returns all categories in priority order, most severe first.
    pub fn all() -> &'static [IssueCategory] {
        &[
            IssueCategory::Suicidal,
            IssueCategory::SelfHarm,
            IssueCategory::Panic,
            IssueCategory::Depression,
            IssueCategory::Anxious,
            IssueCategory::Sad,
            IssueCategory::Angry,
            IssueCategory::Happy,
            IssueCategory::Neutral,
        ]
    }

    /// Returns the snake_case tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Suicidal => "suicidal",
            IssueCategory::SelfHarm => "self_harm",
            IssueCategory::Panic => "panic",
            IssueCategory::Depression => "depression",
            IssueCategory::Anxious => "anxious",
            IssueCategory::Sad => "sad",
            IssueCategory::Angry => "angry",
            IssueCategory::Happy => "happy",
            IssueCategory::Neutral => "neutral",
        }
    }

    /// Returns the severity tier of this category.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCategory::Suicidal | IssueCategory::SelfHarm => Severity::High,
            IssueCategory::Panic => Severity::Medium,
            _ => Severity::Affect,
        }
    }

    /// Returns the descriptive emotion labels for this category.
    pub fn emotion_labels(&self) -> &'static str {
        match self {
            IssueCategory::Suicidal => "desperate, hopeless, suicidal",
            IssueCategory::SelfHarm => "hurting, distressed, overwhelmed",
            IssueCategory::Panic => "anxious, overwhelmed, scared",
            IssueCategory::Depression => "sad, depressed, hopeless",
            IssueCategory::Anxious => "anxious, worried, tense",
            IssueCategory::Sad => "sad, down, hurt",
            IssueCategory::Angry => "angry, frustrated",
            IssueCategory::Happy => "happy, hopeful",
            IssueCategory::Neutral => "concerned, attentive",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Tiered urgency.
    pub crisis_level: CrisisLevel,
    /// Every category with at least one matching phrase, in priority order.
    pub detected_issues: Vec<IssueCategory>,
    /// Weighted severity estimate (0.0 to 1.0).
    pub risk_score: f32,
    /// Surface-feature intensity estimate (0.0 to 1.0).
    pub emotional_intensity: f32,
    /// Human-readable affect summary.
    pub emotions: String,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            crisis_level: CrisisLevel::Low,
            detected_issues: Vec::new(),
            risk_score: 0.0,
            emotional_intensity: 0.0,
            emotions: IssueCategory::Neutral.emotion_labels().to_string(),
        }
    }
}

impl ClassificationResult {
    /// Returns the highest-priority detected category, or `Neutral`.
    pub fn dominant_issue(&self) -> IssueCategory {
        self.detected_issues
            .iter()
            .copied()
            .min()
            .unwrap_or(IssueCategory::Neutral)
    }

    /// Returns true if the given category was detected.
    pub fn has_issue(&self, category: IssueCategory) -> bool {
        self.detected_issues.contains(&category)
    }

    /// Returns true when the crisis level calls for immediate attention.
    pub fn immediate_action_required(&self) -> bool {
        self.crisis_level.requires_immediate_action()
    }
}
