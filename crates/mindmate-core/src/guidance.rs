//! Coping strategies, support needs, and the support plan.

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, IssueCategory};

/// Kind of support a message calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportNeed {
    EmotionalSupport,
    CalmingGuidance,
    AngerManagement,
    PositiveReinforcement,
    GeneralSupport,
}

impl SupportNeed {
    fn for_issue(category: IssueCategory) -> Option<Self> {
        match category {
            IssueCategory::Sad | IssueCategory::Depression => Some(SupportNeed::EmotionalSupport),
            IssueCategory::Anxious | IssueCategory::Panic => Some(SupportNeed::CalmingGuidance),
            IssueCategory::Angry => Some(SupportNeed::AngerManagement),
            IssueCategory::Happy => Some(SupportNeed::PositiveReinforcement),
            IssueCategory::Suicidal | IssueCategory::SelfHarm | IssueCategory::Neutral => None,
        }
    }
}

/// Maps detected issues to support needs, deduplicated and sorted.
///
/// Falls back to `GeneralSupport` when nothing maps.
pub fn support_needs(issues: &[IssueCategory]) -> Vec<SupportNeed> {
    let mut needs: Vec<SupportNeed> = issues
        .iter()
        .filter_map(|c| SupportNeed::for_issue(*c))
        .collect();
    needs.sort();
    needs.dedup();

    if needs.is_empty() {
        needs.push(SupportNeed::GeneralSupport);
    }
    needs
}

const CRISIS_STRATEGY: &str = "\
🚨 **CRITICAL**: Please contact crisis support immediately:
• Call 988 (Suicide Prevention)
• Text HOME to 741741
• You are not alone - help is available NOW";

const PANIC_STRATEGY: &str = "\
💨 **Panic Attack Protocol**:
1. 5-4-3-2-1 Grounding Technique
2. Deep breathing: 4-4-6 pattern
3. Focus on one safe object in your environment";

const DEPRESSION_STRATEGY: &str = "\
🤗 **Depression Support**:
• Break tasks into tiny steps
• Reach out to one person today
• Remember: feelings aren't facts";

const WELLNESS_STRATEGY: &str = "\
🌱 **General Wellness**:
• Practice mindfulness for 5 minutes
• Connect with nature or pets
• Engage in gentle physical activity";

/// Picks a coping strategy for the most pressing detected issue.
pub fn coping_strategy(classification: &ClassificationResult) -> &'static str {
    if classification.has_issue(IssueCategory::Suicidal)
        || classification.has_issue(IssueCategory::SelfHarm)
    {
        CRISIS_STRATEGY
    } else if classification.has_issue(IssueCategory::Panic) {
        PANIC_STRATEGY
    } else if classification.has_issue(IssueCategory::Depression) {
        DEPRESSION_STRATEGY
    } else {
        WELLNESS_STRATEGY
    }
}

/// Staged plan attached to every support report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportPlan {
    pub immediate_actions: Vec<String>,
    pub short_term_goals: Vec<String>,
    pub long_term_strategies: Vec<String>,
}

impl Default for SupportPlan {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            immediate_actions: owned(&[
                "Practice grounding techniques",
                "Contact support network",
                "Use coping strategies",
            ]),
            short_term_goals: owned(&["Daily check-ins", "Mood tracking", "Small achievable tasks"]),
            long_term_strategies: owned(&[
                "Therapy exploration",
                "Support group connection",
                "Wellness routine development",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskClassifier;

    #[test]
    fn needs_default_to_general_support() {
        assert_eq!(support_needs(&[]), vec![SupportNeed::GeneralSupport]);
        assert_eq!(
            support_needs(&[IssueCategory::Suicidal]),
            vec![SupportNeed::GeneralSupport]
        );
    }

    #[test]
    fn needs_are_deduplicated() {
        let needs = support_needs(&[
            IssueCategory::Depression,
            IssueCategory::Anxious,
            IssueCategory::Sad,
            IssueCategory::Happy,
        ]);
        assert_eq!(
            needs,
            vec![
                SupportNeed::EmotionalSupport,
                SupportNeed::CalmingGuidance,
                SupportNeed::PositiveReinforcement
            ]
        );
    }

    #[test]
    fn coping_strategy_follows_priority() {
        let classifier = RiskClassifier::new();
        assert!(coping_strategy(&classifier.classify("panic attack, I want to die")).contains("988"));
        assert!(coping_strategy(&classifier.classify("I cut myself")).contains("741741"));
        assert!(coping_strategy(&classifier.classify("panic attack and hopeless"))
            .contains("Panic Attack Protocol"));
        assert!(coping_strategy(&classifier.classify("I feel hopeless")).contains("Depression"));
        assert!(coping_strategy(&classifier.classify("hello")).contains("General Wellness"));
    }

    #[test]
    fn default_plan_has_three_stages() {
        let plan = SupportPlan::default();
        assert_eq!(plan.immediate_actions.len(), 3);
        assert_eq!(plan.short_term_goals.len(), 3);
        assert_eq!(plan.long_term_strategies.len(), 3);
    }
}
