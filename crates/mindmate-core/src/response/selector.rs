//! Response selection: template or external text, crisis augmentation, resources.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::resources::{resources_for, ResourceMap, CRISIS_RESOURCES_BLOCK};
use super::templates::{select_template, TemplateStrategy};
use crate::classifier::{ClassificationResult, CrisisLevel};

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrigin {
    /// An external text generator.
    External,
    /// The internal template bank.
    Template,
}

/// Final reply returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub response_text: String,
    pub crisis_level: CrisisLevel,
    pub emotions: String,
    pub resources: ResourceMap,
    pub origin: ResponseOrigin,
}

/// Builds a [`ResponseRecord`] from a classification.
#[derive(Debug, Clone, Default)]
pub struct ResponseSelector {
    strategy: TemplateStrategy,
}

impl ResponseSelector {
    /// Creates a selector with the given template strategy.
    pub fn new(strategy: TemplateStrategy) -> Self {
        Self { strategy }
    }

    /// Selects the reply for `original_text`.
    ///
    /// Non-blank `external_text` is used with surrounding whitespace
    /// trimmed; otherwise a template is chosen for the dominant category.
    /// High-risk replies always get the crisis resources block appended.
    pub fn select(
        &self,
        original_text: &str,
        classification: &ClassificationResult,
        external_text: Option<&str>,
    ) -> ResponseRecord {
        let external = external_text.map(str::trim).filter(|t| !t.is_empty());

        let (mut response_text, origin) = match external {
            Some(text) => (text.to_string(), ResponseOrigin::External),
            None => {
                let category = classification.dominant_issue();
                debug!(%category, "Using template response");
                (
                    select_template(category, original_text, self.strategy).to_string(),
                    ResponseOrigin::Template,
                )
            }
        };

        if classification.crisis_level == CrisisLevel::High {
            response_text.push_str("\n\n");
            response_text.push_str(CRISIS_RESOURCES_BLOCK);
        }

        ResponseRecord {
            response_text,
            crisis_level: classification.crisis_level,
            emotions: classification.emotions.clone(),
            resources: resources_for(classification.crisis_level),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskClassifier;
    use crate::response::{full_catalog, ResourceCategory};

    fn respond(text: &str, external: Option<&str>) -> ResponseRecord {
        let classification = RiskClassifier::new().classify(text);
        ResponseSelector::default().select(text, &classification, external)
    }

    #[test]
    fn suicidal_template_end_to_end() {
        let record = respond("I want to kill myself", None);
        assert_eq!(record.crisis_level, CrisisLevel::High);
        assert_eq!(record.origin, ResponseOrigin::Template);
        assert!(record.response_text.contains("988"));
        assert!(record.response_text.ends_with(CRISIS_RESOURCES_BLOCK));
        assert_eq!(record.resources.len(), 1);
        assert!(record.resources.contains_key(&ResourceCategory::Crisis));
    }

    #[test]
    fn crisis_block_appended_to_external_text() {
        let external = "Please call 988 right away.";
        let record = respond("I want to die", Some(external));
        assert_eq!(record.origin, ResponseOrigin::External);
        assert!(record.response_text.starts_with(external));
        assert!(record.response_text.ends_with(CRISIS_RESOURCES_BLOCK));
    }

    #[test]
    fn happy_message_gets_full_catalog() {
        let record = respond("I'm happy today", None);
        assert_eq!(record.crisis_level, CrisisLevel::Low);
        assert_eq!(record.resources, full_catalog());
        assert!(!record.response_text.contains(CRISIS_RESOURCES_BLOCK));
        assert_eq!(record.response_text, "That's amazing! I'm genuinely happy for you!");
    }

    #[test]
    fn medium_level_keeps_full_catalog() {
        let record = respond("I think I'm having a panic attack", None);
        assert_eq!(record.crisis_level, CrisisLevel::Medium);
        assert_eq!(record.resources, full_catalog());
        assert!(!record.response_text.contains("741741"));
    }

    #[test]
    fn blank_external_text_falls_back_silently() {
        for external in [Some(""), Some("   \n"), None] {
            let record = respond("I feel sad", external);
            assert_eq!(record.origin, ResponseOrigin::Template);
            assert_eq!(
                record.response_text,
                "I'm really sorry you're feeling this way. I'm here for you."
            );
        }
    }

    #[test]
    fn external_text_is_used_for_low_risk() {
        let record = respond("hello there", Some("Hi! How are you feeling today?"));
        assert_eq!(record.origin, ResponseOrigin::External);
        assert_eq!(record.response_text, "Hi! How are you feeling today?");
    }

    #[test]
    fn external_text_is_trimmed() {
        let record = respond("hello there", Some("\n  Hi! How are you?  \n"));
        assert_eq!(record.origin, ResponseOrigin::External);
        assert_eq!(record.response_text, "Hi! How are you?");
    }

    #[test]
    fn emotions_are_carried_over() {
        let record = respond("", None);
        assert_eq!(record.emotions, "concerned, attentive");
        assert_eq!(record.crisis_level, CrisisLevel::Low);
    }

    #[test]
    fn record_serializes_for_the_ui() {
        let json = serde_json::to_value(respond("I want to kill myself", None)).unwrap();
        assert_eq!(json["crisis_level"], "high");
        assert_eq!(json["origin"], "template");
        assert!(json["resources"]["crisis"].is_object());
        assert!(json["resources"].get("therapy").is_none());
    }
}
