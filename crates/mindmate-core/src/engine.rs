//! Per-message pipeline: classify, optionally generate, select.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::classifier::{ClassificationResult, RiskClassifier};
use crate::config::EngineConfig;
use crate::conversation::Conversation;
use crate::generator::{build_prompt, GenerationError, GeneratorBackend};
use crate::guidance::{coping_strategy, support_needs, SupportNeed, SupportPlan};
use crate::response::{ResponseRecord, ResponseSelector};

/// Full orchestrator output for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportReport {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub processing_time_ms: u64,
    pub assessment: ClassificationResult,
    pub response: ResponseRecord,
    pub support_needs: Vec<SupportNeed>,
    pub coping_strategy: String,
    pub support_plan: SupportPlan,
    /// True when the crisis level is medium or high.
    pub crisis_detected: bool,
    pub timestamp: DateTime<Utc>,
}

/// Classifier, selector, and generator wired together.
///
/// Holds no per-conversation state and can be shared across tasks.
#[derive(Debug)]
pub struct SupportEngine {
    classifier: RiskClassifier,
    selector: ResponseSelector,
    generator: GeneratorBackend,
    generator_timeout: Duration,
}

impl SupportEngine {
    /// Creates an engine from config and a generator backend.
    pub fn new(config: EngineConfig, generator: GeneratorBackend) -> Self {
        Self {
            generator_timeout: config.generator_timeout(),
            classifier: RiskClassifier::with_policy(config.risk),
            selector: ResponseSelector::new(config.templates),
            generator,
        }
    }

    /// Creates an engine with default config and no external generator.
    pub fn template_only() -> Self {
        Self::new(EngineConfig::default(), GeneratorBackend::Template)
    }

    /// Returns the generator backend name.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Classifies a message without producing a reply.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text)
    }

    /// Produces the reply for one message.
    pub async fn respond(&self, text: &str) -> ResponseRecord {
        let classification = self.classifier.classify(text);
        self.respond_classified(text, &classification).await
    }

    /// Produces a reply and records the turn in `conversation`.
    pub async fn respond_in(&self, conversation: &mut Conversation, text: &str) -> ResponseRecord {
        let response = self.respond(text).await;
        conversation.record(text, response.clone());
        response
    }

    /// Runs the full pipeline and returns a report with guidance attached.
    pub async fn process_message(
        &self,
        text: &str,
        user_id: Option<String>,
        session_id: Option<String>,
    ) -> SupportReport {
        let start = Instant::now();
        debug!(message_len = text.len(), "Processing message");

        let assessment = self.classifier.classify(text);
        let response = self.respond_classified(text, &assessment).await;
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            crisis_level = %assessment.crisis_level,
            origin = ?response.origin,
            processing_time_ms,
            "Message processed"
        );

        SupportReport {
            user_id,
            session_id,
            processing_time_ms,
            support_needs: support_needs(&assessment.detected_issues),
            coping_strategy: coping_strategy(&assessment).to_string(),
            support_plan: SupportPlan::default(),
            crisis_detected: assessment.immediate_action_required(),
            assessment,
            response,
            timestamp: Utc::now(),
        }
    }

    async fn respond_classified(
        &self,
        text: &str,
        classification: &ClassificationResult,
    ) -> ResponseRecord {
        let external = self.external_text(text, classification).await;
        self.selector.select(text, classification, external.as_deref())
    }

    /// Asks the external generator for text. Any failure yields `None`.
    async fn external_text(
        &self,
        text: &str,
        classification: &ClassificationResult,
    ) -> Option<String> {
        let GeneratorBackend::External(generator) = &self.generator else {
            return None;
        };
        if text.trim().is_empty() {
            return None;
        }

        let prompt = build_prompt(text, classification);
        let result = match timeout(self.generator_timeout, generator.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.generator_timeout)),
        };

        match result {
            Ok(generated) => Some(generated),
            Err(e) => {
                warn!(generator = generator.name(), "Falling back to templates: {}", e);
                None
            }
        }
    }
}
