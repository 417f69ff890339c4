//! Optional external text generation.
//!
//! A [`TextGenerator`] turns a prompt into free text or fails. The engine
//! treats every failure as "no external text" and falls back to the
//! template bank, so nothing in this module is ever user-visible.

mod gemini;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::classifier::ClassificationResult;

pub use gemini::{GeminiGenerator, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};

/// Instruction preamble sent ahead of every user message.
pub const PROMPT_PREAMBLE: &str = "\
You are MindMate, a warm and compassionate mental health support companion. \
Reply in two to four short paragraphs. Validate the person's feelings, offer one or two \
gentle coping ideas, and encourage professional help where appropriate. Never diagnose, \
never judge, and do not list phone numbers: crisis resources are added separately.";

/// Errors at the generator boundary.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential was supplied.
    #[error("text generator is not configured")]
    NotConfigured,

    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the backend.
    #[error("generator returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Error object in an otherwise successful response.
    #[error("generator api error: {0}")]
    Api(String),

    /// The backend returned no usable text.
    #[error("generator returned no text")]
    EmptyResponse,

    /// The call exceeded its time budget.
    #[error("generator timed out after {0:?}")]
    Timeout(Duration),
}

/// Capability: prompt in, text or failure out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Returns the backend name for logging and health output.
    fn name(&self) -> &str;
}

/// The generator selected at startup.
#[derive(Clone)]
pub enum GeneratorBackend {
    /// A network-backed generator.
    External(Arc<dyn TextGenerator>),
    /// Internal deterministic templates only.
    Template,
}

impl GeneratorBackend {
    /// Picks Gemini when an API key is available, templates otherwise.
    pub fn from_api_key(api_key: Option<&str>, model: &str) -> Self {
        let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
            warn!("No generator API key found, using template responses");
            return GeneratorBackend::Template;
        };

        match GeminiGenerator::new(key) {
            Ok(generator) => GeneratorBackend::External(Arc::new(generator.with_model(model))),
            Err(e) => {
                warn!("Failed to set up Gemini generator, using template responses: {}", e);
                GeneratorBackend::Template
            }
        }
    }

    /// Returns the backend name.
    pub fn name(&self) -> &str {
        match self {
            GeneratorBackend::External(generator) => generator.name(),
            GeneratorBackend::Template => "template",
        }
    }

    /// Returns true when an external generator is configured.
    pub fn is_external(&self) -> bool {
        matches!(self, GeneratorBackend::External(_))
    }
}

impl fmt::Debug for GeneratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorBackend::External(generator) => {
                f.debug_tuple("External").field(&generator.name()).finish()
            }
            GeneratorBackend::Template => f.write_str("Template"),
        }
    }
}

/// Builds the generator prompt for a classified message.
pub fn build_prompt(message: &str, classification: &ClassificationResult) -> String {
    format!(
        "{}\n\nAssessed crisis level: {}\nApparent emotions: {}\n\nUser message:\n{}",
        PROMPT_PREAMBLE, classification.crisis_level, classification.emotions, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskClassifier;

    #[test]
    fn missing_or_blank_key_selects_templates() {
        assert!(!GeneratorBackend::from_api_key(None, DEFAULT_GEMINI_MODEL).is_external());
        assert!(!GeneratorBackend::from_api_key(Some("  "), DEFAULT_GEMINI_MODEL).is_external());
        assert_eq!(
            GeneratorBackend::from_api_key(None, DEFAULT_GEMINI_MODEL).name(),
            "template"
        );
    }

    #[test]
    fn api_key_selects_gemini() {
        let backend = GeneratorBackend::from_api_key(Some("key"), DEFAULT_GEMINI_MODEL);
        assert!(backend.is_external());
        assert_eq!(backend.name(), "gemini");
    }

    #[test]
    fn prompt_contains_preamble_context_and_message() {
        let message = "I've been so stressed about exams";
        let classification = RiskClassifier::new().classify(message);
        let prompt = build_prompt(message, &classification);

        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.contains("crisis level: low"));
        assert!(prompt.contains("anxious, worried, tense"));
        assert!(prompt.ends_with(message));
    }
}
