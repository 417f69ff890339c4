//! MindMate Core - Risk classification and response selection.
//!
//! This crate turns one user message into a risk assessment and a
//! supportive reply. The classifier is deterministic and keyword driven;
//! replies come from an optional external text generator with a template
//! bank as the fallback. Crisis-level messages always carry hotline
//! information regardless of where the reply text came from.
//!
//! ## Example
//!
//! ```no_run
//! use mindmate_core::SupportEngine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = SupportEngine::template_only();
//!     let reply = engine.respond("I've been feeling really down").await;
//!     println!("{}", reply.response_text);
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod generator;
pub mod guidance;
pub mod response;

pub use classifier::{ClassificationResult, CrisisLevel, IssueCategory, RiskClassifier};
pub use config::{ConfigError, EngineConfig};
pub use conversation::Conversation;
pub use engine::{SupportEngine, SupportReport};
pub use generator::{GeneratorBackend, TextGenerator};
pub use response::{ResponseOrigin, ResponseRecord, ResponseSelector};
