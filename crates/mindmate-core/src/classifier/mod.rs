//! Message risk classification.
//!
//! Maps raw user text to a crisis level, the detected issue categories, a
//! risk score, an emotional intensity, and a short emotion summary.

mod category;
mod intensity;
mod keyword;
mod risk;

pub use category::{ClassificationResult, CrisisLevel, IssueCategory, Severity};
pub use intensity::{emotional_intensity, IntensityIndicators};
pub use keyword::{KeywordMatch, KeywordMatcher, MatchPolicy, KEYWORD_TABLE, KEYWORD_TABLE_VERSION};
pub use risk::{RiskClassifier, RiskPolicy};
