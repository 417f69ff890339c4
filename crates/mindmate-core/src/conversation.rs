//! Caller-owned conversation history.
//!
//! The engine keeps no state between messages. Front-ends that want a
//! transcript own a [`Conversation`] and pass it in explicitly.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifier::CrisisLevel;
use crate::response::ResponseRecord;

/// One user message and the reply it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub user_text: String,
    pub response: ResponseRecord,
    pub at: DateTime<Utc>,
}

/// Ordered list of turns for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: String,
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Starts an empty conversation with a random session id.
    pub fn new() -> Self {
        Self::with_session_id(format!("{:016x}", rand::thread_rng().gen::<u64>()))
    }

    /// Starts an empty conversation with the given session id.
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            turns: Vec::new(),
        }
    }

    /// Appends a turn stamped with the current time.
    pub fn record(&mut self, user_text: impl Into<String>, response: ResponseRecord) {
        self.turns.push(Turn {
            user_text: user_text.into(),
            response,
            at: Utc::now(),
        });
    }

    /// Returns the most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Highest crisis level seen in this conversation.
    pub fn peak_crisis_level(&self) -> CrisisLevel {
        self.turns
            .iter()
            .map(|t| t.response.crisis_level)
            .max()
            .unwrap_or(CrisisLevel::Low)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskClassifier;
    use crate::response::ResponseSelector;

    fn reply(text: &str) -> ResponseRecord {
        let classification = RiskClassifier::new().classify(text);
        ResponseSelector::default().select(text, &classification, None)
    }

    #[test]
    fn new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.session_id.len(), 16);
        assert_eq!(conversation.peak_crisis_level(), CrisisLevel::Low);
    }

    #[test]
    fn records_turns_in_order() {
        let mut conversation = Conversation::with_session_id("s1");
        conversation.record("hello", reply("hello"));
        conversation.record("I'm glad", reply("I'm glad"));

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.last().unwrap().user_text, "I'm glad");
        assert!(conversation.turns[0].at <= conversation.turns[1].at);
    }

    #[test]
    fn peak_level_tracks_the_worst_turn() {
        let mut conversation = Conversation::with_session_id("s2");
        conversation.record("panic attack", reply("panic attack"));
        conversation.record("better now", reply("better now"));
        assert_eq!(conversation.peak_crisis_level(), CrisisLevel::Medium);
    }

    #[test]
    fn conversations_are_independent() {
        let mut a = Conversation::with_session_id("a");
        let b = Conversation::with_session_id("b");
        a.record("I want to die", reply("I want to die"));

        assert_eq!(a.peak_crisis_level(), CrisisLevel::High);
        assert_eq!(b.peak_crisis_level(), CrisisLevel::Low);
    }
}
