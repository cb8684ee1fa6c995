// the two session kinds: a stateless constrained classifier and the
// stateful user-facing chat

use crate::Error;
use crate::core::ai::{Ai, Message, Params};
use std::collections::HashMap;

// token ids for the digits "0".."9" in the cl100k vocabulary
const DIGIT_TOKENS: [u32; 10] = [15, 16, 17, 18, 19, 20, 21, 22, 23, 24];
const BIAS_WEIGHT: i32 = 100;

/// Single-token classification context. Temperature 0, one output token,
/// vocabulary restricted to the numerals naming valid answers. Nothing is
/// remembered between calls.
pub struct ClassifierSession {
    system: String,
    params: Params,
}

impl ClassifierSession {
    /// `choices` is the catalog size; the answer vocabulary is the numerals
    /// `0..=choices`, with 0 meaning "none of them".
    pub fn new(system: String, choices: usize) -> Self {
        debug_assert!(choices < DIGIT_TOKENS.len());
        let logit_bias: HashMap<String, i32> = DIGIT_TOKENS[..=choices]
            .iter()
            .map(|id| (id.to_string(), BIAS_WEIGHT))
            .collect();

        Self {
            system,
            params: Params {
                temperature: 0.0,
                max_tokens: Some(1),
                logit_bias: Some(logit_bias),
            },
        }
    }

    /// Returns the raw single token.
    pub async fn classify(&self, ai: &Ai, message: &str) -> Result<String, Error> {
        let messages = [Message::system(self.system.as_str()), Message::user(message)];
        ai.complete(&messages, &self.params).await
    }
}

/// The user-visible conversation. Accumulates the full dialogue and replays
/// it on every request.
pub struct ChatSession {
    messages: Vec<Message>,
    params: Params,
}

impl ChatSession {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system)],
            params: Params::default(),
        }
    }

    pub async fn send(&mut self, ai: &Ai, message: &str) -> Result<String, Error> {
        self.messages.push(Message::user(message));

        match ai.complete(&self.messages, &self.params).await {
            Ok(reply) => {
                self.messages.push(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                // a failed request must not leave a dangling user turn
                self.messages.pop();
                Err(e)
            }
        }
    }
}
