// topic gate - advisory classification that runs before every chat message

use crate::Error;
use crate::core::ai::Ai;
use crate::core::session::ClassifierSession;

// catalog of topics worth a warning; answer 0 is reserved for "none"
pub const TOPICS: [&str; 5] = [
    "Content after the model's knowledge cutoff",
    "Legal/Judicial Research",
    "Medical/Psychiatric Advice",
    "Financial Advice",
    "Illegal/Unethical Activities",
];

pub const WARN_PREFIX: &str = "⚠️ ";

pub struct Gate {
    session: ClassifierSession,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            session: ClassifierSession::new(classifier_prompt(), TOPICS.len()),
        }
    }

    /// Classify the message; `Some(warning)` when a catalog topic matched.
    /// A token outside `0..=N` fails the gate step only - the caller decides
    /// what to surface, and the reply still goes out.
    pub async fn check(&self, ai: &Ai, message: &str) -> Result<Option<String>, Error> {
        let token = self.session.classify(ai, message).await?;

        match parse_topic(&token) {
            Some(0) => Ok(None),
            Some(idx) => Ok(Some(format!("{WARN_PREFIX}{}", TOPICS[idx - 1]))),
            None => Err(Error::Classifier(token)),
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_topic(token: &str) -> Option<usize> {
    match token.trim().parse::<usize>() {
        Ok(idx) if idx <= TOPICS.len() => Some(idx),
        _ => None,
    }
}

fn classifier_prompt() -> String {
    let mut prompt = String::from(
        "From the list of topics below, reply ONLY with the number appropriate for \
         describing the topic of the user's message. If none are, ONLY reply with \"0\".\n",
    );
    for (i, topic) in TOPICS.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {topic}", i + 1));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_numbers_every_topic() {
        let prompt = classifier_prompt();
        for (i, topic) in TOPICS.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. {topic}", i + 1)));
        }
    }

    #[test]
    fn test_prompt_tells_the_model_to_answer_with_a_number() {
        let prompt = classifier_prompt();
        assert!(prompt.contains("ONLY"));
        assert!(prompt.contains("\"0\""));
    }

    #[test]
    fn test_parse_topic_accepts_the_valid_range() {
        assert_eq!(parse_topic("0"), Some(0));
        assert_eq!(parse_topic("3"), Some(3));
        assert_eq!(parse_topic("5"), Some(5));
        assert_eq!(parse_topic(" 1 "), Some(1));
    }

    #[test]
    fn test_parse_topic_rejects_everything_else() {
        assert_eq!(parse_topic("6"), None);
        assert_eq!(parse_topic("9"), None);
        assert_eq!(parse_topic("-1"), None);
        assert_eq!(parse_topic("banana"), None);
        assert_eq!(parse_topic(""), None);
    }
}
