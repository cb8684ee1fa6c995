// completion service client - one wire client shared by both sessions

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRIES: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

pub struct Ai {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Decoding parameters for a single request.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Token id -> weight. Restricts the output vocabulary when the weights
    /// saturate.
    pub logit_bias: Option<HashMap<String, i32>>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Message {
    role: &'static str,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

// what we send
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<&'a HashMap<String, i32>>,
}

// what comes back
#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl Ai {
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model: String,
    ) -> Result<Self, Error> {
        // flag wins, then the usual env var names
        let api_key = api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .or_else(|| std::env::var("RECAP_API_KEY").ok())
            .ok_or(Error::MissingApiKey)?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round trip to the completion service. Transport failures get a
    /// couple of retries with a linear backoff; API-level errors surface
    /// immediately with the server's error body.
    pub async fn complete(&self, messages: &[Message], params: &Params) -> Result<String, Error> {
        let request = Request {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            logit_bias: params.logit_bias.as_ref(),
        };

        let mut attempt = 0;
        let response = loop {
            let result = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .timeout(REQUEST_TIMEOUT)
                .json(&request)
                .send()
                .await;

            match result {
                Ok(response) => break response,
                Err(e) if attempt < RETRIES && (e.is_timeout() || e.is_connect()) => {
                    attempt += 1;
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => return Err(Error::Http(e)),
            }
        };

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Api(error));
        }

        let response: Response = response.json().await?;
        let text = response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        Ok(text)
    }
}
