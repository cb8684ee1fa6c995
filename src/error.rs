use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Completion API error: {0}")]
    Api(String),

    #[error("Missing API key. Set one of: OPENAI_API_KEY or RECAP_API_KEY")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classifier answered {0:?} instead of a topic number")]
    Classifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
