use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("No agent registered for intent: {0}")]
    Routing(String),

    #[error("Invalid message payload: {0}")]
    Validation(String),

    #[error("Failed to fetch source video: {0}")]
    Fetch(String),

    #[error("Failed to generate completion: {0}")]
    Generation(String),

    #[error("Failed to compose output video: {0}")]
    Compose(String),

    #[error("Failed to access package store: {0}")]
    Persistence(String),

    #[error("Tour package not found: {0}")]
    NotFound(String),
}

impl AgentError {
    /// Stable tag for error envelopes so callers can branch on the failure
    /// kind instead of matching display strings.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Routing(_) => "routing",
            AgentError::Validation(_) => "validation",
            AgentError::Fetch(_) => "fetch",
            AgentError::Generation(_) => "generation",
            AgentError::Compose(_) => "compose",
            AgentError::Persistence(_) => "persistence",
            AgentError::NotFound(_) => "not_found",
        }
    }
}

impl From<sqlx::Error> for AgentError {
    fn from(error: sqlx::Error) -> Self {
        AgentError::Persistence(error.to_string())
    }
}
