#[derive(Debug, thiserror::Error)]
pub enum GatekitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Execution error: {0}")]
    Execution(String),

    /// A resume or decision that cannot be correlated to a paused run.
    /// Caller error: reported, never retried.
    #[error("Protocol violation: {0}")]
    Protocol(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GatekitError>;
