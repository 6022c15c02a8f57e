use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuleError>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Rule already exists: {0}")]
    AlreadyExists(String),

    #[error("Rule not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Duplicate action in rule set: {0}")]
    DuplicateAction(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

