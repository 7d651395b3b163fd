use thiserror::Error;

/// Errors raised by the store and the domain operations built on it.
///
/// None of these are fatal: a failed operation leaves the in-memory data
/// untouched (validation / lookup) or intact and still dirty (I/O).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the AI bridge. Feature-scoped: callers disable or re-prompt,
/// they never abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// Service unreachable or timed out; AI actions should be disabled.
    #[error("AI service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but rejected the model; the user should pick another one.
    #[error("model error: {0}")]
    Model(String),

    #[error("invalid response from AI service: {0}")]
    InvalidResponse(String),
}

/// Failure of an AI-assisted operation: either the lookup in the store or
/// the model call itself.
#[derive(Error, Debug)]
pub enum AssistError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ai(#[from] AiError),
}
