use safeinvoke_schema::ValidationIssues;

/// Errors that can occur while building or calling an invoker.
///
/// A command rejecting is not an error: it comes back as
/// [`SafeResult::Failure`](crate::SafeResult::Failure). Validation failures
/// only surface here under the [`Strict`](crate::Strict) policy.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The command name is not usable.
    #[error(transparent)]
    InvalidCommand(#[from] safeinvoke_transport::TransportError),

    /// The call arguments do not serialize to a keyed object.
    #[error("invalid arguments for command \"{command}\": {reason}")]
    InvalidArgs { command: String, reason: String },

    /// The resolved value failed the response schema.
    #[error("invalid response received while invoking command \"{command}\": {cause}")]
    InvalidResponse {
        command: String,
        #[source]
        cause: ValidationIssues,
    },

    /// The rejection value failed the error schema.
    #[error("invalid error type received while invoking command \"{command}\": {cause}")]
    InvalidError {
        command: String,
        #[source]
        cause: ValidationIssues,
    },

    /// No schema is registered for the command.
    #[error("no schema registered for command \"{0}\"")]
    UnknownCommand(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InvokeError {
    /// The command the error relates to, when it names one.
    pub fn command(&self) -> Option<&str> {
        match self {
            InvokeError::InvalidArgs { command, .. }
            | InvokeError::InvalidResponse { command, .. }
            | InvokeError::InvalidError { command, .. }
            | InvokeError::UnknownCommand(command) => Some(command.as_str()),
            InvokeError::InvalidCommand(_) | InvokeError::Json(_) => None,
        }
    }

    /// The validation issues behind a schema failure.
    pub fn issues(&self) -> Option<&ValidationIssues> {
        match self {
            InvokeError::InvalidResponse { cause, .. } | InvokeError::InvalidError { cause, .. } => {
                Some(cause)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvokeError>;
