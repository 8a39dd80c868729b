/// Errors that can occur while building or loading schemas.
///
/// A value failing validation is not an error here; see
/// [`ParseOutcome`](crate::ParseOutcome).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The schema source is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The command name a schema is registered under is not usable.
    #[error(transparent)]
    InvalidCommand(#[from] safeinvoke_transport::TransportError),

    /// An error schema was registered for a command with no response schema.
    #[error("command {0} has an error schema but no response schema")]
    MissingResponseSchema(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
