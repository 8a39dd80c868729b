/// Errors raised while setting up a transport.
///
/// Invocation failures are not errors at this layer: a rejected command
/// settles as `Err(Value)` and is handed upward untouched.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The command name is empty, too long, or contains whitespace/control characters.
    #[error("invalid command name {name:?}: {reason}")]
    InvalidCommand { name: String, reason: &'static str },

    /// A handler is already registered under this command name.
    #[error("command {0} is already registered")]
    DuplicateCommand(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
