use crate::error::{Result, TransportError};

/// Maximum command name length in bytes.
pub const MAX_COMMAND_LEN: usize = 256;

/// Check that `name` can be used as a command identifier.
///
/// Names are opaque to this crate (`get_count`, `plugin:fs|read` are both
/// fine) but must be non-empty, at most [`MAX_COMMAND_LEN`] bytes, and free of
/// whitespace and control characters.
pub fn validate_command(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.len() > MAX_COMMAND_LEN {
        "exceeds 256 bytes"
    } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "contains whitespace or control characters"
    } else {
        return Ok(());
    };

    Err(TransportError::InvalidCommand {
        name: name.to_string(),
        reason,
    })
}
