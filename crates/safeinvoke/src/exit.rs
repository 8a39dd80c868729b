use std::fmt;
use std::io;

use safeinvoke_invoker::InvokeError;
use safeinvoke_schema::SchemaError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const LOAD_FAILED: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => LOAD_FAILED,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match err {
        SchemaError::LoadFailed(_) => LOAD_FAILED,
        SchemaError::CompileFailed(_)
        | SchemaError::InvalidJson(_)
        | SchemaError::InvalidCommand(_)
        | SchemaError::MissingResponseSchema(_) => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn invoke_error(context: &str, err: InvokeError) -> CliError {
    let code = match err {
        InvokeError::InvalidResponse { .. } | InvokeError::InvalidError { .. } => DATA_INVALID,
        InvokeError::InvalidCommand(_)
        | InvokeError::InvalidArgs { .. }
        | InvokeError::UnknownCommand(_) => USAGE,
        InvokeError::Json(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use safeinvoke_schema::ValidationIssues;

    use super::*;

    #[test]
    fn validation_failures_map_to_data_invalid() {
        let err = invoke_error(
            "check failed",
            InvokeError::InvalidResponse {
                command: "get_count".to_string(),
                cause: ValidationIssues::single("\"five\" is not of type \"integer\""),
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("check failed: "));
        assert!(err.message.contains("get_count"));
    }

    #[test]
    fn io_failures_never_share_the_rejection_code() {
        let missing = io_error("x", io::Error::from(io::ErrorKind::NotFound));
        let denied = io_error("x", io::Error::from(io::ErrorKind::PermissionDenied));
        let other = io_error("x", io::Error::other("disk on fire"));

        assert_eq!(missing.code, LOAD_FAILED);
        assert_eq!(denied.code, PERMISSION_DENIED);
        assert_eq!(other.code, INTERNAL);
        for code in [missing.code, denied.code, other.code] {
            assert_ne!(code, FAILURE);
        }
    }

    #[test]
    fn usage_and_load_errors_map_to_their_codes() {
        assert_eq!(
            invoke_error("x", InvokeError::UnknownCommand("nope".into())).code,
            USAGE
        );
        assert_eq!(
            schema_error("x", SchemaError::LoadFailed("gone".into())).code,
            LOAD_FAILED
        );
        assert_eq!(
            schema_error("x", SchemaError::CompileFailed("bad".into())).code,
            DATA_INVALID
        );
    }
}
