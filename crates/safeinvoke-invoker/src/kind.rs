//! Schema kinds and parse policies.
//!
//! The kind says which branches of a command are checked; the policy says
//! what happens when a check fails. Both are chosen when the invoker is
//! built, so each combination has its own result type.

/// Validate resolved values only. Rejections pass through untouched.
#[derive(Debug, Clone)]
pub struct ResponseOnly<S>(pub S);

/// Validate resolved values with `ok` and rejection values with `err`.
#[derive(Debug, Clone)]
pub struct ResultSchema<O, E> {
    pub ok: O,
    pub err: E,
}

impl<O, E> ResultSchema<O, E> {
    pub fn new(ok: O, err: E) -> Self {
        Self { ok, err }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Strict {}
    impl Sealed for super::Lenient {}
}

/// What an invoker does with a failed validation.
pub trait ParsePolicy: sealed::Sealed + Send + Sync + 'static {
    /// Whether a failed validation becomes an error.
    const THROW_PARSE_ERROR: bool;
}

/// Failed validations become [`InvokeError`](crate::InvokeError)s. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

/// Failed validations are returned as data inside the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

impl ParsePolicy for Strict {
    const THROW_PARSE_ERROR: bool = true;
}

impl ParsePolicy for Lenient {
    const THROW_PARSE_ERROR: bool = false;
}
