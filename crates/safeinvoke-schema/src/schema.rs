use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::outcome::{ParseOutcome, ValidationIssues};

/// A runtime check for untyped JSON values.
///
/// `safe_parse` never fails; it reports mismatches as
/// [`ParseOutcome::Failure`]. `parse` is the strict form.
pub trait Schema: Send + Sync {
    /// The value produced when validation passes.
    type Output;

    /// Validate `value`, reporting the outcome instead of failing.
    fn safe_parse(&self, value: &Value) -> ParseOutcome<Self::Output>;

    /// Validate `value`, failing with the issues on mismatch.
    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationIssues> {
        self.safe_parse(value).into_result()
    }
}

impl<S: Schema> Schema for &S {
    type Output = S::Output;

    fn safe_parse(&self, value: &Value) -> ParseOutcome<Self::Output> {
        (**self).safe_parse(value)
    }
}

impl<S: Schema> Schema for Arc<S> {
    type Output = S::Output;

    fn safe_parse(&self, value: &Value) -> ParseOutcome<Self::Output> {
        (**self).safe_parse(value)
    }
}

/// Schema defined by a Rust type's `Deserialize` impl.
///
/// `Typed::<u32>::new()` accepts `5` and rejects `"five"`.
pub struct Typed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Typed<T> {}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Schema for Typed<T> {
    type Output = T;

    fn safe_parse(&self, value: &Value) -> ParseOutcome<T> {
        deserialize_outcome(value)
    }
}

pub(crate) fn deserialize_outcome<T: DeserializeOwned>(value: &Value) -> ParseOutcome<T> {
    match T::deserialize(value) {
        Ok(data) => ParseOutcome::Success(data),
        Err(err) => ParseOutcome::Failure(ValidationIssues::single(err.to_string())),
    }
}
