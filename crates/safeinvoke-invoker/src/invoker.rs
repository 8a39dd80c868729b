use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use safeinvoke_schema::{ParseOutcome, Schema, ValidationIssues};
use safeinvoke_transport::{validate_command, Invoke, InvokeArgs, Settlement};
use serde::Serialize;
use serde_json::Value;

use crate::config::InvokerConfig;
use crate::error::{InvokeError, Result};
use crate::kind::{Lenient, ParsePolicy, ResponseOnly, ResultSchema, Strict};
use crate::result::{Checked, SafeResult};

/// A command bound to a transport and the schemas its outcome is checked against.
///
/// Built with [`for_response`] or [`for_result`]; strict by default, switch
/// with [`SafeInvoker::lenient`]. Each call runs the transport exactly once
/// and keeps no state between calls.
pub struct SafeInvoker<T, K, P = Strict> {
    transport: T,
    command: String,
    schema: K,
    _policy: PhantomData<P>,
}

/// Invoker that checks resolved values against `schema`.
pub fn for_response<T, S>(
    transport: T,
    command: &str,
    schema: S,
) -> Result<SafeInvoker<T, ResponseOnly<S>>>
where
    T: Invoke,
    S: Schema,
{
    SafeInvoker::new(transport, command, ResponseOnly(schema))
}

/// Invoker that checks resolved values against `ok` and rejections against `err`.
pub fn for_result<T, O, E>(
    transport: T,
    command: &str,
    ok: O,
    err: E,
) -> Result<SafeInvoker<T, ResultSchema<O, E>>>
where
    T: Invoke,
    O: Schema,
    E: Schema,
{
    SafeInvoker::new(transport, command, ResultSchema { ok, err })
}

impl<T, K> SafeInvoker<T, K> {
    fn new(transport: T, command: &str, schema: K) -> Result<Self> {
        validate_command(command)?;
        Ok(Self::prevalidated(transport, command, schema))
    }

    /// Build without checking `command`; the caller has already validated it.
    pub(crate) fn prevalidated(transport: T, command: &str, schema: K) -> Self {
        Self {
            transport,
            command: command.to_string(),
            schema,
            _policy: PhantomData,
        }
    }
}

impl<T, K, P: ParsePolicy> SafeInvoker<T, K, P> {
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn schema(&self) -> &K {
        &self.schema
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The configuration this invoker's policy corresponds to.
    pub fn config(&self) -> InvokerConfig {
        InvokerConfig {
            throw_parse_error: P::THROW_PARSE_ERROR,
        }
    }

    /// Return validation failures as data instead of errors.
    pub fn lenient(self) -> SafeInvoker<T, K, Lenient> {
        self.with_policy()
    }

    /// Turn validation failures into errors.
    pub fn strict(self) -> SafeInvoker<T, K, Strict> {
        self.with_policy()
    }

    fn with_policy<Q>(self) -> SafeInvoker<T, K, Q> {
        SafeInvoker {
            transport: self.transport,
            command: self.command,
            schema: self.schema,
            _policy: PhantomData,
        }
    }

    fn invalid_response(&self, cause: ValidationIssues) -> InvokeError {
        tracing::warn!(command = %self.command, cause = %cause, "response failed schema validation");
        InvokeError::InvalidResponse {
            command: self.command.clone(),
            cause,
        }
    }

    fn invalid_error(&self, cause: ValidationIssues) -> InvokeError {
        tracing::warn!(command = %self.command, cause = %cause, "rejection failed error schema validation");
        InvokeError::InvalidError {
            command: self.command.clone(),
            cause,
        }
    }
}

impl<T: Invoke, K, P: ParsePolicy> SafeInvoker<T, K, P> {
    /// Encode `args`, run the transport once and report how it settled.
    async fn settle<A: Serialize>(&self, args: A) -> Result<Settlement> {
        let args = encode_args(&self.command, args)?;
        tracing::debug!(command = %self.command, has_args = args.is_some(), "invoking command");

        let settlement = self.transport.invoke(&self.command, args).await;
        tracing::debug!(command = %self.command, resolved = settlement.is_ok(), "command settled");
        Ok(settlement)
    }
}

impl<T: Invoke, S: Schema> SafeInvoker<T, ResponseOnly<S>, Strict> {
    /// Run the command. A response failing the schema is an error; a
    /// rejection is returned unchanged as the failure.
    pub async fn invoke<A: Serialize>(&self, args: A) -> Result<SafeResult<S::Output, Value>> {
        match self.settle(args).await? {
            Ok(response) => match self.schema.0.safe_parse(&response) {
                ParseOutcome::Success(value) => Ok(SafeResult::Value(value)),
                ParseOutcome::Failure(cause) => Err(self.invalid_response(cause)),
            },
            Err(rejection) => Ok(SafeResult::Failure(rejection)),
        }
    }
}

impl<T: Invoke, S: Schema> SafeInvoker<T, ResponseOnly<S>, Lenient> {
    /// Run the command. The response's validation outcome is the value; a
    /// rejection is returned unchanged as the failure.
    pub async fn invoke<A: Serialize>(
        &self,
        args: A,
    ) -> Result<SafeResult<ParseOutcome<S::Output>, Value>> {
        match self.settle(args).await? {
            Ok(response) => Ok(SafeResult::Value(self.schema.0.safe_parse(&response))),
            Err(rejection) => Ok(SafeResult::Failure(rejection)),
        }
    }
}

impl<T: Invoke, O: Schema, E: Schema> SafeInvoker<T, ResultSchema<O, E>, Strict> {
    /// Run the command. The parsed response is the value and the parsed
    /// rejection the failure; either failing its schema is an error.
    pub async fn invoke<A: Serialize>(&self, args: A) -> Result<SafeResult<O::Output, E::Output>> {
        match self.settle(args).await? {
            Ok(response) => match self.schema.ok.safe_parse(&response) {
                ParseOutcome::Success(value) => Ok(SafeResult::Value(value)),
                ParseOutcome::Failure(cause) => Err(self.invalid_response(cause)),
            },
            Err(rejection) => match self.schema.err.safe_parse(&rejection) {
                ParseOutcome::Success(failure) => Ok(SafeResult::Failure(failure)),
                ParseOutcome::Failure(cause) => Err(self.invalid_error(cause)),
            },
        }
    }
}

impl<T: Invoke, O: Schema, E: Schema> SafeInvoker<T, ResultSchema<O, E>, Lenient> {
    /// Run the command. Whichever branch settled, its validation outcome is
    /// returned as the value.
    pub async fn invoke<A: Serialize>(
        &self,
        args: A,
    ) -> Result<SafeResult<Checked<O::Output, E::Output>, Infallible>> {
        let checked = match self.settle(args).await? {
            Ok(response) => Checked::Response(self.schema.ok.safe_parse(&response)),
            Err(rejection) => Checked::Rejection(self.schema.err.safe_parse(&rejection)),
        };
        Ok(SafeResult::Value(checked))
    }
}

impl<T, K: fmt::Debug, P: ParsePolicy> fmt::Debug for SafeInvoker<T, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeInvoker")
            .field("command", &self.command)
            .field("schema", &self.schema)
            .field("throw_parse_error", &P::THROW_PARSE_ERROR)
            .finish_non_exhaustive()
    }
}

/// Turn call arguments into a keyed payload. Unit and `None` mean no payload.
fn encode_args<A: Serialize>(command: &str, args: A) -> Result<InvokeArgs> {
    let invalid = |reason: String| InvokeError::InvalidArgs {
        command: command.to_string(),
        reason,
    };

    match serde_json::to_value(args) {
        Ok(Value::Null) => Ok(None),
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => Err(invalid(format!(
            "expected a keyed object, got {}",
            json_kind(&other)
        ))),
        Err(err) => Err(invalid(err.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
