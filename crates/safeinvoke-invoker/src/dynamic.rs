use safeinvoke_schema::{JsonSchema, SchemaRegistry};
use safeinvoke_transport::{validate_command, Invoke, InvokeArgs};
use serde::Serialize;
use serde_json::Value;

use crate::config::InvokerConfig;
use crate::error::{InvokeError, Result};
use crate::invoker::SafeInvoker;
use crate::kind::{ResponseOnly, ResultSchema};
use crate::result::SafeResult;

/// Invoker over JSON Schema documents with the parse policy chosen at runtime.
///
/// Produces the same results as the typed invokers, encoded as JSON: under a
/// lenient config the value is the serialized validation outcome.
#[derive(Debug)]
pub struct DynamicInvoker<T> {
    transport: T,
    command: String,
    ok: JsonSchema,
    err: Option<JsonSchema>,
    config: InvokerConfig,
}

impl<T: Invoke> DynamicInvoker<T> {
    pub fn new(
        transport: T,
        command: &str,
        ok: JsonSchema,
        err: Option<JsonSchema>,
        config: InvokerConfig,
    ) -> Result<Self> {
        validate_command(command)?;
        Ok(Self {
            transport,
            command: command.to_string(),
            ok,
            err,
            config,
        })
    }

    /// Build an invoker for `command` from the schemas registered for it.
    pub fn from_registry(
        transport: T,
        registry: &SchemaRegistry,
        command: &str,
        config: InvokerConfig,
    ) -> Result<Self> {
        let schemas = registry
            .get(command)
            .ok_or_else(|| InvokeError::UnknownCommand(command.to_string()))?;
        Self::new(
            transport,
            command,
            schemas.ok.clone(),
            schemas.err.cloned(),
            config,
        )
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn config(&self) -> InvokerConfig {
        self.config
    }

    pub fn has_error_schema(&self) -> bool {
        self.err.is_some()
    }

    /// Run the command once and resolve its outcome per the config.
    pub async fn invoke(&self, args: InvokeArgs) -> Result<SafeResult<Value, Value>> {
        let transport = &self.transport;
        let command = self.command.as_str();

        match (&self.err, self.config.throw_parse_error) {
            (None, true) => {
                SafeInvoker::prevalidated(transport, command, ResponseOnly(&self.ok))
                    .invoke(args)
                    .await
            }
            (None, false) => {
                let result = SafeInvoker::prevalidated(transport, command, ResponseOnly(&self.ok))
                    .lenient()
                    .invoke(args)
                    .await?;
                Ok(match result {
                    SafeResult::Value(outcome) => SafeResult::Value(to_json(&outcome)?),
                    SafeResult::Failure(rejection) => SafeResult::Failure(rejection),
                })
            }
            (Some(err), true) => {
                SafeInvoker::prevalidated(transport, command, ResultSchema::new(&self.ok, err))
                    .invoke(args)
                    .await
            }
            (Some(err), false) => {
                let SafeResult::Value(checked) =
                    SafeInvoker::prevalidated(transport, command, ResultSchema::new(&self.ok, err))
                        .lenient()
                        .invoke(args)
                        .await?;
                Ok(SafeResult::Value(to_json(&checked)?))
            }
        }
    }
}

fn to_json(value: &impl Serialize) -> Result<Value> {
    serde_json::to_value(value).map_err(InvokeError::from)
}
