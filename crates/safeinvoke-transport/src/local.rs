use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use futures_core::future::BoxFuture;
use serde_json::Value;

use crate::command::validate_command;
use crate::error::{Result, TransportError};
use crate::traits::{Invoke, InvokeArgs, Settlement};

type Handler = Box<dyn Fn(InvokeArgs) -> BoxFuture<'static, Settlement> + Send + Sync>;

/// In-process command dispatcher.
///
/// Maps command names to async handlers, the same shape a desktop shell
/// uses to route webview commands to backend functions. Unknown commands
/// reject with `"command <name> not found"`.
#[derive(Default)]
pub struct CommandTable {
    handlers: HashMap<String, Handler>,
}

impl CommandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async handler under `command`.
    pub fn register<F, Fut>(&mut self, command: &str, handler: F) -> Result<()>
    where
        F: Fn(InvokeArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Settlement> + Send + 'static,
    {
        validate_command(command)?;
        if self.handlers.contains_key(command) {
            return Err(TransportError::DuplicateCommand(command.to_string()));
        }

        self.handlers.insert(
            command.to_string(),
            Box::new(move |args| -> BoxFuture<'static, Settlement> { Box::pin(handler(args)) }),
        );
        Ok(())
    }

    /// Builder form of [`CommandTable::register`].
    pub fn with_command<F, Fut>(mut self, command: &str, handler: F) -> Result<Self>
    where
        F: Fn(InvokeArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Settlement> + Send + 'static,
    {
        self.register(command, handler)?;
        Ok(self)
    }

    /// Check if a handler is registered for `command`.
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut commands: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        commands.sort_unstable();
        commands
    }
}

impl Invoke for CommandTable {
    async fn invoke(&self, command: &str, args: InvokeArgs) -> Settlement {
        match self.handlers.get(command) {
            Some(handler) => handler(args).await,
            None => {
                tracing::debug!(command, "no handler registered");
                Err(Value::String(format!("command {command} not found")))
            }
        }
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.commands())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table() -> CommandTable {
        CommandTable::new()
            .with_command("get_count", |_| async { Settlement::Ok(json!(5)) })
            .unwrap()
            .with_command("echo", |args: InvokeArgs| async move {
                Settlement::Ok(args.map(Value::Object).unwrap_or(Value::Null))
            })
            .unwrap()
            .with_command("fail", |_| async { Settlement::Err(json!({ "code": 7 })) })
            .unwrap()
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let table = table();
        assert_eq!(table.invoke("get_count", None).await, Ok(json!(5)));

        let mut args = serde_json::Map::new();
        args.insert("name".to_string(), json!("ok"));
        assert_eq!(
            table.invoke("echo", Some(args)).await,
            Ok(json!({ "name": "ok" }))
        );
        assert_eq!(table.invoke("echo", None).await, Ok(Value::Null));
    }

    #[tokio::test]
    async fn handler_rejection_passes_through() {
        assert_eq!(table().invoke("fail", None).await, Err(json!({ "code": 7 })));
    }

    #[tokio::test]
    async fn unknown_command_rejects_with_message() {
        assert_eq!(
            table().invoke("missing", None).await,
            Err(json!("command missing not found"))
        );
    }

    #[test]
    fn duplicate_and_invalid_names_are_refused() {
        let mut table = table();
        assert!(matches!(
            table.register("get_count", |_| async { Settlement::Ok(Value::Null) }),
            Err(TransportError::DuplicateCommand(name)) if name == "get_count"
        ));
        assert!(matches!(
            table.register("", |_| async { Settlement::Ok(Value::Null) }),
            Err(TransportError::InvalidCommand { .. })
        ));
        assert_eq!(table.commands(), vec!["echo", "fail", "get_count"]);
        assert!(table.contains("echo"));
    }
}
