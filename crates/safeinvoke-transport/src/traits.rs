use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Keyed command arguments. `None` means the command is called without a payload.
pub type InvokeArgs = Option<Map<String, Value>>;

/// How a single invocation settled: `Ok` with the resolved value or `Err`
/// with the rejection value. Neither side is typed at this layer.
pub type Settlement = std::result::Result<Value, Value>;

/// A transport able to run named commands on the other side of an IPC boundary.
///
/// Implementations are called exactly once per invocation and must not
/// retry. A call that never settles leaves the caller pending; timeouts are
/// the transport's business, not the invoker's.
pub trait Invoke: Send + Sync {
    /// Run `command` with `args` and report how it settled.
    fn invoke(&self, command: &str, args: InvokeArgs) -> impl Future<Output = Settlement> + Send;
}

impl<T: Invoke> Invoke for &T {
    fn invoke(&self, command: &str, args: InvokeArgs) -> impl Future<Output = Settlement> + Send {
        (**self).invoke(command, args)
    }
}

impl<T: Invoke> Invoke for Arc<T> {
    fn invoke(&self, command: &str, args: InvokeArgs) -> impl Future<Output = Settlement> + Send {
        (**self).invoke(command, args)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Replay;

    #[tokio::test]
    async fn shared_and_borrowed_transports_forward_to_the_inner_one() {
        let shared = Arc::new(Replay::resolved(json!("pong")));

        let via_arc = <Arc<Replay> as Invoke>::invoke(&shared, "ping", None).await;
        let inner: &Replay = &shared;
        let via_ref = <&Replay as Invoke>::invoke(&inner, "ping", None).await;

        assert_eq!(via_arc, Ok(json!("pong")));
        assert_eq!(via_ref, Ok(json!("pong")));
        assert_eq!(shared.calls(), 2);
    }
}
