//! Schema-checked IPC command invocation with typed results.
//!
//! safeinvoke wraps a command call across an IPC boundary so that whatever
//! comes back is checked against a schema before the caller sees it.
//!
//! # Crate Structure
//!
//! - [`transport`]: The `Invoke` seam, local dispatch and replay transports
//! - [`schema`]: Serde-typed and JSON Schema validation, schema registry
//! - [`invoker`]: Safe invokers and their result types

/// Re-export transport types.
pub mod transport {
    pub use safeinvoke_transport::*;
}

/// Re-export schema types.
pub mod schema {
    pub use safeinvoke_schema::*;
}

/// Re-export invoker types.
pub mod invoker {
    pub use safeinvoke_invoker::*;
}

pub use safeinvoke_invoker::{
    for_response, for_result, Checked, DynamicInvoker, InvokeError, InvokerConfig, SafeInvoker,
    SafeResult,
};
