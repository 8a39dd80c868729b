//! Schema-checked command invokers.
//!
//! An invoker binds a command name to a transport and to the schemas its
//! outcome must satisfy. Each call runs the command once, validates the
//! resolved value (and, with paired schemas, the rejection value) and
//! returns a [`SafeResult`].
//!
//! - [`for_response`] checks resolved values; rejections pass through raw
//! - [`for_result`] checks both branches against `ok` / `err` schemas
//! - [`Strict`] (default) turns a failed check into an [`InvokeError`]
//! - [`Lenient`] returns the validation outcome as data instead
//! - [`DynamicInvoker`] does the same over registry schemas with a runtime [`InvokerConfig`]

pub mod config;
pub mod dynamic;
pub mod error;
pub mod invoker;
pub mod kind;
pub mod result;

pub use config::InvokerConfig;
pub use dynamic::DynamicInvoker;
pub use error::{InvokeError, Result};
pub use invoker::{for_response, for_result, SafeInvoker};
pub use kind::{Lenient, ParsePolicy, ResponseOnly, ResultSchema, Strict};
pub use result::{Checked, SafeResult};
