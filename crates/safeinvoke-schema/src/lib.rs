//! Response and error schemas for safeinvoke.
//!
//! A [`Schema`] checks an untyped JSON value and either produces a typed
//! value or a list of human-readable issues. Two engines are provided:
//! - [`Typed`] validates purely through `serde::Deserialize`
//! - [`JsonSchema`] validates against JSON Schema 2020-12 first, then deserializes
//!
//! [`SchemaRegistry`] keeps per-command response/error schemas, loadable from
//! a directory of `*.schema.json` files.

pub mod config;
pub mod error;
pub mod json;
pub mod outcome;
pub mod registry;
pub mod schema;
mod strict;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError};
pub use json::JsonSchema;
pub use outcome::{ParseOutcome, ValidationIssues};
pub use registry::{CommandSchemas, SchemaRegistry};
pub use schema::{Schema, Typed};
