//! Command invocation seam for safeinvoke.
//!
//! A transport takes a command name and an optional keyed payload and
//! settles with an untyped value, or rejects with an untyped value. This
//! crate defines that contract ([`Invoke`]) and ships two in-process
//! implementations:
//! - [`CommandTable`] dispatches to registered async handlers
//! - [`Replay`] answers every call with one recorded outcome
//!
//! Real IPC transports (a webview bridge, a socket peer) implement [`Invoke`]
//! outside this crate.

pub mod command;
pub mod error;
pub mod local;
pub mod replay;
pub mod traits;

pub use command::{validate_command, MAX_COMMAND_LEN};
pub use error::{Result, TransportError};
pub use local::CommandTable;
pub use replay::{Recorded, Replay};
pub use traits::{Invoke, InvokeArgs, Settlement};
