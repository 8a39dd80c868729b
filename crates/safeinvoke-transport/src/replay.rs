use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::traits::{Invoke, InvokeArgs, Settlement};

/// A recorded invocation outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// The command resolved with this value.
    Resolved(Value),
    /// The command rejected with this value.
    Rejected(Value),
}

impl Recorded {
    fn settle(&self) -> Settlement {
        match self {
            Recorded::Resolved(value) => Ok(value.clone()),
            Recorded::Rejected(value) => Err(value.clone()),
        }
    }
}

/// Transport that answers every command with the same recorded outcome.
///
/// Useful for checking captured responses against a command's schemas
/// without a live peer on the other end.
#[derive(Debug)]
pub struct Replay {
    outcome: Recorded,
    calls: AtomicUsize,
}

impl Replay {
    /// Replay `outcome` for every call.
    pub fn new(outcome: Recorded) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replay a resolved value.
    pub fn resolved(value: Value) -> Self {
        Self::new(Recorded::Resolved(value))
    }

    /// Replay a rejection value.
    pub fn rejected(value: Value) -> Self {
        Self::new(Recorded::Rejected(value))
    }

    /// Number of invocations served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Invoke for Replay {
    async fn invoke(&self, command: &str, _args: InvokeArgs) -> Settlement {
        self.calls.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(command, "replaying recorded outcome");
        self.outcome.settle()
    }
}
