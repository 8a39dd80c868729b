use serde::{Deserialize, Serialize};

/// Runtime invoker configuration.
///
/// Missing configuration is the same as `throw_parse_error: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokerConfig {
    /// When true, a value failing its schema becomes an error; when false
    /// the validation outcome is returned as data.
    #[serde(default = "default_throw_parse_error")]
    pub throw_parse_error: bool,
}

fn default_throw_parse_error() -> bool {
    true
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            throw_parse_error: default_throw_parse_error(),
        }
    }
}

impl InvokerConfig {
    /// Config that returns validation failures as data.
    pub fn lenient() -> Self {
        Self {
            throw_parse_error: false,
        }
    }
}
