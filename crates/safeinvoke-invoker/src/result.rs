use safeinvoke_schema::ParseOutcome;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// What an invoker hands back to its caller.
///
/// Serializes as `{"ok":true,"value":..}` or `{"ok":false,"failure":..}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SafeResult<D, E> {
    /// The call succeeded.
    Value(D),
    /// The command rejected.
    Failure(E),
}

impl<D, E> SafeResult<D, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self, SafeResult::Value(_))
    }

    pub fn value(&self) -> Option<&D> {
        match self {
            SafeResult::Value(value) => Some(value),
            SafeResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            SafeResult::Value(_) => None,
            SafeResult::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<D, E> {
        match self {
            SafeResult::Value(value) => Ok(value),
            SafeResult::Failure(failure) => Err(failure),
        }
    }
}

impl<D, E> From<Result<D, E>> for SafeResult<D, E> {
    fn from(result: Result<D, E>) -> Self {
        match result {
            Ok(value) => SafeResult::Value(value),
            Err(failure) => SafeResult::Failure(failure),
        }
    }
}

impl<D: Serialize, E: Serialize> Serialize for SafeResult<D, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            SafeResult::Value(value) => {
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("value", value)?;
            }
            SafeResult::Failure(failure) => {
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("failure", failure)?;
            }
        }
        map.end()
    }
}

/// Validation outcome returned by a lenient invoker with paired schemas.
///
/// The variant records which branch was checked: the resolved value against
/// the `ok` schema, or the rejection value against the `err` schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked<V, E> {
    Response(ParseOutcome<V>),
    Rejection(ParseOutcome<E>),
}

impl<V, E> Checked<V, E> {
    /// Whether the checked value matched its schema.
    pub fn is_success(&self) -> bool {
        match self {
            Checked::Response(outcome) => outcome.is_success(),
            Checked::Rejection(outcome) => outcome.is_success(),
        }
    }

    /// Whether the command rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Checked::Rejection(_))
    }
}

impl<V: Serialize, E: Serialize> Serialize for Checked<V, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Checked::Response(outcome) => {
                map.serialize_entry("branch", "response")?;
                map.serialize_entry("outcome", outcome)?;
            }
            Checked::Rejection(outcome) => {
                map.serialize_entry("branch", "rejection")?;
                map.serialize_entry("outcome", outcome)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use safeinvoke_schema::ValidationIssues;
    use serde_json::json;

    use super::*;

    #[test]
    fn safe_result_serializes_with_value_and_failure_keys() {
        let ok: SafeResult<u32, String> = SafeResult::Value(5);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "ok": true, "value": 5 })
        );

        let failed: SafeResult<u32, String> = SafeResult::Failure("boom".to_string());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "ok": false, "failure": "boom" })
        );
    }

    #[test]
    fn safe_result_accessors() {
        let ok: SafeResult<u32, String> = Ok(1).into();
        assert!(ok.is_ok());
        assert_eq!(ok.value(), Some(&1));
        assert!(ok.failure().is_none());
        assert_eq!(ok.into_result(), Ok(1));

        let failed: SafeResult<u32, String> = Err("x".to_string()).into();
        assert!(!failed.is_ok());
        assert_eq!(failed.failure().map(String::as_str), Some("x"));
    }

    #[test]
    fn checked_reports_branch_and_success() {
        let response: Checked<u32, String> = Checked::Response(ParseOutcome::Success(5));
        assert!(response.is_success());
        assert!(!response.is_rejection());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "branch": "response", "outcome": { "success": true, "data": 5 } })
        );

        let rejection: Checked<u32, String> =
            Checked::Rejection(ParseOutcome::Failure(ValidationIssues::single("bad")));
        assert!(!rejection.is_success());
        assert!(rejection.is_rejection());
        assert_eq!(
            serde_json::to_value(&rejection).unwrap(),
            json!({
                "branch": "rejection",
                "outcome": { "success": false, "error": { "issues": ["bad"] } }
            })
        );
    }
}
