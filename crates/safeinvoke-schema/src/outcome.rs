use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Human-readable reasons a value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssues {
    issues: Vec<String>,
}

impl ValidationIssues {
    /// Wrap a list of issue messages.
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }

    /// A single issue.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            issues: vec![message.into()],
        }
    }

    /// The issue messages, one per failed check.
    pub fn format(&self) -> &[String] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.issues.join(", "))
    }
}

impl std::error::Error for ValidationIssues {}

/// Result of a non-throwing validation.
///
/// Serializes as `{"success":true,"data":..}` or
/// `{"success":false,"error":{"issues":[..]}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// The value matched; carries the parsed value.
    Success(T),
    /// The value did not match.
    Failure(ValidationIssues),
}

impl<T> ParseOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    /// The parsed value, if validation passed.
    pub fn data(&self) -> Option<&T> {
        match self {
            ParseOutcome::Success(data) => Some(data),
            ParseOutcome::Failure(_) => None,
        }
    }

    /// The issues, if validation failed.
    pub fn issues(&self) -> Option<&ValidationIssues> {
        match self {
            ParseOutcome::Success(_) => None,
            ParseOutcome::Failure(issues) => Some(issues),
        }
    }

    pub fn into_result(self) -> Result<T, ValidationIssues> {
        match self {
            ParseOutcome::Success(data) => Ok(data),
            ParseOutcome::Failure(issues) => Err(issues),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Success(data) => ParseOutcome::Success(f(data)),
            ParseOutcome::Failure(issues) => ParseOutcome::Failure(issues),
        }
    }
}

impl<T> From<Result<T, ValidationIssues>> for ParseOutcome<T> {
    fn from(result: Result<T, ValidationIssues>) -> Self {
        match result {
            Ok(data) => ParseOutcome::Success(data),
            Err(issues) => ParseOutcome::Failure(issues),
        }
    }
}

impl<T: Serialize> Serialize for ParseOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ParseOutcome::Success(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            ParseOutcome::Failure(issues) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", issues)?;
            }
        }
        map.end()
    }
}
