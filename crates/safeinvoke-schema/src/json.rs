use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::outcome::{ParseOutcome, ValidationIssues};
use crate::schema::{deserialize_outcome, Schema};
use crate::strict::close_object_schemas;

/// Schema backed by a compiled JSON Schema document.
///
/// Values are checked against the document first; a value that passes is
/// then deserialized into `T` (plain [`Value`] by default). Cloning shares
/// the compiled validator.
pub struct JsonSchema<T = Value> {
    validator: Arc<Validator>,
    max_issues: usize,
    _marker: PhantomData<fn() -> T>,
}

impl JsonSchema<Value> {
    /// Compile a schema that yields the validated value unchanged.
    pub fn untyped(schema: &Value) -> Result<Self> {
        Self::compile(schema)
    }
}

impl<T> JsonSchema<T> {
    /// Compile with default config.
    pub fn compile(schema: &Value) -> Result<Self> {
        Self::compile_with_config(schema, &SchemaConfig::default())
    }

    /// Compile with explicit config.
    pub fn compile_with_config(schema: &Value, config: &SchemaConfig) -> Result<Self> {
        let validator = if config.strict_mode {
            let mut closed = schema.clone();
            close_object_schemas(&mut closed);
            jsonschema::validator_for(&closed)
        } else {
            jsonschema::validator_for(schema)
        }
        .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;

        Ok(Self {
            validator: Arc::new(validator),
            max_issues: config.max_issues.max(1),
            _marker: PhantomData,
        })
    }

    /// Compile from a JSON string.
    pub fn from_json(schema_json: &str, config: &SchemaConfig) -> Result<Self> {
        let schema: Value = serde_json::from_str(schema_json)?;
        Self::compile_with_config(&schema, config)
    }

    /// Reuse the compiled document, deserializing into `U` instead.
    pub fn typed<U>(self) -> JsonSchema<U> {
        JsonSchema {
            validator: self.validator,
            max_issues: self.max_issues,
            _marker: PhantomData,
        }
    }

    /// Check `value` against the document only.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    fn issues(&self, value: &Value) -> Option<ValidationIssues> {
        let issues: Vec<String> = self
            .validator
            .iter_errors(value)
            .take(self.max_issues)
            .map(|err| err.to_string())
            .collect();

        (!issues.is_empty()).then(|| ValidationIssues::new(issues))
    }
}

impl<T: DeserializeOwned> Schema for JsonSchema<T> {
    type Output = T;

    fn safe_parse(&self, value: &Value) -> ParseOutcome<T> {
        match self.issues(value) {
            Some(issues) => ParseOutcome::Failure(issues),
            None => deserialize_outcome(value),
        }
    }
}

impl<T> Clone for JsonSchema<T> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            max_issues: self.max_issues,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("output", &std::any::type_name::<T>())
            .field("max_issues", &self.max_issues)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Profile {
        id: u64,
        name: String,
    }

    fn profile_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "minimum": 1 },
                "name": { "type": "string" }
            },
            "required": ["id", "name"]
        })
    }

    #[test]
    fn untyped_returns_value_unchanged() {
        let schema = JsonSchema::untyped(&json!({ "type": "number" })).unwrap();
        assert_eq!(schema.parse(&json!(5)), Ok(json!(5)));
        assert!(!schema.safe_parse(&json!("five")).is_success());
    }

    #[test]
    fn typed_deserializes_after_validation() {
        let schema = JsonSchema::<Profile>::compile(&profile_schema()).unwrap();
        assert_eq!(
            schema.parse(&json!({ "id": 3, "name": "ada" })),
            Ok(Profile {
                id: 3,
                name: "ada".to_string()
            })
        );
    }

    #[test]
    fn reports_each_issue_up_to_limit() {
        let schema = JsonSchema::untyped(&profile_schema()).unwrap();
        let outcome = schema.safe_parse(&json!({ "id": 0, "name": 7 }));
        assert_eq!(outcome.issues().map(ValidationIssues::len), Some(2));

        let limited = JsonSchema::<Value>::compile_with_config(
            &profile_schema(),
            &SchemaConfig {
                max_issues: 1,
                ..SchemaConfig::default()
            },
        )
        .unwrap();
        let outcome = limited.safe_parse(&json!({ "id": 0, "name": 7 }));
        assert_eq!(outcome.issues().map(ValidationIssues::len), Some(1));
    }

    #[test]
    fn strict_mode_rejects_undeclared_properties() {
        let payload = json!({ "id": 1, "name": "ok", "extra": true });

        let permissive = JsonSchema::untyped(&profile_schema()).unwrap();
        assert!(permissive.is_valid(&payload));

        let strict = JsonSchema::<Value>::compile_with_config(
            &profile_schema(),
            &SchemaConfig {
                strict_mode: true,
                ..SchemaConfig::default()
            },
        )
        .unwrap();
        assert!(!strict.is_valid(&payload));
        assert!(strict.is_valid(&json!({ "id": 1, "name": "ok" })));
    }

    #[test]
    fn invalid_documents_fail_to_compile() {
        assert!(matches!(
            JsonSchema::untyped(&json!({ "type": "definitely-not-a-type" })),
            Err(SchemaError::CompileFailed(_))
        ));
        assert!(matches!(
            JsonSchema::<Value>::from_json("{not json", &SchemaConfig::default()),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn typed_view_shares_validator() {
        let schema = JsonSchema::untyped(&json!({ "type": "integer" })).unwrap();
        let typed: JsonSchema<i64> = schema.clone().typed();
        assert_eq!(typed.parse(&json!(-4)), Ok(-4));
        assert!(typed.safe_parse(&json!(1.5)).issues().is_some());
    }
}
