use serde_json::{Map, Value};

/// Keywords whose value is a map of subschemas.
const SCHEMA_MAPS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords whose value is a single subschema (or, for `items`, possibly a list).
const SCHEMA_SLOTS: [&str; 11] = [
    "propertyNames",
    "additionalProperties",
    "unevaluatedProperties",
    "items",
    "contains",
    "additionalItems",
    "unevaluatedItems",
    "not",
    "if",
    "then",
    "else",
];

/// Keywords whose value is a list of subschemas.
const SCHEMA_LISTS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Keywords that only make sense on object schemas.
const OBJECT_KEYWORDS: [&str; 8] = [
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "propertyNames",
];

/// Close every object schema in `schema` against undeclared properties.
///
/// An explicit `additionalProperties` is left as written.
pub(crate) fn close_object_schemas(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            if describes_object(map) {
                map.entry("additionalProperties")
                    .or_insert(Value::Bool(false));
            }

            for key in SCHEMA_MAPS {
                if let Some(Value::Object(children)) = map.get_mut(key) {
                    children.values_mut().for_each(close_object_schemas);
                }
            }
            for key in SCHEMA_SLOTS {
                if let Some(child) = map.get_mut(key) {
                    close_object_schemas(child);
                }
            }
            for key in SCHEMA_LISTS {
                if let Some(Value::Array(children)) = map.get_mut(key) {
                    children.iter_mut().for_each(close_object_schemas);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_object_schemas),
        _ => {}
    }
}

fn describes_object(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "object"),
        _ => OBJECT_KEYWORDS.iter().any(|keyword| map.contains_key(*keyword)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn closes_nested_objects_and_combinators() {
        let mut schema = json!({
            "type": "object",
            "properties": {
                "inner": { "properties": { "v": { "type": "integer" } } }
            },
            "anyOf": [{ "type": ["object", "null"] }]
        });
        close_object_schemas(&mut schema);

        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(
            schema["properties"]["inner"]["additionalProperties"],
            json!(false)
        );
        assert_eq!(schema["anyOf"][0]["additionalProperties"], json!(false));
        assert!(schema["properties"]["inner"]["properties"]["v"]
            .get("additionalProperties")
            .is_none());
    }

    #[test]
    fn keeps_explicit_additional_properties() {
        let mut schema = json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        });
        close_object_schemas(&mut schema);
        assert_eq!(schema["additionalProperties"], json!({ "type": "string" }));
    }
}
