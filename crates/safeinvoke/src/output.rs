use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use safeinvoke_invoker::SafeResult;
use serde::Serialize;
use serde_json::Value;

const CHECK_RESULT_SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/safeinvoke/cli/v1/check-result.schema.json";
const SCHEMA_LIST_SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/safeinvoke/cli/v1/schema-list.schema.json";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    schema_id: &'a str,
    command: &'a str,
    result: &'a SafeResult<Value, Value>,
}

/// One row of the `schemas` listing.
#[derive(Serialize)]
pub struct SchemaRow<'a> {
    pub command: &'a str,
    pub error_schema: bool,
}

#[derive(Serialize)]
struct SchemaListOutput<'a> {
    schema_id: &'a str,
    commands: &'a [SchemaRow<'a>],
}

pub fn print_result(command: &str, result: &SafeResult<Value, Value>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = CheckOutput {
                schema_id: CHECK_RESULT_SCHEMA_ID,
                command,
                result,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COMMAND", "OK", "PAYLOAD"])
                .add_row(vec![
                    command.to_string(),
                    result.is_ok().to_string(),
                    payload_text(result),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "command={} ok={} payload={}",
                command,
                result.is_ok(),
                payload_text(result)
            );
        }
    }
}

pub fn print_schemas(rows: &[SchemaRow<'_>], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SchemaListOutput {
                schema_id: SCHEMA_LIST_SCHEMA_ID,
                commands: rows,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COMMAND", "ERROR SCHEMA"]);
            for row in rows {
                table.add_row(vec![
                    row.command.to_string(),
                    yes_no(row.error_schema).to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!(
                    "command={} error_schema={}",
                    row.command,
                    yes_no(row.error_schema)
                );
            }
        }
    }
}

fn payload_text(result: &SafeResult<Value, Value>) -> String {
    match result {
        SafeResult::Value(value) | SafeResult::Failure(value) => value.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_text_renders_either_branch() {
        assert_eq!(payload_text(&SafeResult::Value(json!({ "a": 1 }))), r#"{"a":1}"#);
        assert_eq!(payload_text(&SafeResult::Failure(json!("boom"))), r#""boom""#);
    }

    #[test]
    fn check_output_embeds_result_shape() {
        let result = SafeResult::Value(json!(5));
        let out = CheckOutput {
            schema_id: CHECK_RESULT_SCHEMA_ID,
            command: "get_count",
            result: &result,
        };
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["result"], json!({ "ok": true, "value": 5 }));
        assert_eq!(value["command"], json!("get_count"));
    }
}
