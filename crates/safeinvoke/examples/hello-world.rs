//! Minimal invoker over an in-process command table.
//!
//! Run with:
//!   cargo run --example hello-world

use safeinvoke::schema::{JsonSchema, Typed};
use safeinvoke::transport::{CommandTable, Settlement};
use safeinvoke::{for_response, for_result, SafeResult};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = CommandTable::new()
        .with_command("get_hello_world", |_args| async {
            Settlement::Ok(json!("Hello, world!"))
        })?
        .with_command("divide", |args| async move {
            let field = |name: &str| {
                args.as_ref()
                    .and_then(|map| map.get(name))
                    .and_then(|value| value.as_f64())
            };
            match (field("dividend"), field("divisor")) {
                (Some(_), Some(0.0)) => Settlement::Err(json!({ "code": "DIVIDE_BY_ZERO" })),
                (Some(dividend), Some(divisor)) => Settlement::Ok(json!(dividend / divisor)),
                _ => Settlement::Err(json!({ "code": "BAD_ARGS" })),
            }
        })?;

    let get_hello_world = for_response(&table, "get_hello_world", Typed::<String>::new())?;
    match get_hello_world.invoke(()).await? {
        SafeResult::Value(greeting) => println!("get_hello_world -> {greeting}"),
        SafeResult::Failure(raw) => println!("get_hello_world rejected: {raw}"),
    }

    let divide = for_result(
        &table,
        "divide",
        Typed::<f64>::new(),
        JsonSchema::untyped(&json!({
            "type": "object",
            "properties": { "code": { "type": "string" } },
            "required": ["code"]
        }))?,
    )?;
    for divisor in [4.0, 0.0] {
        let args = json!({ "dividend": 10.0, "divisor": divisor });
        match divide.invoke(args).await? {
            SafeResult::Value(quotient) => println!("divide by {divisor} -> {quotient}"),
            SafeResult::Failure(err) => println!("divide by {divisor} failed: {}", err["code"]),
        }
    }

    Ok(())
}
