use std::fs;

use safeinvoke_invoker::{DynamicInvoker, InvokerConfig};
use safeinvoke_transport::{InvokeArgs, Recorded, Replay};
use serde_json::Value;

use crate::cmd::schemas::load_registry;
use crate::cmd::CheckArgs;
use crate::exit::{invoke_error, io_error, CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_result, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args.schema_dir)?;
    let recorded = resolve_outcome(&args)?;
    let call_args = parse_call_args(args.args.as_deref())?;
    let config = InvokerConfig {
        throw_parse_error: !args.no_throw,
    };

    let invoker =
        DynamicInvoker::from_registry(Replay::new(recorded), &registry, &args.command, config)
            .map_err(|err| invoke_error("check failed", err))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|err| io_error("failed to start runtime", err))?;
    let result = runtime
        .block_on(invoker.invoke(call_args))
        .map_err(|err| invoke_error("check failed", err))?;

    print_result(&args.command, &result, format);
    Ok(if result.is_ok() { SUCCESS } else { FAILURE })
}

fn resolve_outcome(args: &CheckArgs) -> CliResult<Recorded> {
    match (&args.resolved, &args.rejected) {
        (Some(resolved), None) => Ok(Recorded::Resolved(read_json("--resolved", resolved)?)),
        (None, Some(rejected)) => Ok(Recorded::Rejected(read_json("--rejected", rejected)?)),
        _ => Err(CliError::new(
            USAGE,
            "exactly one of --resolved or --rejected is required",
        )),
    }
}

/// Parse a JSON argument, reading it from a file when given as `@path`.
fn read_json(flag: &str, input: &str) -> CliResult<Value> {
    let text = match input.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {path}"), err))?,
        None => input.to_string(),
    };
    serde_json::from_str(&text)
        .map_err(|err| CliError::new(USAGE, format!("{flag} is not valid JSON: {err}")))
}

fn parse_call_args(input: Option<&str>) -> CliResult<InvokeArgs> {
    let Some(input) = input else {
        return Ok(None);
    };
    match read_json("--args", input)? {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(CliError::new(USAGE, "--args must be a JSON object")),
    }
}
