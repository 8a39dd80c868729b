mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "safeinvoke", version, about = "Check IPC command outcomes against their schemas")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_subcommand() {
        let cli = Cli::try_parse_from([
            "safeinvoke",
            "check",
            "get_count",
            "--schemas",
            "/tmp/schemas",
            "--resolved",
            "5",
        ])
        .expect("check args should parse");

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.command, "get_count");
                assert_eq!(args.resolved.as_deref(), Some("5"));
                assert!(!args.no_throw);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_outcome_args() {
        let err = Cli::try_parse_from([
            "safeinvoke",
            "check",
            "get_count",
            "--schemas",
            "/tmp/schemas",
            "--resolved",
            "5",
            "--rejected",
            "\"boom\"",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn requires_an_outcome() {
        let err = Cli::try_parse_from([
            "safeinvoke",
            "check",
            "get_count",
            "--schemas",
            "/tmp/schemas",
        ])
        .expect_err("missing outcome should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_schemas_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from([
            "safeinvoke",
            "schemas",
            "--schemas",
            "/tmp/schemas",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("schemas args should parse");
        assert!(matches!(cli.command, Command::Schemas(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
