use safeinvoke_schema::{SchemaConfig, SchemaRegistry};

use crate::cmd::{SchemaDirArgs, SchemasArgs};
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_schemas, OutputFormat, SchemaRow};

pub fn run(args: SchemasArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args.schema_dir)?;
    let rows: Vec<SchemaRow<'_>> = registry
        .commands()
        .into_iter()
        .map(|command| SchemaRow {
            command,
            error_schema: registry.has_error_schema(command),
        })
        .collect();

    print_schemas(&rows, format);
    Ok(SUCCESS)
}

pub(crate) fn load_registry(args: &SchemaDirArgs) -> CliResult<SchemaRegistry> {
    let config = SchemaConfig {
        strict_mode: args.strict_schemas,
        ..SchemaConfig::default()
    };
    let registry = SchemaRegistry::from_directory_with_config(&args.schemas, config)
        .map_err(|err| schema_error("failed loading schemas", err))?;
    tracing::debug!(
        dir = %args.schemas.display(),
        commands = registry.commands().len(),
        "schema registry ready"
    );
    Ok(registry)
}
