use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use safeinvoke_transport::validate_command;
use serde_json::Value;

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::json::JsonSchema;

const RESPONSE_SUFFIX: &str = ".schema.json";
const ERROR_SUFFIX: &str = ".err.schema.json";

/// The schemas registered for one command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSchemas<'a> {
    /// Schema for resolved values.
    pub ok: &'a JsonSchema,
    /// Schema for rejection values, when the command declares one.
    pub err: Option<&'a JsonSchema>,
}

/// Command-keyed registry of compiled response and error schemas.
pub struct SchemaRegistry {
    responses: BTreeMap<String, JsonSchema>,
    errors: BTreeMap<String, JsonSchema>,
    config: SchemaConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            responses: BTreeMap::new(),
            errors: BTreeMap::new(),
            config,
        }
    }

    /// Register the response schema for a command from a JSON string.
    pub fn register(&mut self, command: &str, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(command, &schema)
    }

    /// Register the response schema for a command from a JSON value.
    pub fn register_value(&mut self, command: &str, schema: &Value) -> Result<()> {
        validate_command(command)?;
        let compiled = JsonSchema::compile_with_config(schema, &self.config)?;
        tracing::debug!(command, "registered response schema");
        self.responses.insert(command.to_string(), compiled);
        Ok(())
    }

    /// Register the error schema for a command from a JSON string.
    ///
    /// The command's response schema must already be registered.
    pub fn register_error(&mut self, command: &str, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_error_value(command, &schema)
    }

    /// Register the error schema for a command from a JSON value.
    pub fn register_error_value(&mut self, command: &str, schema: &Value) -> Result<()> {
        if !self.responses.contains_key(command) {
            return Err(SchemaError::MissingResponseSchema(command.to_string()));
        }
        let compiled = JsonSchema::compile_with_config(schema, &self.config)?;
        tracing::debug!(command, "registered error schema");
        self.errors.insert(command.to_string(), compiled);
        Ok(())
    }

    /// Load schemas from a directory.
    ///
    /// `<command>.schema.json` holds the response schema and
    /// `<command>.err.schema.json` the optional error schema. Other files
    /// are ignored; symlinked schema files are refused.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, SchemaConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: SchemaConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut response_sources = Vec::new();
        let mut error_sources = Vec::new();

        let entries = std::fs::read_dir(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(schema_file) = classify_file_name(&file_name) else {
                continue;
            };

            let loaded = response_sources.len() + error_sources.len() + 1;
            if loaded > config.max_schemas_from_directory {
                return Err(SchemaError::LoadFailed(format!(
                    "schema count exceeds configured max ({}): {loaded}",
                    config.max_schemas_from_directory
                )));
            }

            let Some(content) = read_schema_file(&entry.path(), &file_name, &config)? else {
                continue;
            };
            match schema_file {
                SchemaFile::Response(command) => response_sources.push((command, content)),
                SchemaFile::Error(command) => error_sources.push((command, content)),
            }
        }

        for (command, content) in &response_sources {
            registry
                .register(command, content)
                .map_err(|err| with_file_context(err, command, RESPONSE_SUFFIX))?;
        }
        for (command, content) in &error_sources {
            registry
                .register_error(command, content)
                .map_err(|err| with_file_context(err, command, ERROR_SUFFIX))?;
        }

        tracing::debug!(
            path = %path.display(),
            commands = registry.responses.len(),
            error_schemas = registry.errors.len(),
            "loaded schema directory"
        );
        Ok(registry)
    }

    /// Load from embedded `(command, response schema)` pairs.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (command, schema) in schemas {
            registry.register(command, schema)?;
        }
        Ok(registry)
    }

    /// Load from embedded `(command, response schema, error schema)` entries.
    pub fn from_embedded_pairs(schemas: &[(&str, &str, Option<&str>)]) -> Result<Self> {
        let mut registry = Self::new();
        for (command, response, error) in schemas {
            registry.register(command, response)?;
            if let Some(error) = error {
                registry.register_error(command, error)?;
            }
        }
        Ok(registry)
    }

    /// Schemas registered for `command`.
    pub fn get(&self, command: &str) -> Option<CommandSchemas<'_>> {
        self.responses.get(command).map(|ok| CommandSchemas {
            ok,
            err: self.errors.get(command),
        })
    }

    /// Check if a command has a registered response schema.
    pub fn has_schema(&self, command: &str) -> bool {
        self.responses.contains_key(command)
    }

    /// Check if a command has a registered error schema.
    pub fn has_error_schema(&self, command: &str) -> bool {
        self.errors.contains_key(command)
    }

    /// Commands with registered schemas, sorted.
    pub fn commands(&self) -> Vec<&str> {
        self.responses.keys().map(String::as_str).collect()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

enum SchemaFile {
    Response(String),
    Error(String),
}

fn classify_file_name(file_name: &str) -> Option<SchemaFile> {
    if let Some(command) = file_name.strip_suffix(ERROR_SUFFIX) {
        return Some(SchemaFile::Error(command.to_string()));
    }
    file_name
        .strip_suffix(RESPONSE_SUFFIX)
        .map(|command| SchemaFile::Response(command.to_string()))
}

fn with_file_context(err: SchemaError, command: &str, suffix: &str) -> SchemaError {
    match err {
        SchemaError::MissingResponseSchema(_) => err,
        other => SchemaError::LoadFailed(format!("{command}{suffix}: {other}")),
    }
}

/// Read one schema file, enforcing the no-symlink rule and the size limit.
///
/// Returns `None` for entries that are not regular files.
fn read_schema_file(path: &Path, file_name: &str, config: &SchemaConfig) -> Result<Option<String>> {
    let path_metadata = std::fs::symlink_metadata(path)
        .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
    let file_type = path_metadata.file_type();

    if file_type.is_symlink() {
        return Err(SchemaError::LoadFailed(format!(
            "refusing to load schema symlink: {file_name}"
        )));
    }
    if !file_type.is_file() {
        return Ok(None);
    }

    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;
    let opened_metadata = file
        .metadata()
        .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;

    #[cfg(unix)]
    {
        if !same_file_identity(&path_metadata, &opened_metadata) {
            return Err(SchemaError::LoadFailed(format!(
                "schema file changed during load: {file_name}"
            )));
        }
    }

    let max_bytes = config.max_schema_file_size;
    if opened_metadata.len() > max_bytes as u64 {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large ({} bytes): {file_name}",
            opened_metadata.len()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large while reading: {file_name}"
        )));
    }

    Ok(Some(content))
}

#[cfg(unix)]
fn same_file_identity(
    path_metadata: &std::fs::Metadata,
    opened_metadata: &std::fs::Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    path_metadata.dev() == opened_metadata.dev() && path_metadata.ino() == opened_metadata.ino()
}
