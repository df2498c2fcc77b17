//! What each subcommand does, minus argument parsing and printing.

use crate::{commands::FilterTarget, error::CliError, output};
use compiler::{CompileOptions, Compiler};
use connectors::sql::{SqlPredicateBuilder, dialect_for};
use filter_syntax::{FilterNode, parse, serialize};
use model::{ModelSchema, SchemaConfig, SchemaRegistry};
use serde_json::{Value as JsonValue, json};
use std::{io::Read, sync::Arc};
use tracing::info;

pub fn load_registry(path: &str) -> Result<SchemaRegistry, CliError> {
    let config = SchemaConfig::from_path(path)?;
    let registry = SchemaRegistry::from_config(config)?;
    info!("Loaded {} models from '{}'", registry.len(), path);
    Ok(registry)
}

pub fn load_filter(path: &str) -> Result<JsonValue, CliError> {
    let source = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&source)?)
}

fn load_target(target: &FilterTarget) -> Result<(Arc<ModelSchema>, JsonValue), CliError> {
    let registry = load_registry(&target.schema)?;
    let schema = registry.lookup(&target.model)?;
    let raw = load_filter(&target.filter)?;
    Ok((schema, raw))
}

fn parse_target(target: &FilterTarget) -> Result<(Arc<ModelSchema>, FilterNode), CliError> {
    let (schema, raw) = load_target(target)?;
    let tree = parse(&raw, &schema).map_err(CliError::InvalidFilter)?;
    Ok((schema, tree))
}

/// Validation report: `{"valid": true, ...}` or `{"valid": false, "errors": [...]}`.
pub fn validate(target: &FilterTarget) -> Result<JsonValue, CliError> {
    let (schema, raw) = load_target(target)?;
    let report = match parse(&raw, &schema) {
        Ok(tree) => json!({
            "valid": true,
            "nodes": tree.node_count(),
            "fields": tree.fields(),
        }),
        Err(errors) => json!({
            "valid": false,
            "errors": errors,
        }),
    };
    Ok(report)
}

/// Prints the validation errors of an invalid filter as a JSON report and
/// replaces them with a short [`CliError::Rejected`].
pub fn reject_invalid<T>(target: &FilterTarget, result: Result<T, CliError>) -> Result<T, CliError> {
    match result {
        Err(CliError::InvalidFilter(errors)) => {
            output::print_report(&errors)?;
            Err(CliError::Rejected(target.filter.clone()))
        }
        other => other,
    }
}

pub fn compile_sql(
    target: &FilterTarget,
    dialect: &str,
    columns: &[String],
    strict_columns: bool,
    simplify: bool,
) -> Result<JsonValue, CliError> {
    let dialect = dialect_for(dialect).ok_or_else(|| CliError::UnknownDialect(dialect.into()))?;

    let mut builder = SqlPredicateBuilder::new().strict(strict_columns);
    for mapping in columns {
        let (field, column) = mapping
            .split_once('=')
            .filter(|(f, c)| !f.is_empty() && !c.is_empty())
            .ok_or_else(|| CliError::InvalidColumnMapping(mapping.clone()))?;
        builder = builder.with_column(field, column);
    }

    let (schema, tree) = parse_target(target)?;
    let predicate =
        Compiler::with_options(&schema, &builder, CompileOptions { simplify }).compile(&tree)?;
    let (sql, params) = predicate.to_sql(dialect.as_ref());

    Ok(json!({
        "dialect": dialect.name(),
        "sql": sql,
        "params": params.iter().map(|p| p.to_json()).collect::<Vec<_>>(),
    }))
}

pub fn describe(schema_path: &str, model: Option<&str>) -> Result<JsonValue, CliError> {
    let registry = load_registry(schema_path)?;
    let names: Vec<String> = match model {
        Some(name) => vec![name.to_string()],
        None => registry.model_names().into_iter().map(str::to_string).collect(),
    };

    let mut models = serde_json::Map::new();
    for name in names {
        let schema = registry.lookup(&name)?;
        models.insert(name, schema.describe().to_json());
    }
    Ok(JsonValue::Object(models))
}

pub fn format(target: &FilterTarget) -> Result<JsonValue, CliError> {
    let (_, tree) = parse_target(target)?;
    Ok(serialize(&tree))
}
