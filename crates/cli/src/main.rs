use crate::{commands::Commands, error::CliError};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod actions;
mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "sieve",
    version = "0.1.0",
    about = "Validate and compile schema-checked filter expressions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli.command)
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Validate { target, output } => {
            info!(
                "Validating filter: {}, model: {}, schema: {}",
                target.filter, target.model, target.schema
            );

            let report = actions::validate(&target)?;
            match output {
                Some(path) => output::write_report(&report, &path)?,
                None => output::print_report(&report)?,
            }

            if report["valid"] == serde_json::Value::Bool(false) {
                warn!("Filter '{}' is invalid", target.filter);
                return Err(CliError::Rejected(target.filter));
            }
        }
        Commands::Compile {
            target,
            dialect,
            columns,
            strict_columns,
            simplify,
        } => {
            let compiled = actions::reject_invalid(
                &target,
                actions::compile_sql(&target, &dialect, &columns, strict_columns, simplify),
            )?;
            output::print_report(&compiled)?;
        }
        Commands::Describe { schema, model } => {
            let description = actions::describe(&schema, model.as_deref())?;
            output::print_report(&description)?;
        }
        Commands::Fmt { target } => {
            let canonical = actions::reject_invalid(&target, actions::format(&target))?;
            output::print_report(&canonical)?;
        }
    }

    Ok(())
}
