use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use serde_json::{Map, Value};
use tracing::Level;

mod commands;
mod error;

#[derive(Parser)]
#[command(
    name = "predq",
    version = "0.0.1",
    about = "Predicate-to-filter-document compiler"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            predicate,
            file,
            captures,
            output,
            pretty,
        } => {
            let source = load_predicate(predicate, file)?;
            let captures = parse_captures(captures)?;

            let document = filter_compiler::compile_predicate_with_captures(&source, &captures)?;
            let json = if pretty {
                serde_json::to_string_pretty(&document)
            } else {
                serde_json::to_string(&document)
            }
            .map_err(CliError::JsonSerialize)?;

            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Commands::Ast { predicate, file } => {
            let source = load_predicate(predicate, file)?;
            let lambda = predicate_syntax::parse(&source)?;
            let json = serde_json::to_string_pretty(&lambda).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load_predicate(predicate: Option<String>, file: Option<String>) -> Result<String, CliError> {
    match (predicate, file) {
        (Some(source), _) => Ok(source),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?.trim().to_string()),
        (None, None) => Err(CliError::MissingPredicate),
    }
}

fn parse_captures(captures: Option<String>) -> Result<Map<String, Value>, CliError> {
    let Some(text) = captures else {
        return Ok(Map::new());
    };

    let value: Value = serde_json::from_str(&text).map_err(CliError::CapturesParse)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::CapturesNotObject(other.to_string())),
    }
}
