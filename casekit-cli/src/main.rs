//! casekit operator tool
//!
//! Usage:
//!   casekit check schemas/*.json
//!   casekit convert --schemas schemas --schema Application --input app.json
//!   casekit flatten --schemas schemas --schema Application --input app.json

use anyhow::{Result, bail};
use casekit_cli::{check, convert, flatten_input, load_registry, read_generic_map};
use casekit_mapper::MapperConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "casekit")]
#[command(about = "Check casekit schemas and convert case data")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse schema documents and report unresolved related schemas
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Convert a generic map to an entity and print its canonical form
    Convert {
        /// Directory of schema documents
        #[arg(long)]
        schemas: PathBuf,
        /// Key of the schema to convert against
        #[arg(long)]
        schema: String,
        /// JSON object to convert
        #[arg(long)]
        input: PathBuf,
        /// Stored entity the input is applied onto
        #[arg(long)]
        current: Option<PathBuf>,
        /// Allow overwriting review fields of stored documents
        #[arg(long)]
        authorized: bool,
        /// Mapper config file (TOML)
        #[arg(long, default_value = "casekit.toml")]
        config: PathBuf,
    },
    /// Convert a generic map and print its flattened search form
    Flatten {
        #[arg(long)]
        schemas: PathBuf,
        #[arg(long)]
        schema: String,
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Check { files } => {
            let report = check(&files)?;
            info!("Parsed {} schema(s): {}", report.schemas.len(), report.schemas.join(", "));
            for missing in &report.unresolved {
                println!(
                    "{}.{} -> {} (not defined)",
                    missing.schema, missing.attribute, missing.missing_key
                );
            }
            if !report.is_clean() {
                bail!("{} unresolved schema reference(s)", report.unresolved.len());
            }
        }
        Command::Convert {
            schemas,
            schema,
            input,
            current,
            authorized,
            config,
        } => {
            let registry = load_registry(&schemas)?;
            let config = MapperConfig::load_from(&config);
            let input = read_generic_map(&input)?;
            let current = current.as_deref().map(read_generic_map).transpose()?;
            let output = convert(
                registry,
                config,
                &schema,
                &input,
                current.as_ref(),
                authorized,
            )?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Flatten {
            schemas,
            schema,
            input,
        } => {
            let registry = load_registry(&schemas)?;
            let input = read_generic_map(&input)?;
            for (path, text) in flatten_input(registry, &schema, &input)? {
                println!("{path}\t{text}");
            }
        }
    }
    Ok(())
}
