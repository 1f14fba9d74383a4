//! world-inspect
//!
//! Decode a binary file as a named record kind and print the result as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use world_protocol::config::{ByteOrder, CodecConfig};
use world_protocol::utils::{logging, metrics};
use world_protocol::{decode_record, ReadStream, RecordKind, Result};

#[derive(Parser)]
#[command(name = "world-inspect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect game record files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "WORLD_PROTOCOL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured byte order (little or big)
    #[arg(long)]
    byte_order: Option<ByteOrder>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one record and print it
    #[command(alias = "d")]
    Decode {
        /// Record kind: zone, scene, vector3, vector4
        kind: RecordKind,
        /// Input file
        file: PathBuf,
        /// Byte offset of the record in the file
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print an example configuration file
    Config,
}

fn load_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::from_env()?,
    };
    if let Some(order) = cli.byte_order {
        config.stream.byte_order = order;
    }
    if cli.verbose {
        config.logging.log_level = tracing::Level::DEBUG;
    }
    config.validate_strict()?;
    Ok(config)
}

fn decode(
    config: &CodecConfig,
    kind: RecordKind,
    file: &Path,
    offset: usize,
    compact: bool,
) -> Result<()> {
    let data = std::fs::read(file)?;
    debug!(file = %file.display(), bytes = data.len(), %kind, offset, "Read input");

    let mut stream = ReadStream::with_config(data, config.stream);
    stream.skip(offset)?;
    let record = decode_record(kind, &mut stream)?;
    if !stream.is_empty() {
        debug!(trailing = stream.remaining(), "Input has unread trailing bytes");
    }

    let rendered = if compact {
        serde_json::to_string(&record)
    } else {
        serde_json::to_string_pretty(&record)
    }
    .map_err(|e| world_protocol::ProtocolError::Custom(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Config = cli.command {
        print!("{}", CodecConfig::example_config());
        return Ok(());
    }

    let config = load_config(&cli)?;
    logging::init_logging(&config.logging)?;

    if let Commands::Decode {
        kind,
        file,
        offset,
        compact,
    } = &cli.command
    {
        decode(&config, *kind, file, *offset, *compact)?;
    }
    metrics::global().log_summary();
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "world-inspect failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
