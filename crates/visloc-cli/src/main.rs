//! visloc CLI
//!
//! Command-line front end for the locate convention: push locate commands,
//! clear them, and read back the published location.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use visloc_core::logging_facility::{self, Profile};
use visloc_engine::LocationRequester;
use visloc_store::RedisStore;

mod commands;
mod config;

use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "visloc")]
#[command(about = "visloc - request and read target locations over Redis", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./visloc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store host, overrides the configuration file
    #[arg(long, global = true)]
    host: Option<String>,

    /// Store port, overrides the configuration file
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log profile: development, production or test
    #[arg(long = "log", global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Push a locate command onto the queue
    Locate(commands::queue::LocateArgs),
    /// Delete every pending command
    Clear,
    /// Print the last published location
    Location,
    /// Print the number of pending commands
    Pending,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        CliConfig::load(cli.config.as_deref())?.with_overrides(cli.host, cli.port, cli.log)?;
    logging_facility::init(config.log);

    let store = RedisStore::connect(&config.store)?;
    let mut requester = LocationRequester::with_keys(store, config.keys)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Locate(args) => commands::queue::execute_locate(args, &mut requester, &mut out)?,
        Commands::Clear => commands::queue::execute_clear(&mut requester, &mut out)?,
        Commands::Location => commands::location::execute(&mut requester, &mut out)?,
        Commands::Pending => commands::queue::execute_pending(&mut requester, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
