//! Logkeeper CLI binary entrypoint.
//!
//! This is the main entry point for the `logkeeper` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logkeeper_cli::cli::{Cli, Commands};
use logkeeper_cli::commands::{DeleteCommand, IngestCommand, SearchCommand};
use logkeeper_cli::output::OutputFormat;
use logkeeper_core::{FileRecordStore, LoggingService, ServiceConfig};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_status())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), logkeeper_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let store = FileRecordStore::with_base_dir(&cli.data_dir)?;
    let service = LoggingService::with_config(
        store,
        ServiceConfig::new().with_max_read_limit(cli.max_read_limit),
    );
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Ingest(args) => {
            let cmd = IngestCommand::new(&service);
            cmd.execute(&mut stdout, &format, args).await?;
        }
        Commands::Search(args) => {
            let cmd = SearchCommand::new(&service);
            cmd.execute(&mut stdout, &format, args).await?;
        }
        Commands::Delete(args) => {
            let cmd = DeleteCommand::new(&service);
            cmd.execute(&mut stdout, &format, args).await?;
        }
    }

    Ok(())
}
