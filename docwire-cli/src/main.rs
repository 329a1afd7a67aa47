//! docwire - submit a command buffer to a docwire server.
//!
//! Reads the command buffer from a file (or standard input when the argument
//! is `-` or omitted), sends it as one length-prefixed frame, and prints the
//! decoded response.

use clap::Parser;
use colored::Colorize;
use docwire_client::{Client, ClientError, CommandSource, ConnectionConfig};
use docwire_protocol::{DEFAULT_HOST, DEFAULT_PORT};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Marker line written before the server's response.
const RESPONSE_MARKER: &str = "<!-- Server response: -->";

#[derive(Parser)]
#[command(name = "docwire")]
#[command(about = "Submit a command buffer to a docwire server")]
#[command(version)]
struct Cli {
    /// Command file to submit ("-" or omitted reads standard input)
    command_file: Option<String>,

    /// Server host
    #[arg(long, default_value = DEFAULT_HOST, env = "DOCWIRE_HOST")]
    host: String,

    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT, env = "DOCWIRE_PORT")]
    port: u16,

    /// Connect timeout in seconds (waits indefinitely if unset)
    #[arg(long, env = "DOCWIRE_CONNECT_TIMEOUT")]
    connect_timeout: Option<u64>,

    /// Request timeout in seconds (waits indefinitely if unset)
    #[arg(long, env = "DOCWIRE_TIMEOUT")]
    timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "Error".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let source = CommandSource::from_arg(cli.command_file.as_deref());
    let command = source.read().await?;
    tracing::debug!("Read {} command bytes", command.len());

    let mut config = ConnectionConfig::new(cli.host, cli.port);
    if let Some(secs) = cli.connect_timeout {
        config = config.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.timeout {
        config = config.with_io_timeout(Duration::from_secs(secs));
    }

    let client = Client::new(config);
    let response = client.submit(&command).await?;

    println!("{RESPONSE_MARKER}\n{response}");
    Ok(())
}
