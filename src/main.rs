//! Issue linker console host.
//!
//! Reads chat lines from stdin, runs them through the linker as messages in
//! one configured room, and writes the replies to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use issue_linker::{LinkerConfig, LinkerError};
use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
const LOG_ENV: &str = "ISSUE_LINKER_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), LinkerError> {
    let config = load_config()?;

    if config.migrate_db {
        return cli::migrations::run(&config);
    }

    let linker = cli::build_linker(&config)?;
    let context = cli::console::ConsoleContext::from_config(&config);
    let mut stdout = tokio::io::stdout();
    cli::console::run_console(
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        &linker,
        &context,
    )
    .await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`LinkerError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<LinkerConfig, LinkerError> {
    LinkerConfig::load().map_err(|error| LinkerError::Configuration {
        message: error.to_string(),
    })
}
