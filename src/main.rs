// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line flags using clap and turn them into a Config
// 2. Initialize tracing for diagnostics (result lines do NOT go through
//    tracing - they belong to the report sink)
// 3. Open the log sink and load the check set - both fail-fast
// 4. Run every check concurrently and wait for all of them
// 5. Exit 0 - assertion outcomes never change the exit code
//
// The main/run split keeps error handling in one place: any startup error
// propagates out of run() with ? and becomes exit code 2.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - check definitions, fetching, matching
mod cli; // src/cli.rs - command-line parsing and the Config struct
mod report; // src/report.rs - the shared result sink
mod runner; // src/runner.rs - concurrent fan-out and the join barrier

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Config};
use report::Reporter;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(error) => {
            // Startup failed before (or while) opening the sink, so plain
            // stderr is the only place left to say why
            eprintln!("Error: {:#}", error);
            2
        }
    };

    std::process::exit(exit_code);
}

// The application logic
//
// Returns Ok(0) whenever the run completes, no matter how many assertions
// failed - failure information lives only in the log output. Errors are
// only possible before any check has started.
async fn run() -> Result<i32> {
    let config = Config::from(Cli::parse());

    init_tracing();

    // Both of these are fatal when they fail: without a sink there is
    // nowhere to report, and a check set that does not load cleanly must
    // not half-run
    let reporter = Arc::new(Reporter::open(&config)?);
    let checks = checker::load_checks(&config.urls_file)?;

    tracing::info!(
        count = checks.len(),
        file = %config.urls_file.display(),
        "loaded check definitions"
    );

    runner::run_checks(checks, reporter).await;

    Ok(0)
}

// Diagnostics go to stderr and are filterable via RUST_LOG, defaulting
// to info
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
