// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The parsed flags are converted into a `Config` struct that gets passed
// into the rest of the program. Nothing reads flags from global state, so
// tests can build a Config by hand and run in parallel without stepping on
// each other.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "url-sentinel",
    version,
    about = "Fetches HTTP endpoints and checks their bodies against regex assertions",
    long_about = "url-sentinel reads a JSON file of URL checks, fetches every URL \
                  concurrently, and logs one pass/fail line per regex assertion. \
                  The process exits 0 even when assertions fail - results live in \
                  the log output."
)]
pub struct Cli {
    /// File containing a JSON formatted list of URL checks to run
    #[arg(long, default_value = "urls_list.json")]
    pub urlsfile: PathBuf,

    /// Whether to echo every result line to stderr
    ///
    /// Takes an explicit value: --logtostderr false
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub logtostderr: bool,

    /// File that result lines are appended to (created if absent)
    ///
    /// When omitted, result lines only go to stderr (or nowhere at all
    /// if --logtostderr false)
    #[arg(long)]
    pub logfile: Option<PathBuf>,
}

// Runtime configuration, built once at startup and passed by reference
// into the orchestrator and the reporter
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON check definitions file
    pub urls_file: PathBuf,
    /// Duplicate result lines to stderr
    pub log_to_stderr: bool,
    /// Optional log file the sink appends to
    pub log_file: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            urls_file: cli.urlsfile,
            log_to_stderr: cli.logtostderr,
            log_file: cli.logfile,
        }
    }
}
