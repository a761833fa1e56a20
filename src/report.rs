// src/report.rs
// =============================================================================
// This module writes the result lines every check produces.
//
// The sink has two halves:
// - an optional log file, opened ONCE at startup in append mode and guarded
//   by a mutex so concurrent tasks never interleave bytes within a line
// - an optional stderr echo, where pass/fail lines get ANSI colors
//
// The log file always receives plain text - grep and CI log scrapers should
// not have to strip escape codes. Every line carries a local timestamp.
//
// The reporter never aggregates anything. One assertion, one line; one
// failed fetch, one line. There is no run-level verdict.
//
// Error policy: a sink that cannot be opened is a startup error returned to
// the caller. A write that fails mid-run aborts the whole process - once
// results stop reaching the log there is no point finishing the run.
// =============================================================================

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::checker::AssertionResult;
use crate::cli::Config;

const GREEN_BOLD: &str = "\x1b[1;32m";
const RED_BOLD: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

// Shared result sink
//
// One instance per run, wrapped in an Arc and handed to every check task.
pub struct Reporter {
    log_file: Option<Mutex<File>>,
    to_stderr: bool,
}

impl Reporter {
    // Opens the sink described by the config
    //
    // The log file is created if absent and appended to otherwise, matching
    // what you want when the same file collects several runs.
    pub fn open(config: &Config) -> Result<Self> {
        let log_file = match &config.log_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("could not open log file {}", path.display()))?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(Reporter {
            log_file,
            to_stderr: config.log_to_stderr,
        })
    }

    /// Emits the line for one assertion outcome
    pub fn assertion(&self, description: &str, result: &AssertionResult) {
        let line = if result.passed() {
            format!(
                "{}: PASS {} = {}",
                description, result.pattern, result.expected
            )
        } else {
            format!(
                "{}: FAIL {} != {}",
                description, result.pattern, result.expected
            )
        };

        let color = if result.passed() { GREEN_BOLD } else { RED_BOLD };
        self.write_line(&line, Some(color));
    }

    /// Emits the line for a check whose fetch failed
    ///
    /// The check's assertions are never evaluated in that case, so this is
    /// the only line the check contributes.
    pub fn connection_error(&self, description: &str, error: &anyhow::Error) {
        self.write_line(&format!("{}: Connection error: {:#}", description, error), None);
    }

    // Writes one timestamped line to every configured target
    //
    // The file write happens under the mutex as a single formatted buffer,
    // so a line from one task is never split by a line from another.
    fn write_line(&self, line: &str, color: Option<&str>) {
        let stamped = format!("{} {}", Local::now().format("%Y/%m/%d %H:%M:%S"), line);

        if let Some(file) = &self.log_file {
            let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(error) = writeln!(file, "{}", stamped) {
                eprintln!("Log write failed: {}", error);
                std::process::exit(2);
            }
        }

        if self.to_stderr {
            match color {
                Some(color) => eprintln!("{}{}{}", color, stamped, RESET),
                None => eprintln!("{}", stamped),
            }
        }
    }
}
