// src/runner.rs
// =============================================================================
// This module fans the check set out into concurrent tasks and waits for
// all of them.
//
// Each check definition gets one tokio task running fetch -> match -> report
// for that definition alone. Tasks share nothing mutable except the
// reporter, which serializes its own writes. The JoinSet drain at the end
// is the single synchronization point of the whole program.
//
// There is no cancellation and no per-task timeout: a check that hangs on
// the network keeps the run alive until it resolves. That limitation is
// inherited behavior, kept on purpose - see DESIGN.md before changing it.
// =============================================================================

use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::checker::{self, CheckDefinition};
use crate::report::Reporter;

// Runs every check to completion
//
// Spawns one task per definition and blocks until the last one finishes.
// Outcomes are only visible through the reporter; this function has no
// return value because the run has no aggregate verdict.
pub async fn run_checks(checks: Vec<CheckDefinition>, reporter: Arc<Reporter>) {
    // One client for the whole run; clones share the connection pool
    let client = Client::new();

    let mut tasks = JoinSet::new();
    for check in checks {
        let client = client.clone();
        let reporter = Arc::clone(&reporter);
        tasks.spawn(run_check(client, check, reporter));
    }

    // Join barrier: drain the set until every spawned task has finished
    while let Some(joined) = tasks.join_next().await {
        if let Err(join_error) = joined {
            // A panicked check must not take the run down with it
            warn!("check task aborted: {join_error}");
        }
    }
}

// Runs a single check: fetch the body, evaluate the assertions, report
//
// A fetch failure short-circuits the check - no assertions are evaluated
// and the check contributes exactly one connection-error line.
async fn run_check(client: Client, check: CheckDefinition, reporter: Arc<Reporter>) {
    debug!(check = %check.description, url = %check.url, "starting check");

    let body = match checker::fetch_body(&client, &check).await {
        Ok(body) => body,
        Err(fetch_error) => {
            reporter.connection_error(&check.description, &fetch_error);
            return;
        }
    };

    match checker::evaluate(&body, &check.assertions) {
        Ok(results) => {
            for result in &results {
                reporter.assertion(&check.description, result);
            }
        }
        // Patterns are validated at load time, so this means a definition
        // reached the runner without going through load_checks
        Err(matcher_error) => {
            error!(check = %check.description, "assertion evaluation failed: {matcher_error:#}");
        }
    }
}
