// src/checker/http.rs
// =============================================================================
// This module performs the HTTP fetch for one check.
//
// Key behavior:
// - One request per check, using the definition's method and URL
// - No request body, no custom headers
// - The whole response body is read into memory before returning
// - Any transport failure (DNS, connection refused, ...) is returned as an
//   error; there is no retry
//
// The response status code is deliberately not inspected: a 404 page still
// has a body, and whether that body is acceptable is entirely up to the
// check's assertions.
//
// The caller supplies the `reqwest::Client`. One client is created per run
// and cloned into every task - cloning is cheap (it's reference-counted
// internally) and keeps connection pooling shared across checks.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, Method};

use super::CheckDefinition;

// Fetches the response body for one check definition
//
// Returns the full body as raw bytes on success. The bytes are matched
// against the assertion patterns without a UTF-8 detour, so binary bodies
// work too.
pub async fn fetch_body(client: &Client, check: &CheckDefinition) -> Result<Vec<u8>> {
    // Method tokens are validated at load time; this re-parse only exists
    // because the definition stores the method as a plain string
    let method = Method::from_bytes(check.method.as_bytes())
        .with_context(|| format!("invalid method '{}'", check.method))?;

    let response = client
        .request(method, &check.url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", check.url))?;

    let body = response
        .bytes()
        .await
        .with_context(|| format!("reading body from {} failed", check.url))?;

    Ok(body.to_vec())
}
