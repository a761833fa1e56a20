// src/checker/definition.rs
// =============================================================================
// This module defines what a URL check looks like and loads the check set
// from disk.
//
// The input file is a JSON array of objects:
//
//   [
//     {
//       "description": "homepage",
//       "method": "GET",
//       "url": "https://example.com/",
//       "match": { "Welcome": true, "Server Error": false }
//     }
//   ]
//
// Each entry in "match" is an assertion: a regex pattern mapped to whether
// the pattern is expected to match the response body.
//
// Loading is fail-fast: a missing file, malformed JSON, an invalid URL or
// an assertion pattern that does not compile all abort the run before any
// check is spawned. A definition that slips through validation would
// otherwise only blow up mid-run inside its own task, which is much harder
// to diagnose.
// =============================================================================

use anyhow::{Context, Result};
use regex::bytes::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

// One configured URL check: where to send the request and which patterns
// the response body is expected to match (or not match)
//
// Definitions are immutable once loaded. The orchestrator moves each one
// into the task that processes it, so there is no sharing after dispatch.
//
// Note on assertions: the JSON "match" object maps pattern -> expected, so
// duplicate patterns within one check collapse to the last value during
// deserialization, and iteration order is unspecified. Log line order
// across assertions of one check is therefore not stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    /// Human-readable label, prefixed to every result line
    pub description: String,
    /// HTTP method token, passed through verbatim (usually "GET")
    pub method: String,
    /// Endpoint to fetch
    pub url: String,
    /// Regex pattern -> expected match outcome
    #[serde(rename = "match")]
    pub assertions: HashMap<String, bool>,
}

impl CheckDefinition {
    // Rejects definitions that could never run: bad URL, bad method token,
    // or an assertion pattern that is not a valid regex
    fn validate(&self) -> Result<()> {
        Url::parse(&self.url)
            .with_context(|| format!("{}: invalid url '{}'", self.description, self.url))?;
        Method::from_bytes(self.method.as_bytes())
            .with_context(|| format!("{}: invalid method '{}'", self.description, self.method))?;
        for pattern in self.assertions.keys() {
            Regex::new(pattern)
                .with_context(|| format!("{}: invalid pattern '{}'", self.description, pattern))?;
        }
        Ok(())
    }
}

// Loads and validates the check set
//
// Returns the definitions in file order. Any I/O, parse or validation
// failure is returned as an error - the caller treats that as fatal for
// the whole process, since running a partial or misconfigured check set
// would report misleading results.
pub fn load_checks(path: &Path) -> Result<Vec<CheckDefinition>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read checks file {}", path.display()))?;

    let checks: Vec<CheckDefinition> = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse checks file {}", path.display()))?;

    for check in &checks {
        check.validate()?;
    }

    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_checks() -> Vec<CheckDefinition> {
        vec![
            CheckDefinition {
                description: "test 1".to_string(),
                method: "GET".to_string(),
                url: "http://localhost/one".to_string(),
                assertions: HashMap::from([
                    ("test1".to_string(), true),
                    ("test2".to_string(), false),
                ]),
            },
            CheckDefinition {
                description: "test 2".to_string(),
                method: "GET".to_string(),
                url: "http://localhost/two".to_string(),
                assertions: HashMap::from([("test2".to_string(), true)]),
            },
        ]
    }

    fn write_temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let json = serde_json::to_string_pretty(&sample_checks()).unwrap();
        let file = write_temp_json(&json);
        let checks = load_checks(file.path()).unwrap();
        assert_eq!(checks, sample_checks());
    }

    #[test]
    fn test_round_trip_is_identity() {
        let original = sample_checks();
        let json = serde_json::to_string(&original).unwrap();
        let reloaded: Vec<CheckDefinition> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_checks(Path::new("/nonexistent/checks.json")).unwrap_err();
        assert!(err.to_string().contains("could not read"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let file = write_temp_json("{ not json ]");
        let err = load_checks(file.path()).unwrap_err();
        assert!(err.to_string().contains("could not parse"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let file = write_temp_json(
            r#"[{"description": "bad", "method": "GET",
                 "url": "http://localhost/", "match": {"[unclosed": true}}]"#,
        );
        let err = load_checks(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid pattern"));
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let file = write_temp_json(
            r#"[{"description": "bad", "method": "GET",
                 "url": "not a url", "match": {"ok": true}}]"#,
        );
        let err = load_checks(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid url"));
    }

    #[test]
    fn test_duplicate_patterns_keep_the_last_value() {
        // serde_json feeds map entries into the HashMap in document order,
        // so a repeated pattern ends up with the value that appears last
        let file = write_temp_json(
            r#"[{"description": "dup", "method": "GET",
                 "url": "http://localhost/", "match": {"ok": true, "ok": false}}]"#,
        );
        let checks = load_checks(file.path()).unwrap();
        assert_eq!(checks[0].assertions.len(), 1);
        assert_eq!(checks[0].assertions["ok"], false);
    }
}
