// src/checker/matcher.rs
// =============================================================================
// This module evaluates a check's assertions against a fetched body.
//
// Each assertion is a (regex pattern, expected boolean) pair. The pattern
// is tested for a match anywhere in the body; the outcome is compared to
// the expected value. An assertion passes when the two agree - note that
// "expected: false" means the check passes precisely when the pattern does
// NOT match.
//
// Assertions come out of a HashMap, so the order of the returned results
// is unspecified. Callers (and tests) must treat them as a set.
// =============================================================================

use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::collections::HashMap;

// The outcome of one assertion against one body
//
// Ephemeral: produced by `evaluate`, handed to the reporter, dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionResult {
    /// The regex pattern that was tested
    pub pattern: String,
    /// Whether the pattern was expected to match
    pub expected: bool,
    /// Whether the pattern actually matched
    pub actual: bool,
}

impl AssertionResult {
    /// True when the actual match outcome agrees with the expected one
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

// Evaluates every assertion independently against the body
//
// Returns one result per (pattern, expected) pair. Patterns are validated
// when the check set is loaded, so a compile failure here means the
// definition bypassed `load_checks` - it is still propagated rather than
// swallowed.
pub fn evaluate(body: &[u8], assertions: &HashMap<String, bool>) -> Result<Vec<AssertionResult>> {
    let mut results = Vec::with_capacity(assertions.len());

    for (pattern, &expected) in assertions {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid assertion pattern '{}'", pattern))?;

        results.push(AssertionResult {
            pattern: pattern.clone(),
            expected,
            actual: regex.is_match(body),
        });
    }

    Ok(results)
}
