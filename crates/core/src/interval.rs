// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable intervals ("15 seconds", "2 hours") and raw second counts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A duration as it appears in configuration: raw seconds or a
/// `"<count> <unit>"` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntervalSpec {
    Seconds(i64),
    Human(String),
}

/// The string matched neither an integer nor the `"<count> <unit>"` form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("bad interval: {0:?}")]
pub struct InvalidInterval(pub String);

const UNITS: &[(&str, i64)] = &[
    ("seconds", 1),
    ("minutes", 60),
    ("hours", 60 * 60),
    ("days", 24 * 60 * 60),
];

/// Parse a configured interval into whole seconds.
///
/// Accepts a raw integer, a string holding an integer, or
/// `"<count> <unit>"` with unit one of seconds/minutes/hours/days.
/// Values are not range-checked; a negative count passes through and is
/// the caller's problem.
pub fn parse_interval(spec: &IntervalSpec) -> Result<i64, InvalidInterval> {
    let s = match spec {
        IntervalSpec::Seconds(n) => return Ok(*n),
        IntervalSpec::Human(s) => s,
    };

    if let Ok(n) = s.trim().parse::<i64>() {
        return Ok(n);
    }

    let mut words = s.split_whitespace();
    let (count, unit) = match (words.next(), words.next(), words.next()) {
        (Some(count), Some(unit), None) => (count, unit),
        _ => return Err(InvalidInterval(s.clone())),
    };
    let count: i64 = count.parse().map_err(|_| InvalidInterval(s.clone()))?;
    let scale = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, scale)| *scale)
        .ok_or_else(|| InvalidInterval(s.clone()))?;

    Ok(count * scale)
}

#[cfg(test)]
#[path = "interval_tests.rs"]
mod tests;
