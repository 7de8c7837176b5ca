// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable memory sizes ("2M", "1.5 G") in binary (1024-based) units.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Ceiling applied when a job does not set `memory-limit` (1 GiB).
pub const DEFAULT_MEMORY_LIMIT: u64 = 1024 * 1024 * 1024;

/// The size string is malformed or carries an unknown unit suffix. No
/// default is substituted for a bad value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("bad memory size: {0:?}")]
pub struct InvalidSize(pub String);

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9.]+)\s*([a-zA-Z]*)\s*$").expect("constant regex pattern is valid")
});

/// Convert a human-readable memory size to bytes.
///
/// A bare number is a byte count; units are case-insensitive with binary
/// multipliers (`"2M"` → 2097152, `"1.5 G"` → 1610612736). Values past
/// what fits a `u64` saturate, which is indistinguishable from unlimited
/// for rlimit purposes.
pub fn parse_size(s: &str) -> Result<u64, InvalidSize> {
    let caps = SIZE_PATTERN.captures(s).ok_or_else(|| InvalidSize(s.to_string()))?;
    let value: f64 = caps[1].parse().map_err(|_| InvalidSize(s.to_string()))?;

    let exponent = match caps[2].to_ascii_uppercase().as_str() {
        "" | "B" => 0,
        "K" | "KB" => 1,
        "M" | "MB" => 2,
        "G" | "GB" => 3,
        "T" | "TB" => 4,
        "P" | "PB" => 5,
        "E" | "EB" => 6,
        "Z" | "ZB" => 7,
        "Y" | "YB" => 8,
        _ => return Err(InvalidSize(s.to_string())),
    };

    Ok((value * 1024f64.powi(exponent)) as u64)
}

#[cfg(test)]
#[path = "memsize_tests.rs"]
mod tests;
