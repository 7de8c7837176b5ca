// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job descriptors: a named shell command plus its run policy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Memory ceiling as configured: an exact byte count or a human-readable
/// size string. Integer values are used verbatim, with no string parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemorySpec {
    Bytes(u64),
    Human(String),
}

/// Exclusion-lock policy for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSpec {
    /// Lock file path; defaults to `<home>/<job-name>.lock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Seconds to wait for a busy lock; 0 fails fast.
    #[serde(default)]
    pub timeout: u64,
    /// Swallow a lock timeout and skip the cycle instead of failing.
    #[serde(default)]
    pub silent: bool,
}

impl LockSpec {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A named, shell-executed command with its run policy.
///
/// `name` is injected from the `commands` map key and never serialized;
/// `timeout` holds normalized whole seconds once configuration resolution
/// has run. The serialized form is the audit snapshot embedded in each
/// result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    #[serde(skip)]
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(rename = "memory-limit", default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<MemorySpec>,
    #[serde(default, skip_serializing_if = "LockSpec::is_default")]
    pub lock: LockSpec,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
