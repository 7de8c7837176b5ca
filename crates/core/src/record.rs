// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The structured result record handed to the invoker after every run.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::job::JobDescriptor;
use crate::outcome::RunOutcome;

/// Captured output is truncated at 128 KiB.
pub const MAX_OUTPUT: u64 = 128 * 1024;

/// Kernel accounting for a terminated child, copied verbatim from the
/// rusage report. Times are seconds; the rest are raw counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUsage {
    pub ru_utime: f64,
    pub ru_stime: f64,
    pub ru_maxrss: i64,
    pub ru_ixrss: i64,
    pub ru_idrss: i64,
    pub ru_isrss: i64,
    pub ru_minflt: i64,
    pub ru_majflt: i64,
    pub ru_nswap: i64,
    pub ru_inblock: i64,
    pub ru_oublock: i64,
    pub ru_msgsnd: i64,
    pub ru_msgrcv: i64,
    pub ru_nsignals: i64,
    pub ru_nvcsw: i64,
    pub ru_nivcsw: i64,
}

/// One run's result: outcome, accounting, timing, and captured output,
/// with the resolved descriptor embedded for audit. Created once per run
/// and immutable afterwards; the agent keeps no copy.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    #[serde(serialize_with = "stamp_seconds")]
    pub stamp: DateTime<Utc>,
    pub name: String,
    pub host: String,
    pub login: String,
    pub config: JobDescriptor,
    pub result: RunOutcome,
    pub rusage: ResourceUsage,
    pub clock: f64,
    pub output: String,
    pub output_truncated: bool,
}

// ISO-8601 at second precision with a literal `Z`: the collector's contract.
fn stamp_seconds<S: Serializer>(stamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&stamp.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
