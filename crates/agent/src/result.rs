// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result assembly: classify the wait status and build the record.

use chrono::Utc;

use chore_core::record::{ResourceUsage, ResultRecord};
use chore_core::{JobDescriptor, RunOutcome};

use crate::config::host_name;
use crate::runner::Execution;

/// Assemble the structured record for a completed run. The stamp is taken
/// here, after the wait; `clock` was measured around the wait itself.
pub fn build_record(desc: &JobDescriptor, exec: Execution) -> ResultRecord {
    ResultRecord {
        stamp: Utc::now(),
        name: desc.name.clone(),
        host: host_name(),
        login: std::env::var("LOGNAME").unwrap_or_default(),
        config: desc.clone(),
        result: RunOutcome::from_wait_status(exec.status),
        rusage: rusage_counters(&exec.rusage),
        clock: exec.clock,
        output: exec.output,
        output_truncated: exec.output_truncated,
    }
}

fn seconds(tv: &libc::timeval) -> f64 {
    tv.tv_sec as f64 + tv.tv_usec as f64 / 1e6
}

/// Copy the kernel's counters verbatim into the wire struct.
fn rusage_counters(ru: &libc::rusage) -> ResourceUsage {
    ResourceUsage {
        ru_utime: seconds(&ru.ru_utime),
        ru_stime: seconds(&ru.ru_stime),
        ru_maxrss: i64::from(ru.ru_maxrss),
        ru_ixrss: i64::from(ru.ru_ixrss),
        ru_idrss: i64::from(ru.ru_idrss),
        ru_isrss: i64::from(ru.ru_isrss),
        ru_minflt: i64::from(ru.ru_minflt),
        ru_majflt: i64::from(ru.ru_majflt),
        ru_nswap: i64::from(ru.ru_nswap),
        ru_inblock: i64::from(ru.ru_inblock),
        ru_oublock: i64::from(ru.ru_oublock),
        ru_msgsnd: i64::from(ru.ru_msgsnd),
        ru_msgrcv: i64::from(ru.ru_msgrcv),
        ru_nsignals: i64::from(ru.ru_nsignals),
        ru_nvcsw: i64::from(ru.ru_nvcsw),
        ru_nivcsw: i64::from(ru.ru_nivcsw),
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
