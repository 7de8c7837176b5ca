// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-run orchestration: resolve, lock, execute, classify.

use tracing::{debug, info};

use chore_core::record::ResultRecord;
use chore_core::RunOutcome;

use crate::config::Config;
use crate::error::{AgentError, ProcessError};
use crate::lock::{JobLock, LockError};
use crate::result::build_record;
use crate::runner::run_job;

/// Execute one named job under its lock and limits.
///
/// Returns `Ok(None)` only when the job's lock is busy and its policy says
/// to skip the cycle silently because another instance is already running. The
/// lock, once held, is released on every exit path before this returns;
/// the alarm is disarmed inside the runner, before the release.
pub fn run(config: &Config, name: &str) -> Result<Option<ResultRecord>, AgentError> {
    let desc = config.job(name)?;

    let _lock = match JobLock::acquire(name, &desc.lock) {
        Ok(lock) => lock,
        Err(LockError::Timeout) if desc.lock.silent => {
            debug!(job = %name, "silently ignoring lock-file timeout");
            return Ok(None);
        }
        Err(LockError::Timeout) => return Err(AgentError::LockTimeout),
        Err(e) => return Err(e.into()),
    };

    let execution = run_job(desc)?;
    Ok(Some(build_record(desc, execution)))
}

/// Log a completed run: the full record at debug, the headline timing at
/// info.
pub fn log_for(record: &ResultRecord) {
    debug!(job = %record.name, record = ?record, "run result");
    info!(job = %record.name, "took {:.2}s", record.clock);
}

/// Translate a non-clean outcome into the error the invoker escalates.
pub fn raise_for(record: &ResultRecord) -> Result<(), ProcessError> {
    match record.result {
        RunOutcome::Ok => Ok(()),
        RunOutcome::Signaled { signo } => Err(ProcessError::Signaled(signo)),
        RunOutcome::ExitedNonZero { code } => Err(ProcessError::Exited(code)),
        RunOutcome::Unknown { status } => Err(ProcessError::Unknown(status)),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
