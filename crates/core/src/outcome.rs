// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal classification of a child process's wait status.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// How exactly one child process ended, in classification priority order:
/// clean exit, signal death, non-zero exit, then a fallback that should not
/// occur under POSIX semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    Signaled { signo: i32 },
    ExitedNonZero { code: i32 },
    Unknown { status: i32 },
}

impl RunOutcome {
    /// Classify a raw wait status as reported by `wait4(2)`.
    pub fn from_wait_status(status: i32) -> Self {
        if libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == 0 {
            RunOutcome::Ok
        } else if libc::WIFSIGNALED(status) {
            RunOutcome::Signaled { signo: libc::WTERMSIG(status) }
        } else if libc::WIFEXITED(status) {
            RunOutcome::ExitedNonZero { code: libc::WEXITSTATUS(status) }
        } else {
            RunOutcome::Unknown { status }
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, RunOutcome::Ok)
    }
}

// Wire shape consumed by the collector: `{"ok": true}` for a clean exit,
// otherwise `{"ok": false, "reason": ..., <detail>: n}`.
impl Serialize for RunOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            RunOutcome::Ok => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ok", &true)?;
                map.end()
            }
            RunOutcome::Signaled { signo } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("reason", "signal")?;
                map.serialize_entry("signo", &signo)?;
                map.end()
            }
            RunOutcome::ExitedNonZero { code } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("reason", "exit")?;
                map.serialize_entry("code", &code)?;
                map.end()
            }
            RunOutcome::Unknown { status } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("reason", "unknown")?;
                map.serialize_entry("status", &status)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
