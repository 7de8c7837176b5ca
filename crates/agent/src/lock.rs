// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed exclusion lock, one file per job.
//!
//! Advisory flock semantics: at most one holder per path across every
//! invoker on the host. Acquisition has a bounded wait; release is tied to
//! the guard's lifetime so every exit path gives the lock back.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;
use tracing::{debug, warn};

use chore_core::LockSpec;

const RETRY_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum LockError {
    /// Another invocation holds the lock and the bounded wait expired.
    #[error("lock-file timeout")]
    Timeout,
    #[error("lock file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An acquired job lock. Dropping the guard releases the flock; the file
/// itself stays behind, since unlinking would race a concurrent acquirer
/// opening the same path.
#[derive(Debug)]
pub struct JobLock {
    file: File,
    path: PathBuf,
}

impl JobLock {
    /// Acquire the lock for `name`, waiting up to `spec.timeout` seconds.
    /// A zero timeout makes exactly one attempt.
    pub fn acquire(name: &str, spec: &LockSpec) -> Result<Self, LockError> {
        let path = spec.path.clone().unwrap_or_else(|| default_lock_path(name));

        // Open without truncating so an active holder's PID is never wiped.
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Io { path: path.clone(), source })?;

        let deadline = Instant::now() + Duration::from_secs(spec.timeout);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => break,
                Err(e) if is_contended(&e) => {
                    if Instant::now() >= deadline {
                        return Err(LockError::Timeout);
                    }
                    std::thread::sleep(RETRY_INTERVAL);
                }
                Err(source) => return Err(LockError::Io { path: path.clone(), source }),
            }
        }

        // Record the holder now that the flock is ours.
        file.set_len(0)
            .and_then(|()| writeln!(file, "{}", std::process::id()))
            .map_err(|source| LockError::Io { path: path.clone(), source })?;

        debug!(path = %path.display(), "acquired job lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for JobLock {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "failed to release job lock");
        }
    }
}

fn is_contended(e: &std::io::Error) -> bool {
    e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

fn default_lock_path(name: &str) -> PathBuf {
    dirs::home_dir().unwrap_or_else(std::env::temp_dir).join(format!("{name}.lock"))
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
