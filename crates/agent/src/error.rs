// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use chore_core::interval::InvalidInterval;

use crate::lock::LockError;
use crate::runner::RunnerError;

/// The run completed but the child's outcome was not clean. Carries the
/// human-readable cause the invoker logs before deciding its exit status.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    #[error("terminated by signal {0}")]
    Signaled(i32),
    #[error("non-zero exit: {0}")]
    Exited(i32),
    #[error("died mysteriously: {0}")]
    Unknown(i32),
}

/// Configuration loading and resolution failures; all fatal to the
/// invocation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid override pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Interval(#[from] InvalidInterval),
    #[error("no such job: {0}")]
    UnknownJob(String),
}

/// Everything a single `run` can surface to the invoker.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The job's lock was busy past its bounded wait and the job's policy
    /// is not a silent skip.
    #[error("lock-file timeout")]
    LockTimeout,
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}
