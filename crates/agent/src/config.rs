// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading and per-job override resolution.
//!
//! The YAML document carries a `commands` table, an ordered `overrides`
//! list, and an optional document-level `default-timeout`. Overrides are
//! applied once, at load time, against a synthesized per-job identity
//! string `"<user>@<host>/<job-name>"`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use chore_core::interval::{parse_interval, IntervalSpec};
use chore_core::{JobDescriptor, LockSpec, MemorySpec};

use crate::error::ConfigurationError;

/// Job entry as written in YAML; timeouts may still be human strings.
/// Unknown keys are tolerated, as in the original schemaless table.
#[derive(Debug, Clone, Deserialize)]
struct RawJob {
    command: String,
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    timeout: Option<IntervalSpec>,
    #[serde(rename = "memory-limit", default)]
    memory_limit: Option<MemorySpec>,
    #[serde(default)]
    lock: Option<LockSpec>,
}

/// Fields an override rule may merge into matching jobs. A set field
/// replaces the job's field wholesale: an `env` override replaces the
/// whole map, not individual keys.
#[derive(Debug, Clone, Default, Deserialize)]
struct JobPatch {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    env: Option<HashMap<String, String>>,
    #[serde(default)]
    timeout: Option<IntervalSpec>,
    #[serde(rename = "memory-limit", default)]
    memory_limit: Option<MemorySpec>,
    #[serde(default)]
    lock: Option<LockSpec>,
}

#[derive(Debug, Clone, Deserialize)]
struct OverrideRule {
    #[serde(rename = "match")]
    pattern: String,
    #[serde(flatten)]
    patch: JobPatch,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    commands: HashMap<String, RawJob>,
    #[serde(default)]
    overrides: Vec<OverrideRule>,
    #[serde(rename = "default-timeout", default)]
    default_timeout: Option<IntervalSpec>,
}

/// The resolved job table: overrides applied, timeouts normalized to whole
/// seconds.
#[derive(Debug, Clone, Default)]
pub struct Config {
    jobs: HashMap<String, JobDescriptor>,
}

impl Config {
    /// Look up a job by name.
    pub fn job(&self, name: &str) -> Result<&JobDescriptor, ConfigurationError> {
        self.jobs.get(name).ok_or_else(|| ConfigurationError::UnknownJob(name.to_string()))
    }

    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Parse configuration text and resolve overrides and timeouts.
pub fn read_configuration(text: &str) -> Result<Config, ConfigurationError> {
    let raw: RawConfig = serde_yaml::from_str(text)?;
    resolve(raw)
}

/// Load and resolve configuration from a file.
pub fn load_configuration(path: &Path) -> Result<Config, ConfigurationError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigurationError::Read { path: path.to_path_buf(), source })?;
    read_configuration(&text)
}

fn resolve(raw: RawConfig) -> Result<Config, ConfigurationError> {
    let RawConfig { commands, overrides, default_timeout } = raw;

    // Compile patterns up front so a bad rule fails the whole load, not
    // just the jobs it happens to match.
    let mut rules = Vec::with_capacity(overrides.len());
    for rule in &overrides {
        let re = Regex::new(&rule.pattern).map_err(|source| ConfigurationError::Pattern {
            pattern: rule.pattern.clone(),
            source,
        })?;
        rules.push((re, &rule.patch));
    }

    let user = std::env::var("USER").unwrap_or_default();
    let host = host_name();

    let mut jobs = HashMap::with_capacity(commands.len());
    for (name, mut job) in commands {
        let identity = format!("{user}@{host}/{name}");
        for (re, patch) in &rules {
            // Prefix-match semantics: the pattern must match at the start
            // of the identity string.
            if re.find(&identity).is_some_and(|m| m.start() == 0) {
                apply_patch(&mut job, patch);
            }
        }

        // The deadline is a whole-seconds alarm, so normalize here.
        let timeout = match job.timeout.as_ref().or(default_timeout.as_ref()) {
            Some(spec) => Some(parse_interval(spec)?),
            None => None,
        };

        jobs.insert(
            name.clone(),
            JobDescriptor {
                name,
                command: job.command,
                env: job.env,
                timeout,
                memory_limit: job.memory_limit,
                lock: job.lock.unwrap_or_default(),
            },
        );
    }

    Ok(Config { jobs })
}

fn apply_patch(job: &mut RawJob, patch: &JobPatch) {
    if let Some(command) = &patch.command {
        job.command = command.clone();
    }
    if let Some(env) = &patch.env {
        job.env = env.clone();
    }
    if let Some(timeout) = &patch.timeout {
        job.timeout = Some(timeout.clone());
    }
    if let Some(memory_limit) = &patch.memory_limit {
        job.memory_limit = Some(memory_limit.clone());
    }
    if let Some(lock) = &patch.lock {
        job.lock = Some(lock.clone());
    }
}

pub(crate) fn host_name() -> String {
    hostname::get().map(|h| h.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
