// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chore check`: validate configuration and list the resolved job table.

use std::path::Path;

use chore_agent::load_configuration;

use crate::exit_error::ExitError;

pub fn execute(config_path: &Path) -> Result<(), ExitError> {
    let config = load_configuration(config_path).map_err(ExitError::failure)?;

    let mut names: Vec<&str> = config.job_names().collect();
    names.sort_unstable();

    for name in names {
        // job() cannot fail for a name the table just yielded.
        if let Ok(job) = config.job(name) {
            match job.timeout {
                Some(timeout) => println!("{name}: {} (timeout {timeout}s)", job.command),
                None => println!("{name}: {}", job.command),
            }
        }
    }

    Ok(())
}
