// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chore run`: execute jobs in order and escalate the first failure.

use std::path::Path;

use tracing::{debug, error};

use chore_agent::{load_configuration, log_for, raise_for, report, run, AgentError};

use crate::exit_error::ExitError;

pub fn execute(config_path: &Path, jobs: &[String]) -> Result<(), ExitError> {
    let config = load_configuration(config_path).map_err(ExitError::failure)?;

    for name in jobs {
        debug!(job = %name, "starting");
        let outcome = run(&config, name).and_then(|skipped_or_record| {
            if let Some(record) = &skipped_or_record {
                log_for(record);
                report(record);
                raise_for(record).map_err(AgentError::from)?;
            }
            Ok(())
        });

        match outcome {
            Ok(()) => debug!(job = %name, "done"),
            Err(e) => {
                error!(job = %name, "{e}");
                return Err(ExitError::new(1, format!("[{name}] {e}")));
            }
        }
    }

    Ok(())
}
