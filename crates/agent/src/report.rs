// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result delivery to the collector endpoint.
//!
//! Delivery is strictly best-effort: the job outcome is already decided by
//! the time this runs, and nothing here may mask or replace it.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use chore_core::record::ResultRecord;

/// Environment variable naming the collector's base URL.
pub const API_URL_VAR: &str = "CHORE_API_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
enum DeliveryError {
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

/// POST the record to the configured collector. An unset or empty
/// `CHORE_API_URL` is a no-op; delivery failures are logged and swallowed.
pub fn report(record: &ResultRecord) {
    let base = match std::env::var(API_URL_VAR) {
        Ok(v) if !v.trim_end_matches('/').is_empty() => v.trim_end_matches('/').to_string(),
        _ => return,
    };
    let url = format!("{base}/1.0/report");

    match deliver(&url, record) {
        Ok(status) if status.is_success() => {
            debug!(job = %record.name, %url, "job result delivered");
        }
        Ok(status) => {
            warn!(job = %record.name, %url, %status, "collector rejected job result");
        }
        Err(e) => {
            error!(job = %record.name, %url, error = %e, "error delivering job result");
        }
    }
}

fn deliver(url: &str, record: &ResultRecord) -> Result<reqwest::StatusCode, DeliveryError> {
    let body = serde_json::to_vec(record)?;
    let client = reqwest::blocking::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(body)
        .send()?;
    Ok(response.status())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
