// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output capture specs, driven through the agent library so the record
//! itself is visible: truncation at the cap, lenient decoding, merging.

use chore_agent::{read_configuration, run};
use chore_core::{RunOutcome, MAX_OUTPUT};
use serial_test::serial;
use tempfile::TempDir;

fn config_in(dir: &TempDir, command: &str) -> chore_agent::Config {
    // Double-quoted YAML so fixture commands may hold single quotes.
    let quoted = command.replace('\\', "\\\\").replace('"', "\\\"");
    read_configuration(&format!(
        r#"
commands:
  job:
    command: "{quoted}"
    lock: {{ path: "{}" }}
"#,
        dir.path().join("job.lock").display()
    ))
    .unwrap()
}

#[test]
#[serial]
fn output_past_the_cap_truncates_exactly_to_the_cap() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "head -c 200000 /dev/zero");

    let record = run(&config, "job").unwrap().unwrap();
    assert_eq!(record.output.len(), MAX_OUTPUT as usize);
    assert!(record.output_truncated);
}

#[test]
#[serial]
fn output_at_the_cap_or_below_is_returned_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "printf hello");

    let record = run(&config, "job").unwrap().unwrap();
    assert_eq!(record.output, "hello");
    assert!(!record.output_truncated);
}

#[test]
#[serial]
fn stdout_and_stderr_interleave_in_one_stream() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "echo one; echo two >&2");

    let record = run(&config, "job").unwrap().unwrap();
    assert_eq!(record.output, "one\ntwo\n");
}

#[test]
#[serial]
fn invalid_bytes_decode_leniently() {
    let dir = tempfile::tempdir().unwrap();
    // 0xff is not valid UTF-8 anywhere; the capture must survive it.
    let config = config_in(&dir, r#"printf 'a\377b'"#);

    let record = run(&config, "job").unwrap().unwrap();
    assert_eq!(record.result, RunOutcome::Ok);
    assert_eq!(record.output, "a\u{fffd}b");
}

#[test]
#[serial]
fn wire_record_matches_the_collector_contract() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "true");

    let record = run(&config, "job").unwrap().unwrap();
    let wire = serde_json::to_value(&record).unwrap();

    assert_eq!(wire["result"], serde_json::json!({ "ok": true }));
    assert_eq!(wire["name"], "job");
    assert_eq!(wire["rusage"].as_object().unwrap().len(), 16);

    let stamp = wire["stamp"].as_str().unwrap();
    assert_eq!(stamp.len(), "2026-01-01T00:00:00Z".len());
    assert!(stamp.ends_with('Z'));
    assert!(stamp.contains('T'));
}
