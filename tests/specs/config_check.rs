// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration specs through the binary: check output, override effects,
//! default timeouts, parse failures.

use crate::prelude::Project;

#[test]
fn check_lists_the_resolved_job_table() {
    let project = Project::with_config(
        r#"
default-timeout: "1 hours"
commands:
  beta: { command: "false" }
  alpha: { command: "true", timeout: 30 }
"#,
    );

    let result = project.chore(&["check"]).passes();
    let stdout = result.stdout();
    assert!(stdout.contains("alpha: true (timeout 30s)"), "stdout: {stdout}");
    assert!(stdout.contains("beta: false (timeout 3600s)"), "stdout: {stdout}");

    // Sorted listing: alpha before beta.
    let alpha = stdout.find("alpha").unwrap();
    let beta = stdout.find("beta").unwrap();
    assert!(alpha < beta);
}

#[test]
fn check_rejects_unparseable_yaml() {
    let project = Project::with_config("commands: [not, a, map]");
    let result = project.chore(&["check"]).fails();
    assert_eq!(result.code(), 1);
}

#[test]
fn check_rejects_a_bad_override_pattern() {
    let project = Project::with_config(
        r#"
overrides:
  - match: "("
commands:
  t: { command: "true" }
"#,
    );
    let result = project.chore(&["check"]).fails();
    assert!(result.stderr().contains("invalid override pattern"), "stderr: {}", result.stderr());
}

#[test]
fn override_rewrites_the_command_end_to_end() {
    let project = Project::with_config(
        r#"
overrides:
  - match: ".*/switched"
    command: "touch override.ran"
commands:
  switched:
    command: "touch original.ran"
    lock: { path: "switched.lock" }
"#,
    );

    project.chore(&["run", "switched"]).passes();
    assert!(project.file("override.ran").exists(), "override command must replace the original");
    assert!(!project.file("original.ran").exists());
}

#[test]
fn missing_configuration_file_is_fatal() {
    let project = Project::with_config("commands: {}");
    let result = project.chore(&["run", "-c", "nonexistent.yaml", "anything"]).fails();
    assert_eq!(result.code(), 1);
    assert!(result.stderr().contains("cannot read configuration"), "stderr: {}", result.stderr());
}
