// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusion-lock specs: a held lock makes a second invocation skip or fail.

use crate::prelude::Project;
use fs2::FileExt;

fn hold_lock(project: &Project, name: &str) -> std::fs::File {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(project.file(name))
        .unwrap();
    file.lock_exclusive().unwrap();
    file
}

#[test]
fn held_lock_fails_the_run_when_not_silent() {
    let project = Project::with_config(
        r#"
commands:
  guarded:
    command: "true"
    lock: { path: "guarded.lock", timeout: 0 }
"#,
    );
    let _held = hold_lock(&project, "guarded.lock");

    let result = project.chore(&["run", "guarded"]).fails();
    assert_eq!(result.code(), 1);
    assert!(result.stderr().contains("lock-file timeout"), "stderr: {}", result.stderr());
}

#[test]
fn held_lock_skips_silently_when_the_policy_says_so() {
    let project = Project::with_config(
        r#"
commands:
  guarded:
    command: "touch ran.marker"
    lock: { path: "guarded.lock", timeout: 0, silent: true }
"#,
    );
    let _held = hold_lock(&project, "guarded.lock");

    project.chore(&["run", "guarded"]).passes();
    assert!(!project.file("ran.marker").exists(), "skipped run must not execute the command");
}

#[test]
fn lock_is_free_again_after_a_completed_run() {
    let project = Project::with_config(
        r#"
commands:
  guarded:
    command: "true"
    lock: { path: "guarded.lock", timeout: 0 }
"#,
    );

    project.chore(&["run", "guarded"]).passes();
    project.chore(&["run", "guarded"]).passes();
}

#[test]
fn bounded_wait_rides_out_a_short_holder() {
    let project = Project::with_config(
        r#"
commands:
  guarded:
    command: "true"
    lock: { path: "guarded.lock", timeout: 5 }
"#,
    );

    let held = hold_lock(&project, "guarded.lock");
    let handle = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(500));
        drop(held);
    });

    project.chore(&["run", "guarded"]).passes();
    handle.join().unwrap();
}
