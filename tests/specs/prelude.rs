// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for end-to-end specs.

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project directory holding a `chore.yaml` and any files the
/// jobs under test create. Lock paths in fixtures are relative and resolve
/// against this directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn with_config(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chore.yaml"), config).unwrap();
        Self { dir }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// A chore invocation rooted in this project, with reporting and log
    /// overrides stripped from the environment.
    pub fn chore(&self, args: &[&str]) -> ChoreCmd {
        let mut cmd = Command::cargo_bin("chore").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env_remove("CHORE_API_URL");
        cmd.env_remove("CHORE_LOG");
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        ChoreCmd { cmd }
    }
}

pub struct ChoreCmd {
    cmd: Command,
}

impl ChoreCmd {
    /// Run and require a zero exit.
    pub fn passes(mut self) -> RunResult {
        let result = RunResult::from(self.cmd.output().unwrap());
        assert!(
            result.code() == 0,
            "expected success, got exit {}\nstderr:\n{}",
            result.code(),
            result.stderr()
        );
        result
    }

    /// Run and require a non-zero exit.
    pub fn fails(mut self) -> RunResult {
        let result = RunResult::from(self.cmd.output().unwrap());
        assert!(result.code() != 0, "expected failure, got success\nstdout:\n{}", result.stdout());
        result
    }
}

pub struct RunResult {
    output: Output,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self { output }
    }
}

impl RunResult {
    pub fn code(&self) -> i32 {
        self.output.status.code().unwrap_or(-1)
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}
