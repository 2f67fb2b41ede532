//! Integration test common infrastructure.
//!
//! Runs the built `cozmonaut` binary with a scratch config directory and
//! captures what it prints and how it exits.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of one binary invocation.
pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Scratch directory holding config files for one test.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Write `content` to `name` inside the scratch directory.
    pub fn config(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Run the binary with `args` and no inherited config variable.
pub fn run(args: &[&str]) -> anyhow::Result<RunResult> {
    run_with_env(args, &[])
}

/// Run the binary with `args` and extra environment variables.
pub fn run_with_env(args: &[&str], env: &[(&str, &Path)]) -> anyhow::Result<RunResult> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cozmonaut"));
    cmd.args(args)
        .env_remove("COZMONAUT_CONFIG")
        .env("RUST_LOG", "warn");
    for (key, value) in env {
        cmd.env(key, value);
    }
    Ok(cmd.output()?.into())
}
