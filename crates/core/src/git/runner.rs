//! Running the `git` executable as a subprocess.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::errors::GitError;

/// Captured result of a single `git` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// A successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given stderr and exit code 1.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: 1,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (true, _) => self.stderr.clone(),
            (false, true) => self.stdout.clone(),
            (false, false) => format!("{}{}", self.stdout, self.stderr),
        }
    }
}

/// Executes `git` with a list of arguments.
///
/// A non-zero exit status is reported through [`GitOutput::success`], not as
/// an error; only failing to start the process is an error.
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(&self, args: &[&str]) -> Result<GitOutput, GitError>;
}

/// Runs the `git` found on `$PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    /// Run in the process's current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(cmd = ?format!("git {}", args.join(" ")), "running git command");
        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::BinaryNotFound(e.to_string())
            } else {
                GitError::IoError(e)
            }
        })?;

        Ok(GitOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
