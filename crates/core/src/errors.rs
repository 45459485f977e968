//! Error types for the git-multi-push core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Push(#[from] PushError),
}

impl CoreError {
    /// Whether this error comes from the environment (git missing, not in a
    /// repository) rather than from the run itself.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            CoreError::Git(GitError::BinaryNotFound(_)) | CoreError::Git(GitError::NotARepository)
        )
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading, saving and building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file exists yet.
    #[error("configuration not found at '{}', run with --setup first", .path.display())]
    NotConfigured { path: PathBuf },

    /// The configuration file exists but is not a valid record.
    #[error("invalid configuration at '{}' ({detail}), run with --setup to recreate it", .path.display())]
    Invalid { path: PathBuf, detail: String },

    /// Neither hosting service has a username and repository set.
    #[error("no remotes are configured, run with --setup first")]
    NoRemotes,

    /// A value entered during setup is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// No platform configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    /// Serializing the record failed.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic I/O error reading or writing the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Git errors
// ---------------------------------------------------------------------------

/// Errors from invoking the `git` executable.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary was not found on `$PATH`.
    #[error("git is not installed: {0}")]
    BinaryNotFound(String),

    /// The working directory is not inside a git repository.
    #[error("not in a git repository")]
    NotARepository,

    /// HEAD does not point at a branch.
    #[error("HEAD is detached, check out a branch before pushing")]
    DetachedHead,

    /// A `git` command exited with a non-zero status.
    #[error("git {command} failed (exit {exit_code}): {output}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        output: String,
    },

    /// Generic I/O wrapper for spawning the process.
    #[error("git I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Interactive workflow errors
// ---------------------------------------------------------------------------

/// Errors from the interactive commit and merge steps.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The user declined to commit pending changes.
    #[error("changes must be committed before pushing. Operation cancelled")]
    CommitDeclined,

    #[error("commit message cannot be empty")]
    EmptyCommitMessage,

    #[error("cannot merge a branch into itself")]
    MergeIntoSelf,

    /// The merge target is not one of the offered branches.
    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("failed to checkout {branch}: {output}")]
    CheckoutFailed { branch: String, output: String },

    #[error("failed to merge {from} into {into}: {output}")]
    MergeFailed {
        from: String,
        into: String,
        output: String,
    },

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Push errors
// ---------------------------------------------------------------------------

/// Errors from registering remotes and pushing to them.
#[derive(Debug, Error)]
pub enum PushError {
    /// Adding or updating the remote URL failed.
    #[error("failed to configure remote {remote}: {detail}")]
    RemoteSetup { remote: String, detail: String },

    /// The push itself was rejected.
    #[error("failed to push to {remote}: {}{}", .output.trim_end(), hint_suffix(.hint))]
    Rejected {
        remote: String,
        output: String,
        hint: Option<String>,
    },
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!("\n\n{}", h),
        None => String::new(),
    }
}
