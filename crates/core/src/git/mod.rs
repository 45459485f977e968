//! Git operations for git-multi-push, all performed through the `git` CLI.

pub mod client;
pub mod runner;

pub use client::{GitClient, RemoteChange};
pub use runner::{GitOutput, GitRunner, SystemGit};
