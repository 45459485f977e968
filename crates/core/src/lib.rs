//! git-multi-push core library.
//!
//! Pushes a local git working tree to GitHub and GitLab in one run, with an
//! optional interactive commit and merge beforehand. All version-control work
//! is delegated to the `git` executable.

pub mod commit;
pub mod config;
pub mod errors;
pub mod git;
pub mod merge;
pub mod orchestrator;
pub mod push;
pub mod remediation;
pub mod remote;
pub mod setup;
pub mod sync;
pub mod terminal;

#[cfg(test)]
mod test_support;

// Re-exports for convenience.
pub use config::Config;
pub use errors::CoreError;
pub use git::GitClient;
pub use orchestrator::{Orchestrator, RunContext, RunOptions, RunReport};
pub use terminal::Terminal;
