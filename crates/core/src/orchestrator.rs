//! The run: sync → commit → merge → push, as one explicit state machine.

use tracing::{debug, info, instrument};

use crate::commit::commit_if_needed;
use crate::config::Config;
use crate::errors::{ConfigError, CoreError};
use crate::git::{GitClient, GitRunner};
use crate::merge::merge_if_requested;
use crate::push::push_to_remotes;
use crate::remote::RemoteTarget;
use crate::sync::sync_with_remotes;
use crate::terminal::Terminal;

/// Options chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub force: bool,
}

/// Everything a run needs to know, passed explicitly.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub repo_root: String,
    pub config: Config,
    pub options: RunOptions,
}

/// Where the run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sync,
    Commit,
    Merge,
    Push,
    Done,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub committed: bool,
    /// `(from, into)` when a merge was made.
    pub merged: Option<(String, String)>,
    pub pushed: Vec<String>,
}

pub struct Orchestrator<'a, R, T: ?Sized> {
    git: &'a GitClient<R>,
    term: &'a mut T,
    ctx: RunContext,
}

impl<'a, R, T> Orchestrator<'a, R, T>
where
    R: GitRunner,
    T: Terminal + ?Sized,
{
    pub fn new(git: &'a GitClient<R>, term: &'a mut T, ctx: RunContext) -> Self {
        Self { git, term, ctx }
    }

    /// Drive the run to completion. Sync problems only warn; the first hard
    /// failure in commit, merge or push ends the run.
    #[instrument(skip(self), fields(repo = %self.ctx.repo_root, force = self.ctx.options.force))]
    pub async fn run(&mut self) -> Result<RunReport, CoreError> {
        let targets = self.ctx.config.remote_targets();
        if targets.is_empty() {
            return Err(ConfigError::NoRemotes.into());
        }

        let mut report = RunReport::default();
        let mut stage = Stage::Sync;

        while stage != Stage::Done {
            debug!(?stage, "entering stage");
            stage = self.step(stage, &targets, &mut report).await?;
        }

        info!(pushed = ?report.pushed, "run complete");
        Ok(report)
    }

    async fn step(
        &mut self,
        stage: Stage,
        targets: &[RemoteTarget],
        report: &mut RunReport,
    ) -> Result<Stage, CoreError> {
        let next = match stage {
            Stage::Sync => {
                sync_with_remotes(self.git, &mut *self.term, targets).await;
                Stage::Commit
            }
            Stage::Commit => {
                report.committed = commit_if_needed(self.git, &mut *self.term).await?;
                Stage::Merge
            }
            Stage::Merge => {
                report.merged = merge_if_requested(self.git, &mut *self.term)
                    .await?
                    .map(|m| (m.from, m.into));
                Stage::Push
            }
            Stage::Push => {
                let branch = self.git.current_branch().await?;
                report.pushed = push_to_remotes(
                    self.git,
                    &mut *self.term,
                    targets,
                    &branch,
                    self.ctx.options.force,
                )
                .await?;
                Stage::Done
            }
            Stage::Done => Stage::Done,
        };
        Ok(next)
    }
}
