//! Best-effort convergence with the configured remotes before pushing.
//!
//! Nothing in here fails the run: every problem is logged as a warning.

use tracing::{info, warn};

use crate::git::{GitClient, GitRunner};
use crate::remote::RemoteTarget;
use crate::terminal::Terminal;

/// What happened to each remote during synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub fetched: bool,
    pub pulled: Vec<String>,
    /// Remotes that do not have the current branch yet.
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Fetch every remote, then pull the current branch from each target that
/// already carries it.
pub async fn sync_with_remotes<R, T>(
    git: &GitClient<R>,
    term: &mut T,
    targets: &[RemoteTarget],
) -> SyncSummary
where
    R: GitRunner,
    T: Terminal + ?Sized,
{
    let mut summary = SyncSummary::default();

    term.say("Synchronizing with remotes...");
    term.begin_activity("Fetching all remotes");
    let fetch = git.fetch_all().await;
    term.end_activity();
    match fetch {
        Ok(()) => summary.fetched = true,
        Err(e) => warn!(error = %e, "failed to fetch remotes, continuing"),
    }

    let branch = match git.current_branch().await {
        Ok(branch) => branch,
        Err(e) => {
            warn!(error = %e, "could not determine current branch, skipping pull");
            return summary;
        }
    };

    let remote_branches = match git.list_remote_branches().await {
        Ok(branches) => branches,
        Err(e) => {
            warn!(error = %e, "could not list remote branches");
            Vec::new()
        }
    };

    for target in targets {
        let tracking = format!("{}/{}", target.name, branch);
        if !remote_branches.iter().any(|b| *b == tracking) {
            info!(remote = %target.name, %branch, "branch not on remote yet, skipping pull");
            summary.skipped.push(target.name.clone());
            continue;
        }

        term.begin_activity(&format!("Pulling {} from {}", branch, target.name));
        let pulled = git.pull(&target.name, &branch).await;
        term.end_activity();

        match pulled {
            Ok(output) => {
                info!(remote = %target.name, output = %output.trim(), "synced with remote");
                summary.pulled.push(target.name.clone());
            }
            Err(e) => {
                warn!(remote = %target.name, error = %e, "could not pull from remote");
                summary.failed.push(target.name.clone());
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitOutput;
    use crate::remote::Host;
    use crate::test_support::{ScriptedGit, ScriptedTerminal};

    fn targets() -> Vec<RemoteTarget> {
        vec![
            RemoteTarget::for_account(Host::GitHub, "u", "r").unwrap(),
            RemoteTarget::for_account(Host::GitLab, "u", "r").unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_pulls_remotes_carrying_branch() {
        let git = ScriptedGit::new()
            .on(&["branch", "--show-current"], GitOutput::ok("main\n"))
            .on(&["branch", "-r"], GitOutput::ok("  github/main\n  gitlab/main\n"));
        let client = GitClient::new(git);
        let mut term = ScriptedTerminal::new();

        let summary = sync_with_remotes(&client, &mut term, &targets()).await;

        assert!(summary.fetched);
        assert_eq!(summary.pulled, vec!["github", "gitlab"]);
        assert!(client.runner().was_called(&[
            "pull",
            "gitlab",
            "main",
            "--allow-unrelated-histories"
        ]));
    }

    #[tokio::test]
    async fn test_skips_remote_without_branch() {
        let git = ScriptedGit::new()
            .on(&["branch", "--show-current"], GitOutput::ok("main\n"))
            .on(&["branch", "-r"], GitOutput::ok("  github/main\n"));
        let client = GitClient::new(git);
        let mut term = ScriptedTerminal::new();

        let summary = sync_with_remotes(&client, &mut term, &targets()).await;

        assert_eq!(summary.pulled, vec!["github"]);
        assert_eq!(summary.skipped, vec!["gitlab"]);
        assert!(!client.runner().was_called(&["pull", "gitlab"]));
    }

    #[tokio::test]
    async fn test_failures_are_soft() {
        let git = ScriptedGit::new()
            .on(&["fetch", "--all"], GitOutput::failed("could not read from remote"))
            .on(&["branch", "--show-current"], GitOutput::ok("main\n"))
            .on(&["branch", "-r"], GitOutput::ok("  github/main\n  gitlab/main\n"))
            .on(&["pull", "github"], GitOutput::failed("refusing to merge"));
        let client = GitClient::new(git);
        let mut term = ScriptedTerminal::new();

        let summary = sync_with_remotes(&client, &mut term, &targets()).await;

        assert!(!summary.fetched);
        assert_eq!(summary.failed, vec!["github"]);
        assert_eq!(summary.pulled, vec!["gitlab"]);
    }
}
