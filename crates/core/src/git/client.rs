//! Typed git operations on top of a [`GitRunner`].

use tracing::{debug, info, instrument};

use super::runner::{GitOutput, GitRunner, SystemGit};
use crate::errors::GitError;

/// High-level client issuing `git` commands in the current repository.
#[derive(Debug, Clone)]
pub struct GitClient<R = SystemGit> {
    runner: R,
}

impl GitClient<SystemGit> {
    /// Client for the repository containing the process's working directory.
    pub fn system() -> Self {
        Self::new(SystemGit::new())
    }
}

impl<R: GitRunner> GitClient<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fail with [`GitError::BinaryNotFound`] when `git` cannot be started.
    pub async fn ensure_installed(&self) -> Result<(), GitError> {
        let out = self.runner.run(&["--version"]).await?;
        if !out.success {
            return Err(GitError::BinaryNotFound(out.combined().trim().to_string()));
        }
        debug!(version = %out.stdout.trim(), "git is available");
        Ok(())
    }

    /// Absolute path of the repository root.
    pub async fn toplevel(&self) -> Result<String, GitError> {
        let out = self.runner.run(&["rev-parse", "--show-toplevel"]).await?;
        if !out.success {
            return Err(GitError::NotARepository);
        }
        Ok(out.stdout.trim().to_string())
    }

    /// Name of the checked-out branch.
    pub async fn current_branch(&self) -> Result<String, GitError> {
        let out = self.checked(&["branch", "--show-current"]).await?;
        let branch = out.stdout.trim();
        if branch.is_empty() {
            return Err(GitError::DetachedHead);
        }
        Ok(branch.to_string())
    }

    /// Local branch names, including the current one.
    pub async fn list_branches(&self) -> Result<Vec<String>, GitError> {
        let out = self
            .checked(&["branch", "--format=%(refname:short)"])
            .await?;
        Ok(parse_branch_list(&out.stdout))
    }

    /// Remote-tracking branches in `remote/branch` form.
    pub async fn list_remote_branches(&self) -> Result<Vec<String>, GitError> {
        let out = self.checked(&["branch", "-r"]).await?;
        Ok(parse_remote_branch_list(&out.stdout))
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<(), GitError> {
        self.checked(&["fetch", "--all"]).await?;
        debug!("fetch completed");
        Ok(())
    }

    /// Pull `branch` from `remote`, allowing unrelated histories.
    #[instrument(skip(self))]
    pub async fn pull(&self, remote: &str, branch: &str) -> Result<String, GitError> {
        let out = self
            .checked(&["pull", remote, branch, "--allow-unrelated-histories"])
            .await?;
        Ok(out.combined())
    }

    /// Whether the working tree has staged, unstaged or untracked changes.
    pub async fn has_uncommitted_changes(&self) -> Result<bool, GitError> {
        let out = self.checked(&["status", "--porcelain"]).await?;
        Ok(!out.stdout.trim().is_empty())
    }

    /// Human-readable `git status` text.
    pub async fn status(&self) -> Result<String, GitError> {
        let out = self.checked(&["status"]).await?;
        Ok(out.stdout)
    }

    /// Stage every change in the working tree and commit it.
    #[instrument(skip(self, message))]
    pub async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.checked(&["add", "-A"]).await?;
        self.checked(&["commit", "-m", message]).await?;
        info!("created commit");
        Ok(())
    }

    /// Check out `branch`, returning the raw output so callers can report it.
    pub async fn checkout(&self, branch: &str) -> Result<GitOutput, GitError> {
        self.runner.run(&["checkout", branch]).await
    }

    /// Merge `from` into the checked-out branch with `message`.
    pub async fn merge(&self, from: &str, message: &str) -> Result<GitOutput, GitError> {
        self.runner.run(&["merge", from, "-m", message]).await
    }

    /// URL of the remote `name`, or `None` when it is not registered.
    pub async fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        let out = self.runner.run(&["remote", "get-url", name]).await?;
        if !out.success {
            return Ok(None);
        }
        Ok(Some(out.stdout.trim().to_string()))
    }

    pub async fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.checked(&["remote", "add", name, url]).await?;
        Ok(())
    }

    pub async fn set_remote_url(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.checked(&["remote", "set-url", name, url]).await?;
        Ok(())
    }

    /// Register `name` at `url`, updating it if it already exists.
    pub async fn ensure_remote(&self, name: &str, url: &str) -> Result<RemoteChange, GitError> {
        match self.remote_url(name).await? {
            Some(existing) if existing == url => Ok(RemoteChange::Unchanged),
            Some(existing) => {
                self.set_remote_url(name, url).await?;
                info!(remote = name, from = %existing, to = url, "updated remote URL");
                Ok(RemoteChange::Updated)
            }
            None => {
                self.add_remote(name, url).await?;
                info!(remote = name, url, "added remote");
                Ok(RemoteChange::Added)
            }
        }
    }

    /// Push `branch` to `remote`. The raw output is returned for
    /// classification by the caller.
    #[instrument(skip(self))]
    pub async fn push(&self, remote: &str, branch: &str, force: bool) -> Result<GitOutput, GitError> {
        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.push(remote);
        args.push(branch);
        self.runner.run(&args).await
    }

    /// Run a command and turn a non-zero exit into [`GitError::CommandFailed`].
    async fn checked(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let out = self.runner.run(args).await?;
        if !out.success {
            let output = out.combined().trim().to_string();
            debug!(exit_code = out.exit_code, %output, "git {} failed", args.join(" "));
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                exit_code: out.exit_code,
                output,
            });
        }
        Ok(out)
    }
}

/// What [`GitClient::ensure_remote`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteChange {
    Added,
    Updated,
    Unchanged,
}

/// Branch names cannot contain spaces, so a leading `* ` (current) or `+ `
/// (checked out in another worktree) is always a marker.
fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix("+ "))
                .unwrap_or(line)
                .trim()
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_remote_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGit;

    #[test]
    fn test_parse_branch_list_strips_marker() {
        let out = "  develop\n* main\n  feature/x\n\n";
        assert_eq!(parse_branch_list(out), vec!["develop", "main", "feature/x"]);
    }

    #[test]
    fn test_parse_branch_list_strips_worktree_marker() {
        let out = "+ feature\n* main\n  release+1\n";
        assert_eq!(parse_branch_list(out), vec!["feature", "main", "release+1"]);
    }

    #[tokio::test]
    async fn test_list_branches_asks_for_short_names() {
        let client = GitClient::new(ScriptedGit::new().on(&["branch"], GitOutput::ok("feature\nmain\n")));
        assert_eq!(client.list_branches().await.unwrap(), vec!["feature", "main"]);
        assert!(client
            .runner()
            .was_called(&["branch", "--format=%(refname:short)"]));
    }

    #[test]
    fn test_parse_remote_branch_list_drops_aliases() {
        let out = "  github/HEAD -> github/main\n  github/main\n  gitlab/main\n";
        assert_eq!(parse_remote_branch_list(out), vec!["github/main", "gitlab/main"]);
    }

    #[tokio::test]
    async fn test_toplevel_outside_repo() {
        let git = ScriptedGit::new().on(
            &["rev-parse", "--show-toplevel"],
            GitOutput::failed("fatal: not a git repository"),
        );
        let client = GitClient::new(git);
        assert!(matches!(client.toplevel().await, Err(GitError::NotARepository)));
    }

    #[tokio::test]
    async fn test_current_branch_detached() {
        let git = ScriptedGit::new().on(&["branch", "--show-current"], GitOutput::ok("\n"));
        let client = GitClient::new(git);
        assert!(matches!(client.current_branch().await, Err(GitError::DetachedHead)));
    }

    #[tokio::test]
    async fn test_has_uncommitted_changes() {
        let dirty = ScriptedGit::new().on(&["status", "--porcelain"], GitOutput::ok("?? new.txt\n"));
        assert!(GitClient::new(dirty).has_uncommitted_changes().await.unwrap());

        let clean = ScriptedGit::new().on(&["status", "--porcelain"], GitOutput::ok(""));
        assert!(!GitClient::new(clean).has_uncommitted_changes().await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_stages_everything_first() {
        let client = GitClient::new(ScriptedGit::new());
        client.commit("wip").await.unwrap();
        assert_eq!(
            client.runner().calls(),
            vec![
                vec!["add".to_string(), "-A".to_string()],
                vec!["commit".to_string(), "-m".to_string(), "wip".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_ensure_remote_adds_when_missing() {
        let git = ScriptedGit::new().on(
            &["remote", "get-url", "github"],
            GitOutput::failed("error: No such remote 'github'"),
        );
        let client = GitClient::new(git);

        let change = client
            .ensure_remote("github", "git@github.com:u/r.git")
            .await
            .unwrap();
        assert_eq!(change, RemoteChange::Added);
        assert!(client
            .runner()
            .was_called(&["remote", "add", "github", "git@github.com:u/r.git"]));
    }

    #[tokio::test]
    async fn test_ensure_remote_updates_changed_url() {
        let git = ScriptedGit::new().on(
            &["remote", "get-url", "gitlab"],
            GitOutput::ok("git@gitlab.com:old/r.git\n"),
        );
        let client = GitClient::new(git);

        let change = client
            .ensure_remote("gitlab", "git@gitlab.com:new/r.git")
            .await
            .unwrap();
        assert_eq!(change, RemoteChange::Updated);
        assert!(client
            .runner()
            .was_called(&["remote", "set-url", "gitlab", "git@gitlab.com:new/r.git"]));
    }

    #[tokio::test]
    async fn test_ensure_remote_is_idempotent() {
        let git = ScriptedGit::new().on(
            &["remote", "get-url", "github"],
            GitOutput::ok("git@github.com:u/r.git\n"),
        );
        let client = GitClient::new(git);

        let change = client
            .ensure_remote("github", "git@github.com:u/r.git")
            .await
            .unwrap();
        assert_eq!(change, RemoteChange::Unchanged);
        assert!(!client.runner().was_called(&["remote", "add"]));
        assert!(!client.runner().was_called(&["remote", "set-url"]));
    }

    #[tokio::test]
    async fn test_push_force_flag_placement() {
        let client = GitClient::new(ScriptedGit::new());
        client.push("github", "main", true).await.unwrap();
        client.push("gitlab", "main", false).await.unwrap();
        assert_eq!(
            client.runner().calls(),
            vec![
                vec!["push", "--force", "github", "main"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
                vec!["push", "gitlab", "main"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ]
        );
    }

    #[tokio::test]
    async fn test_checked_failure_carries_output() {
        let git = ScriptedGit::new().on(&["fetch", "--all"], GitOutput::failed("could not resolve host"));
        let err = GitClient::new(git).fetch_all().await.unwrap_err();
        match err {
            GitError::CommandFailed { command, output, .. } => {
                assert_eq!(command, "fetch --all");
                assert_eq!(output, "could not resolve host");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
