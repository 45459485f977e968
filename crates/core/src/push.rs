//! Registering the configured remotes and pushing to each in turn.

use tracing::{info, warn};

use crate::errors::{CoreError, PushError};
use crate::git::{GitClient, GitRunner};
use crate::remediation::{classify, RemediationContext};
use crate::remote::RemoteTarget;
use crate::terminal::Terminal;

/// Push `branch` to every target in order, stopping at the first failure.
///
/// Remotes pushed before a failure stay pushed. Returns the names of the
/// remotes that received the branch.
pub async fn push_to_remotes<R, T>(
    git: &GitClient<R>,
    term: &mut T,
    targets: &[RemoteTarget],
    branch: &str,
    force: bool,
) -> Result<Vec<String>, CoreError>
where
    R: GitRunner,
    T: Terminal + ?Sized,
{
    let mut pushed = Vec::with_capacity(targets.len());

    for target in targets {
        git.ensure_remote(&target.name, &target.url)
            .await
            .map_err(|e| PushError::RemoteSetup {
                remote: target.name.clone(),
                detail: e.to_string(),
            })?;

        let verb = if force { "Force pushing" } else { "Pushing" };
        term.begin_activity(&format!("{} {} to {}", verb, branch, target.name));
        let result = git.push(&target.name, branch, force).await;
        term.end_activity();
        let out = result?;

        if !out.success {
            let output = out.combined();
            let ctx = RemediationContext {
                remote: &target.name,
                host: target.host,
                branch,
            };
            let hint = classify(&output, &ctx);
            warn!(remote = %target.name, classified = hint.is_some(), "push failed");
            return Err(PushError::Rejected {
                remote: target.name.clone(),
                output,
                hint,
            }
            .into());
        }

        info!(remote = %target.name, %branch, force, "pushed");
        term.success(&format!("Successfully pushed to {}", target.name));
        pushed.push(target.name.clone());
    }

    Ok(pushed)
}
