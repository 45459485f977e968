//! Interactive commit of pending changes before pushing.

use tracing::info;

use crate::errors::{CoreError, WorkflowError};
use crate::git::{GitClient, GitRunner};
use crate::terminal::Terminal;

/// Commit uncommitted changes after asking the user.
///
/// Returns whether a commit was made. Declining is an error: pushing with a
/// dirty tree would leave the changes behind.
pub async fn commit_if_needed<R, T>(git: &GitClient<R>, term: &mut T) -> Result<bool, CoreError>
where
    R: GitRunner,
    T: Terminal + ?Sized,
{
    if !git.has_uncommitted_changes().await? {
        term.say("No changes to commit");
        return Ok(false);
    }

    let status = git.status().await?;
    term.say("");
    term.say("Current git status:");
    term.say(status.trim_end());

    if !term
        .confirm("Would you like to commit these changes?")
        .map_err(WorkflowError::from)?
    {
        return Err(WorkflowError::CommitDeclined.into());
    }

    let message = term
        .input("Enter commit message")
        .map_err(WorkflowError::from)?;
    if message.is_empty() {
        return Err(WorkflowError::EmptyCommitMessage.into());
    }

    git.commit(&message).await?;
    info!("committed pending changes");
    term.success("Changes committed successfully");
    Ok(true)
}
