//! Optional interactive merge of the current branch into another branch.

use tracing::info;

use crate::errors::{CoreError, WorkflowError};
use crate::git::{GitClient, GitRunner};
use crate::terminal::Terminal;

/// A merge that was carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub from: String,
    pub into: String,
    pub message: String,
}

/// Offer to merge the current branch into another local branch.
///
/// Returns `None` when there is nothing to merge into or the user declines.
/// On success the target branch is left checked out.
pub async fn merge_if_requested<R, T>(
    git: &GitClient<R>,
    term: &mut T,
) -> Result<Option<MergeOutcome>, CoreError>
where
    R: GitRunner,
    T: Terminal + ?Sized,
{
    let branches = git.list_branches().await?;
    let current = git.current_branch().await?;

    let candidates: Vec<String> = branches.into_iter().filter(|b| *b != current).collect();
    if candidates.is_empty() {
        term.say("");
        term.say("No other branches available for merging.");
        return Ok(None);
    }

    term.say("");
    term.say(&format!("Current branch: {}", current));
    if !term
        .confirm("Would you like to merge your changes?")
        .map_err(WorkflowError::from)?
    {
        return Ok(None);
    }

    term.say("");
    term.say("Available branches:");
    for (i, branch) in candidates.iter().enumerate() {
        term.say(&format!("{}: {}", i + 1, branch));
    }

    let answer = term
        .input("Enter the branch name (or number) to merge into")
        .map_err(WorkflowError::from)?;
    let target = resolve_target(&answer, &current, &candidates)?;

    let message = term
        .input("Enter merge commit message (leave blank for default)")
        .map_err(WorkflowError::from)?;
    let message = if message.is_empty() {
        default_merge_message(&current, &target)
    } else {
        message
    };

    let checkout = git.checkout(&target).await?;
    if !checkout.success {
        return Err(WorkflowError::CheckoutFailed {
            branch: target,
            output: checkout.combined(),
        }
        .into());
    }

    let merge = git.merge(&current, &message).await?;
    if !merge.success {
        return Err(WorkflowError::MergeFailed {
            from: current,
            into: target,
            output: merge.combined(),
        }
        .into());
    }

    info!(from = %current, into = %target, "merged branches");
    term.success(&format!("Successfully merged '{}' into '{}'", current, target));

    Ok(Some(MergeOutcome {
        from: current,
        into: target,
        message,
    }))
}

/// Resolve the user's answer to a merge target.
///
/// The answer may be an exact branch name or the 1-based number shown next to
/// it. An exact name wins over a number, so a branch literally called `2`
/// stays reachable.
pub fn resolve_target(
    answer: &str,
    current: &str,
    candidates: &[String],
) -> Result<String, WorkflowError> {
    let answer = answer.trim();
    if answer == current {
        return Err(WorkflowError::MergeIntoSelf);
    }

    if let Some(branch) = candidates.iter().find(|b| *b == answer) {
        return Ok(branch.clone());
    }

    if let Ok(n) = answer.parse::<usize>() {
        if let Some(branch) = n.checked_sub(1).and_then(|i| candidates.get(i)) {
            return Ok(branch.clone());
        }
    }

    Err(WorkflowError::BranchNotFound(answer.to_string()))
}

/// `Merge branch '<from>' into <into>`
pub fn default_merge_message(from: &str, into: &str) -> String {
    format!("Merge branch '{}' into {}", from, into)
}
