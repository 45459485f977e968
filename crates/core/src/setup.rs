//! Interactive creation of the configuration record.

use std::path::Path;

use tracing::info;

use crate::config::{extract_repo_name, Config};
use crate::errors::{ConfigError, CoreError, WorkflowError};
use crate::terminal::Terminal;

/// Ask for both accounts, save the record to `path` and return it.
///
/// GitHub fields are required. GitLab fields are optional; a GitLab
/// repository without a username is discarded.
pub fn run_setup<T>(term: &mut T, path: &Path) -> Result<Config, CoreError>
where
    T: Terminal + ?Sized,
{
    term.say("GitHub (primary remote)");
    let github_username = required(term, "GitHub username", "github_username")?;
    let github_repo = extract_repo_name(&required(
        term,
        "GitHub repository (name or URL)",
        "github_repo",
    )?);

    term.say("");
    term.say("GitLab (secondary remote, leave blank to skip)");
    let gitlab_username = ask(term, "GitLab username")?;
    let gitlab_repo = if gitlab_username.is_empty() {
        String::new()
    } else {
        extract_repo_name(&ask(term, "GitLab repository (name or URL)")?)
    };

    let config = Config {
        github_username,
        github_repo,
        gitlab_username,
        gitlab_repo,
    };
    config.save(path)?;
    info!(path = %path.display(), remotes = config.remote_targets().len(), "setup complete");
    term.success(&format!("Configuration saved to {}", path.display()));

    Ok(config)
}

fn ask<T: Terminal + ?Sized>(term: &mut T, prompt: &str) -> Result<String, CoreError> {
    Ok(term.input(prompt).map_err(WorkflowError::from)?)
}

fn required<T: Terminal + ?Sized>(
    term: &mut T,
    prompt: &str,
    field: &str,
) -> Result<String, CoreError> {
    let value = ask(term, prompt)?;
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            detail: "must not be empty".into(),
        }
        .into());
    }
    Ok(value)
}
