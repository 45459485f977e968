//! Persistent configuration for git-multi-push.
//!
//! The record is a flat JSON object holding a username and repository name
//! for each hosting service. It lives in the per-user platform configuration
//! directory and is only written by the setup flow.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::remote::{Host, RemoteTarget};

/// Directory name under the platform configuration directory.
pub const APP_DIR_NAME: &str = "git-multi-push";

/// File name of the configuration record.
pub const CONFIG_FILE_NAME: &str = "config.json";

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Usernames and repository names for the two hosting services.
///
/// An empty username or repository disables pushing to that host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub account or organisation owning the primary repository.
    #[serde(default)]
    pub github_username: String,

    /// Primary repository name on GitHub.
    #[serde(default)]
    pub github_repo: String,

    /// GitLab account or group owning the secondary repository.
    #[serde(default)]
    pub gitlab_username: String,

    /// Secondary repository name on GitLab.
    #[serde(default)]
    pub gitlab_repo: String,
}

impl Config {
    /// Default location: `<config dir>/git-multi-push/config.json`.
    ///
    /// Resolves to `%APPDATA%` on Windows, `~/.config` on Linux and
    /// `~/Library/Application Support` on macOS.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the record from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::NotConfigured {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read(path)?;
        let config: Config =
            serde_json::from_slice(&contents).map_err(|e| ConfigError::Invalid {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Write the record to `path`, creating parent directories and replacing
    /// any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;

        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Username and repository configured for `host`.
    pub fn account(&self, host: Host) -> (&str, &str) {
        match host {
            Host::GitHub => (&self.github_username, &self.github_repo),
            Host::GitLab => (&self.gitlab_username, &self.gitlab_repo),
        }
    }

    /// Push targets in a fixed order, GitHub before GitLab.
    ///
    /// Hosts with an empty username or repository produce no target.
    pub fn remote_targets(&self) -> Vec<RemoteTarget> {
        Host::ALL
            .iter()
            .filter_map(|&host| {
                let (username, repo) = self.account(host);
                RemoteTarget::for_account(host, username, repo)
            })
            .collect()
    }

    /// Whether at least one host is fully configured.
    pub fn has_any_remote(&self) -> bool {
        !self.remote_targets().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reduce a repository URL or plain name to the bare repository name.
///
/// Accepts `my-repo`, `my-repo.git`, `https://github.com/user/my-repo(.git)`
/// and `git@gitlab.com:group/my-repo.git`.
pub fn extract_repo_name(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let is_url = without_suffix.contains("://") || without_suffix.starts_with("git@");
    if !is_url {
        return without_suffix.to_string();
    }

    without_suffix
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(without_suffix)
        .to_string()
}
