//! Hosting services and the push targets derived from the configuration.

use std::fmt;

/// A supported hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    GitHub,
    GitLab,
}

impl Host {
    /// All hosts in push order: primary first.
    pub const ALL: [Host; 2] = [Host::GitHub, Host::GitLab];

    /// Name under which the remote is registered in the local repository.
    pub fn remote_name(self) -> &'static str {
        match self {
            Host::GitHub => "github",
            Host::GitLab => "gitlab",
        }
    }

    /// SSH host used in the derived remote URL.
    pub fn ssh_host(self) -> &'static str {
        match self {
            Host::GitHub => "github.com",
            Host::GitLab => "gitlab.com",
        }
    }

    /// Human-readable service name.
    pub fn display_name(self) -> &'static str {
        match self {
            Host::GitHub => "GitHub",
            Host::GitLab => "GitLab",
        }
    }

    /// Where branch protection is managed in the service's web UI.
    pub fn protection_settings_path(self) -> &'static str {
        match self {
            Host::GitHub => "Settings → Branches → Branch protection rules",
            Host::GitLab => "Settings → Repository → Protected branches",
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A remote to register and push to during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: Host,
    pub name: String,
    pub url: String,
}

impl RemoteTarget {
    /// Build the target for `host`, or `None` when either field is blank.
    pub fn for_account(host: Host, username: &str, repo: &str) -> Option<Self> {
        let username = username.trim();
        let repo = repo.trim();
        if username.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self {
            host,
            name: host.remote_name().to_string(),
            url: derive_ssh_url(host, username, repo),
        })
    }
}

/// SSH remote URL: `git@<host>:<username>/<repo>.git`.
pub fn derive_ssh_url(host: Host, username: &str, repo: &str) -> String {
    format!("git@{}:{}/{}.git", host.ssh_host(), username, repo)
}
