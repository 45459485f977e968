//! Turning known push failures into actionable guidance.
//!
//! Rules are evaluated in table order and the first pattern found in the
//! push output wins. Output matching no rule is surfaced unchanged.

use crate::remote::Host;

/// What a remediation hint may refer to.
#[derive(Debug, Clone, Copy)]
pub struct RemediationContext<'a> {
    pub remote: &'a str,
    pub host: Host,
    pub branch: &'a str,
}

/// A substring of `git push` output and the hint it triggers.
pub struct Remediation {
    pub pattern: &'static str,
    pub hint: fn(&RemediationContext<'_>) -> String,
}

/// Known failures, in evaluation order.
pub const REMEDIATIONS: &[Remediation] = &[
    Remediation {
        pattern: "protected branch",
        hint: protected_branch_hint,
    },
    Remediation {
        pattern: "fetch first",
        hint: fetch_first_hint,
    },
];

/// Hint for the first rule matching `output`, if any.
pub fn classify(output: &str, ctx: &RemediationContext<'_>) -> Option<String> {
    REMEDIATIONS
        .iter()
        .find(|rule| output.contains(rule.pattern))
        .map(|rule| (rule.hint)(ctx))
}

fn protected_branch_hint(ctx: &RemediationContext<'_>) -> String {
    format!(
        "{host} protected branch detected on remote '{remote}'. You have several options:

1. Use a development branch instead:
   git checkout -b development
   git-multi-push

2. Unprotect the branch on {host}:
   - Go to the repository → {settings}
   - Unprotect '{branch}' or allow pushes for your role

3. Use {host}'s web interface to merge the changes",
        host = ctx.host,
        remote = ctx.remote,
        branch = ctx.branch,
        settings = ctx.host.protection_settings_path(),
    )
}

fn fetch_first_hint(ctx: &RemediationContext<'_>) -> String {
    format!(
        "Remote '{remote}' has commits you do not have locally. To resolve this, you can either:

1. Pull and merge the changes (recommended):
   git pull {remote} {branch} --allow-unrelated-histories
   git-multi-push

2. Force push (overwrites the remote history, use with caution):
   git-multi-push --force",
        remote = ctx.remote,
        branch = ctx.branch,
    )
}
