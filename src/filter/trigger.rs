// SPDX-License-Identifier: MIT

//! Trigger gate: the filter only applies to GitHub pull request builds

use crate::pipeline::RunContext;

pub const EXPECTED_PROVIDER: &str = "GitHub";
pub const EXPECTED_REASON: &str = "PullRequest";

/// True when the run was triggered by a pull request on GitHub
pub fn is_triggered_by_github_pr(context: &RunContext) -> bool {
    log::info!("[Basic Check]");

    let provider = context.provider.as_deref().unwrap_or_default();
    log::info!("Repo Provider: {}", provider);
    if provider != EXPECTED_PROVIDER {
        log::info!("Invalid repo provider {}, run following tests.", provider);
        return false;
    }

    let reason = context.reason.as_deref().unwrap_or_default();
    log::info!("Build Reason: {}", reason);
    if reason != EXPECTED_REASON {
        log::info!("Not triggered by pull request, run following tests.");
        return false;
    }

    true
}
