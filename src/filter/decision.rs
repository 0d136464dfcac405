// SPDX-License-Identifier: MIT

//! Decision combinator
//!
//! Runs the checks in a fixed order and stops at the first one that decides
//! the outcome:
//!
//! ```text
//! trigger gate --fail--> Bypassed
//!      |
//! change-set check --match--> ForceRun(ChangedFiles)
//!      |
//! option check --selected--> ForceRun(SelectedOption)
//!      |
//!    Skip
//! ```

use super::changes::file_change_check;
use super::options::pr_body_check;
use super::trigger::is_triggered_by_github_pr;
use crate::error::FilterError;
use crate::github::{MetadataCache, PullRequestApi};
use crate::pipeline::{FilterConfig, RunContext, VariablePublisher};
use std::sync::Arc;

/// Check that forced the following stages to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedBy {
    ChangedFiles,
    SelectedOption,
}

/// Terminal state of a decision run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not a GitHub pull request build; the filter does not apply
    Bypassed,
    ForceRun(ForcedBy),
    Skip,
}

impl Verdict {
    /// Value of the published skip signal
    pub fn skip(&self) -> bool {
        matches!(self, Verdict::Skip)
    }
}

/// Composes the trigger gate, change-set check and option check for one run
pub struct DecisionCombinator {
    api: Arc<dyn PullRequestApi>,
    cache: MetadataCache,
    config: FilterConfig,
    context: RunContext,
}

impl DecisionCombinator {
    /// `cache` is scoped to this combinator; create one per run
    pub fn new(
        api: Arc<dyn PullRequestApi>,
        cache: MetadataCache,
        config: FilterConfig,
        context: RunContext,
    ) -> Self {
        Self {
            api,
            cache,
            config,
            context,
        }
    }

    /// Evaluate the checks without publishing anything
    pub async fn evaluate(&self) -> Result<Verdict, FilterError> {
        if !is_triggered_by_github_pr(&self.context) {
            return Ok(Verdict::Bypassed);
        }

        let api = self.api.as_ref();
        if file_change_check(api, &self.cache, &self.context, &self.config).await? {
            return Ok(Verdict::ForceRun(ForcedBy::ChangedFiles));
        }
        if pr_body_check(api, &self.cache, &self.context, &self.config).await? {
            return Ok(Verdict::ForceRun(ForcedBy::SelectedOption));
        }

        Ok(Verdict::Skip)
    }

    /// Evaluate and publish the skip signal as `variable`. Nothing is
    /// published when a check fails.
    pub async fn run(
        &self,
        publisher: &dyn VariablePublisher,
        variable: &str,
    ) -> Result<Verdict, FilterError> {
        let verdict = self.evaluate().await?;
        log::debug!("Verdict: {:?}", verdict);
        publisher.publish(variable, verdict.skip())?;
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_skip_verdict_skips() {
        assert!(Verdict::Skip.skip());
        assert!(!Verdict::Bypassed.skip());
        assert!(!Verdict::ForceRun(ForcedBy::ChangedFiles).skip());
        assert!(!Verdict::ForceRun(ForcedBy::SelectedOption).skip());
    }
}
