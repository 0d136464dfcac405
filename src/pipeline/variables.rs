// SPDX-License-Identifier: MIT

//! Pipeline variable resolution
//!
//! Azure Pipelines exposes variables to scripts as environment variables whose
//! names are the dotted variable name upper-cased with `.` replaced by `_`
//! (`filter.prbody.heading` becomes `FILTER_PRBODY_HEADING`). Lookups go
//! through [`PipelineVariables`] so tests can resolve from an in-memory map.

use crate::error::FilterError;
use crate::github::PullRequestRef;
use std::collections::HashMap;

pub const GITHUB_PAT: &str = "filter.githubPAT";
pub const MARKDOWN_HEADING: &str = "filter.prbody.heading";
pub const MARKDOWN_OPTION_INDEX: &str = "filter.prbody.optionIndex";
pub const MARKDOWN_OPTION_VALUE: &str = "filter.prbody.optionValue";
pub const FILE_CHANGE_GLOBS: &str = "filter.modified.globs";

pub const REPOSITORY_ID: &str = "build.repository.id";
pub const PULL_REQUEST_NUMBER: &str = "system.pullRequest.pullRequestNumber";
pub const REPOSITORY_PROVIDER: &str = "build.repository.provider";
pub const BUILD_REASON: &str = "build.reason";

/// Translate a dotted pipeline variable name into its environment key
pub fn pipeline_key(name: &str) -> String {
    name.replace('.', "_").to_uppercase()
}

/// Snapshot of the variables visible to one run, keyed by environment key
#[derive(Debug, Clone, Default)]
pub struct PipelineVariables {
    values: HashMap<String, String>,
}

impl PipelineVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment. Non-unicode entries are dropped.
    pub fn from_env() -> Self {
        let values = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { values }
    }

    /// Set a variable by its dotted pipeline name
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(pipeline_key(name), value.into());
        self
    }

    /// Look up a variable by its dotted pipeline name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&pipeline_key(name)).map(String::as_str)
    }

    /// Like [`get`](Self::get) but treats the empty string as unset
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl From<HashMap<String, String>> for PipelineVariables {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Operator settings for the filter checks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    pub github_pat: Option<String>,
    pub heading: Option<String>,
    pub option_index: Option<i64>,
    pub option_value: Option<String>,
    pub globs: Option<String>,
}

impl FilterConfig {
    pub fn resolve(vars: &PipelineVariables) -> Self {
        Self {
            github_pat: vars.get(GITHUB_PAT).map(str::to_string),
            heading: vars.get_non_empty(MARKDOWN_HEADING),
            option_index: vars.get(MARKDOWN_OPTION_INDEX).and_then(parse_option_index),
            option_value: vars.get_non_empty(MARKDOWN_OPTION_VALUE),
            globs: vars.get_non_empty(FILE_CHANGE_GLOBS),
        }
    }
}

/// Facts about the build that triggered this run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub repository_id: Option<String>,
    pub pull_request_number: Option<String>,
    pub provider: Option<String>,
    pub reason: Option<String>,
}

impl RunContext {
    pub fn resolve(vars: &PipelineVariables) -> Self {
        Self {
            repository_id: vars.get_non_empty(REPOSITORY_ID),
            pull_request_number: vars.get_non_empty(PULL_REQUEST_NUMBER),
            provider: vars.get(REPOSITORY_PROVIDER).map(str::to_string),
            reason: vars.get(BUILD_REASON).map(str::to_string),
        }
    }

    /// Identify the pull request to query. Only needed once a remote check runs.
    pub fn pull_request_ref(&self) -> Result<PullRequestRef, FilterError> {
        let repository_id = self.repository_id.clone().ok_or_else(|| {
            FilterError::config(format!("{} is not set", pipeline_key(REPOSITORY_ID)))
        })?;
        let raw_number = self.pull_request_number.as_deref().ok_or_else(|| {
            FilterError::config(format!("{} is not set", pipeline_key(PULL_REQUEST_NUMBER)))
        })?;
        let number = raw_number.trim().parse::<u64>().map_err(|_| {
            FilterError::config(format!("Invalid pull request number: {}", raw_number))
        })?;

        Ok(PullRequestRef::new(repository_id, number))
    }
}

/// Parse an option index the lenient way pipeline authors expect: leading
/// whitespace and a sign are accepted and trailing junk after the digits is
/// ignored (`"1"`, `" 1"`, `"1st"` all give 1). No digits yields `None`.
pub fn parse_option_index(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
