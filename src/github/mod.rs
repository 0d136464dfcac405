// SPDX-License-Identifier: MIT

//! GitHub pull request metadata
//!
//! This module provides the [`PullRequestApi`] trait used by the filter checks
//! and its implementations:
//! - [client] - REST client over `reqwest`
//! - [cache] - per-run memoisation of pull request info

pub mod cache;
pub mod client;

pub use cache::MetadataCache;
pub use client::GithubClient;

use crate::error::FilterError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

/// Records returned per page by the files endpoint
pub const FILES_PER_PAGE: u64 = 100;

/// Identifies the pull request a run is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestRef {
    /// `owner/repo`
    pub repository_id: String,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(repository_id: impl Into<String>, number: u64) -> Self {
        Self {
            repository_id: repository_id.into(),
            number,
        }
    }
}

/// The parts of `GET /repos/{repo}/pulls/{n}` the filter reads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PullRequestMetadata {
    /// PR description; GitHub sends `null` for an empty description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub changed_files: u64,
}

/// One entry of `GET /repos/{repo}/pulls/{n}/files`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFileRecord {
    pub filename: String,
}

impl ChangedFileRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Number of pages needed to list `total` changed files
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(FILES_PER_PAGE)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of pull request metadata
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Fetch the PR description and changed file count
    async fn fetch_pull_request_info(
        &self,
        pr: &PullRequestRef,
    ) -> Result<PullRequestMetadata, FilterError>;

    /// Fetch the full changed file list, `total` being the count reported by
    /// [`fetch_pull_request_info`](Self::fetch_pull_request_info)
    async fn fetch_changed_files(
        &self,
        pr: &PullRequestRef,
        total: u64,
    ) -> Result<Vec<ChangedFileRecord>, FilterError>;
}
