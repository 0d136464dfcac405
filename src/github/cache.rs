// SPDX-License-Identifier: MIT

//! Per-run memoisation of pull request info
//!
//! Both the change-set check and the option check read the pull request
//! info. A [`MetadataCache`] lives for exactly one decision run and is handed
//! to the combinator, so nothing is shared between runs.

use super::{PullRequestApi, PullRequestMetadata, PullRequestRef};
use crate::error::FilterError;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct MetadataCache {
    enabled: bool,
    entries: RwLock<HashMap<PullRequestRef, PullRequestMetadata>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self {
            enabled: true,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never stores, so every check fetches for itself
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached info for `pr`, fetching it through `api` on a miss.
    /// Failed fetches are not cached.
    pub async fn pull_request_info(
        &self,
        api: &dyn PullRequestApi,
        pr: &PullRequestRef,
    ) -> Result<PullRequestMetadata, FilterError> {
        if self.enabled {
            if let Some(hit) = self.entries.read().await.get(pr) {
                log::debug!("Using cached info for PR #{}", pr.number);
                return Ok(hit.clone());
            }
        }

        let info = api.fetch_pull_request_info(pr).await?;

        if self.enabled {
            self.entries.write().await.insert(pr.clone(), info.clone());
        }
        Ok(info)
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}
