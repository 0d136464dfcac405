// SPDX-License-Identifier: MIT

//! GitHub REST client

use super::{
    page_count, ChangedFileRecord, PullRequestApi, PullRequestMetadata, PullRequestRef,
    FILES_PER_PAGE,
};
use crate::error::FilterError;
use crate::filter::LARGE_CHANGE_THRESHOLD;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Value the pipeline substitutes when the PAT secret is not defined
pub const PAT_PLACEHOLDER: &str = "$(filter.githubPAT)";

/// Build the `Authorization` header for a personal access token.
///
/// Returns `None` when the token is absent, empty, or still the unresolved
/// pipeline placeholder, in which case requests go out unauthenticated.
pub fn basic_authorization(token: Option<&str>) -> Option<String> {
    let token = token.filter(|t| !t.is_empty())?;
    if token.eq_ignore_ascii_case(PAT_PLACEHOLDER) {
        return None;
    }
    Some(format!("Basic {}", STANDARD.encode(format!(":{}", token))))
}

/// Pull request client for the GitHub REST API
pub struct GithubClient {
    client: Client,
    base_url: Url,
    authorization: Option<String>,
}

impl GithubClient {
    /// Create a client for `base_url` (e.g. [`DEFAULT_API_URL`] or a GitHub
    /// Enterprise `https://host/api/v3`).
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, FilterError> {
        let client = Client::builder()
            .user_agent(concat!("pipeline-filter-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FilterError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            authorization: basic_authorization(token),
        })
    }

    /// Whether requests carry credentials
    pub fn is_authenticated(&self) -> bool {
        self.authorization.is_some()
    }

    /// `{base}/repos/{owner}/{repo}/pulls/{number}` plus extra path segments
    fn pull_url(&self, pr: &PullRequestRef, extra: &[&str]) -> Result<Url, FilterError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FilterError::config(format!("API URL cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().push("repos");
            segments.extend(pr.repository_id.split('/').filter(|s| !s.is_empty()));
            segments.push("pulls").push(&pr.number.to_string());
            segments.extend(extra);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FilterError> {
        log::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(auth) = &self.authorization {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FilterError::remote(url.as_str(), e))?
            .error_for_status()
            .map_err(|e| FilterError::remote(url.as_str(), e))?;

        response
            .json::<T>()
            .await
            .map_err(|e| FilterError::remote(url.as_str(), e))
    }
}

#[async_trait]
impl PullRequestApi for GithubClient {
    async fn fetch_pull_request_info(
        &self,
        pr: &PullRequestRef,
    ) -> Result<PullRequestMetadata, FilterError> {
        let url = self.pull_url(pr, &[])?;
        self.get_json(url).await
    }

    async fn fetch_changed_files(
        &self,
        pr: &PullRequestRef,
        total: u64,
    ) -> Result<Vec<ChangedFileRecord>, FilterError> {
        let pages = page_count(total);
        let mut files = Vec::with_capacity(total.min(LARGE_CHANGE_THRESHOLD) as usize);

        // GitHub pages are 1-indexed
        for page in 1..=pages {
            let mut url = self.pull_url(pr, &["files"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &FILES_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<ChangedFileRecord> = self.get_json(url).await?;
            log::debug!("Page {}/{}: {} files", page, pages, batch.len());
            files.extend(batch);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_encodes_empty_username() {
        // base64(":secret")
        assert_eq!(
            basic_authorization(Some("secret")).as_deref(),
            Some("Basic OnNlY3JldA==")
        );
    }

    #[test]
    fn test_basic_authorization_skips_missing_token() {
        assert_eq!(basic_authorization(None), None);
        assert_eq!(basic_authorization(Some("")), None);
    }

    #[test]
    fn test_basic_authorization_skips_placeholder() {
        assert_eq!(basic_authorization(Some("$(filter.githubPAT)")), None);
        assert_eq!(basic_authorization(Some("$(FILTER.GITHUBPAT)")), None);
    }

    #[test]
    fn test_pull_url() {
        let client = GithubClient::new(DEFAULT_API_URL, None).unwrap();
        let pr = PullRequestRef::new("microsoft/azure-pipeline-filter", 3);
        assert_eq!(
            client.pull_url(&pr, &[]).unwrap().as_str(),
            "https://api.github.com/repos/microsoft/azure-pipeline-filter/pulls/3"
        );
        assert_eq!(
            client.pull_url(&pr, &["files"]).unwrap().as_str(),
            "https://api.github.com/repos/microsoft/azure-pipeline-filter/pulls/3/files"
        );
    }

    #[test]
    fn test_pull_url_keeps_enterprise_prefix() {
        let client = GithubClient::new("https://ghe.example.com/api/v3/", None).unwrap();
        let pr = PullRequestRef::new("org/repo", 42);
        assert_eq!(
            client.pull_url(&pr, &[]).unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/org/repo/pulls/42"
        );
    }

    #[test]
    fn test_client_authentication_flag() {
        assert!(GithubClient::new(DEFAULT_API_URL, Some("tok"))
            .unwrap()
            .is_authenticated());
        assert!(!GithubClient::new(DEFAULT_API_URL, Some(""))
            .unwrap()
            .is_authenticated());
    }
}
