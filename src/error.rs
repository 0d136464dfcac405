// SPDX-License-Identifier: MIT

//! Typed error handling for pipeline-filter-rs
//!
//! Remote and configuration failures are fatal to the run and surface as
//! [`FilterError`]. Problems with the PR description surface as
//! [`MarkdownError`] and are absorbed by the option check.

use thiserror::Error;

/// Top-level error type for a filter run
#[derive(Debug, Error)]
pub enum FilterError {
    /// Transport, HTTP status, or JSON failure talking to the host
    #[error("HTTP error when getting {url}: {reason}")]
    RemoteFetch { url: String, reason: String },

    /// Missing or unusable pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operator-supplied glob that cannot be compiled
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Base URL could not be joined with a request path
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// Writing the output variable failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while locating the option section of a PR body
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkdownError {
    /// No heading line carries the configured label
    #[error("Heading '{0}' not found in pull request body")]
    HeadingNotFound(String),

    /// The section under the heading cannot be delimited
    #[error("Malformed pull request body: {0}")]
    MalformedBody(String),
}

impl FilterError {
    /// Create a remote fetch error
    pub fn remote(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::RemoteFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
