// SPDX-License-Identifier: MIT

//! Skip-or-run gate for pull request pipelines.
//!
//! Looks at a GitHub pull request's changed files and description and
//! publishes a `skipsubsequent` output variable for later pipeline stages.

pub mod error;
pub mod filter;
pub mod github;
pub mod markdown;
pub mod pipeline;
