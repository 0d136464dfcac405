// SPDX-License-Identifier: MIT

//! Change-set check: does the PR touch any path the operator cares about

use crate::error::FilterError;
use crate::github::{ChangedFileRecord, MetadataCache, PullRequestApi};
use crate::pipeline::{FilterConfig, RunContext};
use globset::{GlobBuilder, GlobMatcher};

/// Diffs this large are treated as relevant without listing them
pub const LARGE_CHANGE_THRESHOLD: u64 = 3000;

#[derive(Debug, Clone)]
struct Pattern {
    negated: bool,
    matcher: GlobMatcher,
}

/// Ordered glob patterns parsed from a comma-separated list.
///
/// `*` stays within one path segment and `**` spans directories. A pattern
/// starting with `!` removes paths matched by earlier patterns.
#[derive(Debug, Clone)]
pub struct GlobPatternSet {
    patterns: Vec<Pattern>,
}

impl GlobPatternSet {
    pub fn parse(globs: &str) -> Result<Self, FilterError> {
        let patterns = globs
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Paths selected by the pattern list, in the order they were selected
    pub fn matching<'a, I>(&self, paths: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let mut selected: Vec<&'a str> = Vec::new();
        for pattern in &self.patterns {
            if pattern.negated {
                selected.retain(|path| !pattern.matcher.is_match(path));
                continue;
            }
            for path in paths.clone() {
                if pattern.matcher.is_match(path) && !selected.contains(&path) {
                    selected.push(path);
                }
            }
        }
        selected
    }
}

fn compile(raw: &str) -> Result<Pattern, FilterError> {
    let (negated, glob) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let matcher = GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|source| FilterError::InvalidGlob {
            pattern: raw.to_string(),
            source,
        })?
        .compile_matcher();
    Ok(Pattern { negated, matcher })
}

/// Changed files selected by `patterns`; non-empty means the change set matches
pub fn matches_change_set<'a>(
    files: &'a [ChangedFileRecord],
    patterns: &GlobPatternSet,
) -> Vec<&'a str> {
    patterns.matching(files.iter().map(|f| f.filename.as_str()))
}

/// Run the change-set check. `Ok(true)` forces the following stages to run.
pub async fn file_change_check(
    api: &dyn PullRequestApi,
    cache: &MetadataCache,
    context: &RunContext,
    config: &FilterConfig,
) -> Result<bool, FilterError> {
    log::info!("[File Changes]");
    let Some(globs) = config.globs.as_deref() else {
        log::info!("Glob pattern not provided, skip");
        return Ok(false);
    };
    let patterns = GlobPatternSet::parse(globs)?;
    log::info!("Glob patterns: {}", globs);
    if patterns.is_empty() {
        log::info!("Glob pattern list is empty, skip");
        return Ok(false);
    }

    let pr = context.pull_request_ref()?;
    let info = cache.pull_request_info(api, &pr).await?;
    log::info!("Changed files: {}", info.changed_files);
    if info.changed_files >= LARGE_CHANGE_THRESHOLD {
        log::info!(
            "Changed files >= {}, run following tests",
            LARGE_CHANGE_THRESHOLD
        );
        return Ok(true);
    }

    let files = api.fetch_changed_files(&pr, info.changed_files).await?;
    let matched = matches_change_set(&files, &patterns);
    if matched.is_empty() {
        log::info!("No changes match provided patterns");
        return Ok(false);
    }

    log::info!("Following changes match provided patterns:");
    for path in &matched {
        log::info!("{}", path);
    }
    log::info!("Run following tests");
    Ok(true)
}
