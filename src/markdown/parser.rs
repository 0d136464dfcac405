// SPDX-License-Identifier: MIT

//! Checkbox option parser
//!
//! Finds the section under a heading and collects its task list items:
//!
//! ```text
//! #### Test Options
//!
//! - [ ] opt0      -> index 0, unchecked
//! - [x] opt1      -> index 1, checked
//! ```

use super::line::{classify, Fence, Line};
use crate::error::MarkdownError;

/// A checkbox item under the target heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOption {
    pub label: String,
    /// Position among all items in the section, checked or not
    pub index: usize,
    pub checked: bool,
}

/// A checked item, as seen by the option check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOption {
    pub label: String,
    pub index: usize,
}

impl std::fmt::Display for SelectedOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\"", self.index, self.label)
    }
}

/// Parse every checkbox item in the section under `heading`.
///
/// `heading` may be a bare label (`Test Options`) or a heading line
/// (`#### Test Options`). Either way only labels are compared, so the level
/// and closing hashes of the body heading do not matter. The section ends at
/// the next heading of any level.
pub fn parse_options(
    body: &str,
    heading: &str,
) -> Result<Vec<MarkdownOption>, MarkdownError> {
    let target = heading.trim();
    let target_label = match classify(target) {
        Line::Heading { text } => text,
        _ => target,
    };
    let mut open_fence: Option<Fence> = None;
    let mut in_section = false;
    let mut options = Vec::new();

    for raw in body.lines() {
        let line = classify(raw);

        if let Some(open) = open_fence {
            if let Line::Fence(fence) = line {
                if fence.closes(&open) {
                    open_fence = None;
                }
            }
            continue;
        }

        match line {
            Line::Fence(fence) => open_fence = Some(fence),
            Line::Heading { text } => {
                if in_section {
                    return Ok(options);
                }
                in_section = text == target_label;
            }
            Line::Checkbox { checked, label } if in_section => {
                let index = options.len();
                options.push(MarkdownOption {
                    label: label.to_string(),
                    index,
                    checked,
                });
            }
            _ => {}
        }
    }

    if !in_section {
        return Err(MarkdownError::HeadingNotFound(target.to_string()));
    }
    if open_fence.is_some() {
        return Err(MarkdownError::MalformedBody(format!(
            "unterminated code block under '{}'",
            target
        )));
    }
    Ok(options)
}

/// Keep the checked options, preserving their original index
pub fn selected_options(options: &[MarkdownOption]) -> Vec<SelectedOption> {
    options
        .iter()
        .filter(|o| o.checked)
        .map(|o| SelectedOption {
            label: o.label.clone(),
            index: o.index,
        })
        .collect()
}
