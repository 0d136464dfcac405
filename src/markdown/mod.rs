// SPDX-License-Identifier: MIT

//! Markdown option parsing for PR descriptions
//!
//! This module provides:
//! - `classify` - tags a line as heading, checkbox, fence or other
//! - `parse_options` - collects the checkbox items under a named heading

pub mod line;
mod parser;

pub use line::{classify, Line};
pub use parser::{parse_options, selected_options, MarkdownOption, SelectedOption};
