// SPDX-License-Identifier: MIT

//! Pipeline integration - variable lookup and output publishing

pub mod output;
pub mod variables;

pub use output::{RecordingPublisher, StdoutPublisher, VariablePublisher, SKIP_VARIABLE};
pub use variables::{FilterConfig, PipelineVariables, RunContext};
