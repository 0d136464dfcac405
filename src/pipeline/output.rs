// SPDX-License-Identifier: MIT

//! Publishing the skip signal back to the pipeline
//!
//! Azure Pipelines picks up output variables from `##vso[...]` logging
//! commands written to stdout.

use std::io::Write;
use std::sync::Mutex;

/// Default name of the published output variable
pub const SKIP_VARIABLE: &str = "skipsubsequent";

/// Format the logging command that sets an output variable
pub fn set_variable_command(name: &str, value: bool) -> String {
    format!(
        "##vso[task.setvariable variable={};isoutput=true]{}",
        name, value
    )
}

/// Destination for the run's single output variable
pub trait VariablePublisher: Send + Sync {
    fn publish(&self, name: &str, value: bool) -> std::io::Result<()>;
}

/// Writes the logging command to stdout
#[derive(Debug, Default)]
pub struct StdoutPublisher;

impl VariablePublisher for StdoutPublisher {
    fn publish(&self, name: &str, value: bool) -> std::io::Result<()> {
        log::info!("Set variable: {} -> {}", name, value);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", set_variable_command(name, value))?;
        stdout.flush()
    }
}

/// Keeps published variables in memory
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, bool)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order
    pub fn published(&self) -> Vec<(String, bool)> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl VariablePublisher for RecordingPublisher {
    fn publish(&self, name: &str, value: bool) -> std::io::Result<()> {
        let mut published = self
            .published
            .lock()
            .map_err(|_| std::io::Error::other("recording publisher poisoned"))?;
        published.push((name.to_string(), value));
        Ok(())
    }
}
