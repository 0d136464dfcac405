// SPDX-License-Identifier: MIT

//! Option check: did the author tick the option that forces a full run

use crate::error::FilterError;
use crate::github::{MetadataCache, PullRequestApi};
use crate::markdown::{parse_options, selected_options, SelectedOption};
use crate::pipeline::{FilterConfig, RunContext};

/// First selected option whose label equals `value` or whose index equals `index`
pub fn find_target<'a>(
    selected: &'a [SelectedOption],
    value: Option<&str>,
    index: Option<i64>,
) -> Option<&'a SelectedOption> {
    selected.iter().find(|option| {
        value.is_some_and(|v| option.label == v)
            || index.is_some_and(|i| i64::try_from(option.index).is_ok_and(|o| o == i))
    })
}

/// Run the option check. `Ok(true)` forces the following stages to run.
///
/// A body that cannot be parsed never fails the run; only remote errors do.
pub async fn pr_body_check(
    api: &dyn PullRequestApi,
    cache: &MetadataCache,
    context: &RunContext,
    config: &FilterConfig,
) -> Result<bool, FilterError> {
    log::info!("[Pull Request Body]");
    let Some(heading) = config.heading.as_deref() else {
        log::info!("Hint heading not provided, skip");
        return Ok(false);
    };
    log::info!("Hint Heading: {}", heading);

    let pr = context.pull_request_ref()?;
    let info = cache.pull_request_info(api, &pr).await?;

    let options = match parse_options(&info.body, heading) {
        Ok(options) => options,
        Err(e) => {
            log::info!("Error when parsing pull request body, skip.");
            log::info!("{}", e);
            return Ok(false);
        }
    };
    let selected = selected_options(&options);
    log::info!(
        "Selected Options: [{}]",
        selected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let value = config.option_value.as_deref();
    log::info!(
        "Target Option Index: {}",
        config
            .option_index
            .map_or_else(|| "none".to_string(), |i| i.to_string())
    );
    log::info!("Target Option Value: {}", value.unwrap_or("none"));

    match find_target(&selected, value, config.option_index) {
        Some(option) => {
            log::info!("Option {} selected, run following tests", option);
            Ok(true)
        }
        None => {
            log::info!("Option not selected.");
            Ok(false)
        }
    }
}
