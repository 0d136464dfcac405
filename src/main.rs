use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use pipeline_filter_rs::filter::DecisionCombinator;
use pipeline_filter_rs::github::client::DEFAULT_API_URL;
use pipeline_filter_rs::github::{GithubClient, MetadataCache};
use pipeline_filter_rs::pipeline::{
    FilterConfig, PipelineVariables, RunContext, StdoutPublisher, SKIP_VARIABLE,
};

use std::sync::Arc;

/// Decide whether the remaining stages of a pull request pipeline can be skipped
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub REST API base URL
    #[arg(long, env = "FILTER_GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Name of the output variable to publish
    #[arg(long, default_value = SKIP_VARIABLE)]
    variable: String,

    /// Fetch pull request info separately for each check
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .target(env_logger::Target::Stdout)
        .init();

    let args = Args::parse();

    let vars = PipelineVariables::from_env();
    let config = FilterConfig::resolve(&vars);
    let context = RunContext::resolve(&vars);

    let client = GithubClient::new(&args.api_url, config.github_pat.as_deref())
        .context("Failed to create GitHub client")?;
    log::debug!(
        "GitHub client for {} (authenticated: {})",
        args.api_url,
        client.is_authenticated()
    );

    let cache = if args.no_cache {
        MetadataCache::disabled()
    } else {
        MetadataCache::new()
    };

    let combinator = DecisionCombinator::new(Arc::new(client), cache, config, context);
    combinator
        .run(&StdoutPublisher, &args.variable)
        .await
        .context("Pull request filter failed, no decision published")?;

    Ok(())
}
