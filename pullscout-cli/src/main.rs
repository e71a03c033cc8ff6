//! Command-line entry point for the pull-request reviewer.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pullscout_adapters::openai::{OpenAiAdapter, OpenAiConfig};
use pullscout_agent::ReviewAgent;
use pullscout_github::{GithubClient, GithubConfig, github_tools};
use pullscout_tools::{ToolRegistry, WireFormat};
use tracing::info;

/// Reviews a GitHub pull request with a model that can call GitHub tools.
#[derive(Debug, Parser)]
#[command(name = "pullscout", version, about)]
struct Cli {
    /// Repository owner.
    owner: String,

    /// Repository name.
    repo: String,

    /// Pull request number.
    number: u64,

    /// OpenAI API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// GitHub API token; raises rate limits and allows private repositories.
    #[arg(long, env = "GITHUB_API_KEY", hide_env_values = true)]
    github_api_key: Option<String>,

    /// Model identifier used for completions.
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,

    /// Maximum number of model turns per session.
    #[arg(long, default_value_t = 8)]
    max_turns: usize,

    /// Extra reviewer instructions appended to the prompt.
    #[arg(long)]
    instructions: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    let mut github_config = GithubConfig::new();
    if let Some(token) = cli.github_api_key {
        github_config = github_config.with_token(token);
    }
    let github = Arc::new(GithubClient::new(github_config)?);

    let registry = Arc::new(ToolRegistry::new());
    for tool in github_tools(&github, WireFormat::Json)? {
        registry.register(tool)?;
    }

    let mut openai_config = OpenAiConfig::new(cli.model).with_api_key(cli.openai_api_key);
    if let Some(temperature) = cli.temperature {
        openai_config = openai_config.with_default_temperature(temperature);
    }
    let adapter = Arc::new(OpenAiAdapter::new(openai_config)?);

    let agent = ReviewAgent::new(adapter, Arc::clone(&registry)).with_max_turns(cli.max_turns);

    let mut goal = format!(
        "Review pull request {}/{}#{}.",
        cli.owner, cli.repo, cli.number
    );
    if let Some(instructions) = cli.instructions {
        goal.push('\n');
        goal.push_str(&instructions);
    }

    let outcome = agent.run(goal).await?;

    for call in outcome.tool_calls() {
        info!(tool = call.name(), "tool call completed");
    }
    println!("{}", outcome.response());
    Ok(())
}
