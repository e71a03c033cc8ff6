//! Tool registration for the GitHub operations.

use std::sync::Arc;

use pullscout_tools::{AgentTool, ToolError, ToolResult, ToolSpec, WireFormat, canonical_tool_name};

use crate::client::GithubClient;
use crate::model::PullRequestInput;

/// Builds the GitHub operations as registerable tools.
///
/// Names come from a registration-time identifier table run through the
/// naming policy, so `getPullRequest` is advertised as `get_pull_request`.
/// The returned tools share the supplied client.
///
/// # Errors
///
/// Returns [`ToolError::InvalidSpec`] if a spec fails validation.
pub fn github_tools(
    client: &Arc<GithubClient>,
    format: WireFormat,
) -> ToolResult<Vec<Arc<dyn AgentTool>>> {
    let pull_request = {
        let client = Arc::clone(client);
        ToolSpec::new(
            canonical_tool_name("getPullRequest"),
            "Get pull request details from GitHub",
            move |input: PullRequestInput| {
                let client = Arc::clone(&client);
                async move {
                    client
                        .pull_request(&input)
                        .await
                        .map_err(|err| ToolError::execution(err.to_string()))
                }
            },
        )?
    };

    let pull_request_comments = {
        let client = Arc::clone(client);
        ToolSpec::new(
            canonical_tool_name("getPullRequestComments"),
            "Get pull request comments from GitHub",
            move |input: PullRequestInput| {
                let client = Arc::clone(&client);
                async move {
                    client
                        .pull_request_comments(&input)
                        .await
                        .map_err(|err| ToolError::execution(err.to_string()))
                }
            },
        )?
    };

    Ok(vec![
        Arc::new(pull_request.bind(format)),
        Arc::new(pull_request_comments.bind(format)),
    ])
}
