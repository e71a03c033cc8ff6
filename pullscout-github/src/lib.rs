//! GitHub REST client for pull-request review data.
//!
//! Fetches pull request details and comments through the REST API v3 and
//! registers both operations as schema-described tools. An optional token
//! raises rate limits and allows private repository access.

#![warn(missing_docs, clippy::pedantic)]

mod client;
mod model;
mod tools;

mod http_client;

pub use client::{GITHUB_TOKEN_ENV, GithubClient, GithubConfig};
pub use model::{Comment, CommentKind, PullRequestDetails, PullRequestInput};
pub use tools::github_tools;

use thiserror::Error;

/// Result alias used by the GitHub client.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors produced by the GitHub client.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Client is misconfigured.
    #[error("github client not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// Transport-level failures (network, protocol, etc.).
    #[error("github transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The API returned a non-success status or a malformed body.
    #[error("github response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl GithubError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}
