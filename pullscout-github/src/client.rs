//! Hyper-based GitHub REST API v3 client.

use std::{env, fmt, time::Duration};

use hyper::body::to_bytes;
use hyper::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use hyper::{Body, Request, Uri};
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::debug;

use crate::http_client::{HyperClient, build_https_client};
use crate::model::{IssueCommentWire, PullRequestWire, ReviewCommentWire};
use crate::{Comment, GithubError, GithubResult, PullRequestDetails, PullRequestInput};

/// Environment variable used when loading configuration automatically.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_API_KEY";

/// GitHub REST API version header value.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Configuration for the GitHub client.
#[derive(Clone, Debug, Default)]
pub struct GithubConfig {
    token: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GithubConfig {
    /// Creates a configuration with default endpoint and no token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the token from the `GITHUB_API_KEY` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut cfg = Self::new();
        cfg.token = env::var(GITHUB_TOKEN_ENV).ok();
        cfg
    }

    /// Supplies an explicit API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> GithubResult<Self> {
        let sanitized = sanitize_base_url(base_url.as_ref())?;
        self.base_url = Some(sanitized);
        Ok(self)
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the GitHub REST API v3.
///
/// Works unauthenticated; a token raises rate limits and allows private
/// repository access when the token permits it.
pub struct GithubClient {
    client: HyperClient,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Constructs a new client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Configuration`] when the TLS client cannot be
    /// built.
    pub fn new(config: GithubConfig) -> GithubResult<Self> {
        let client = build_https_client()?;
        Ok(Self {
            client,
            base_url: config
                .base_url
                .unwrap_or_else(|| "https://api.github.com/".to_owned()),
            token: config.token,
            timeout: config.timeout.unwrap_or(Duration::from_secs(30)),
        })
    }

    /// Fetches the details of a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Transport`] on network failures and
    /// [`GithubError::Response`] when the API answers with a non-success
    /// status or an undecodable body.
    pub async fn pull_request(
        &self,
        input: &PullRequestInput,
    ) -> GithubResult<PullRequestDetails> {
        let path = format!(
            "repos/{}/{}/pulls/{}",
            input.owner, input.repo, input.number
        );
        let wire: PullRequestWire = self.get_json(&path).await?;
        Ok(wire.into_details())
    }

    /// Fetches review and issue comments for a pull request, merged and
    /// sorted by creation date.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`GithubClient::pull_request`].
    pub async fn pull_request_comments(
        &self,
        input: &PullRequestInput,
    ) -> GithubResult<Vec<Comment>> {
        let review_path = format!(
            "repos/{}/{}/pulls/{}/comments",
            input.owner, input.repo, input.number
        );
        let issue_path = format!(
            "repos/{}/{}/issues/{}/comments",
            input.owner, input.repo, input.number
        );

        let review: Vec<ReviewCommentWire> = self.get_json(&review_path).await?;
        let issue: Vec<IssueCommentWire> = self.get_json(&issue_path).await?;

        Ok(unify_comments(review, issue))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GithubResult<T> {
        let uri = format!("{}{path}", self.base_url)
            .parse::<Uri>()
            .map_err(|err| {
                GithubError::configuration(format!("invalid GitHub endpoint: {err}"))
            })?;

        debug!(%uri, "requesting GitHub resource");

        let mut builder = Request::get(uri);
        builder = builder.header(ACCEPT, "application/vnd.github+json");
        builder = builder.header(USER_AGENT, "pullscout");
        builder = builder.header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = builder.body(Body::empty()).map_err(|err| {
            GithubError::transport(format!("failed to build GitHub request: {err}"))
        })?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| GithubError::transport("GitHub request timed out"))?
            .map_err(|err| GithubError::transport(format!("GitHub request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            GithubError::transport(format!("failed to read GitHub response: {err}"))
        })?;

        if !status.is_success() {
            let reason = String::from_utf8_lossy(&bytes).to_string();
            return Err(GithubError::response(format!(
                "GitHub returned {status}: {reason}"
            )));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| GithubError::response(format!("failed to decode GitHub body: {err}")))
    }
}

fn unify_comments(review: Vec<ReviewCommentWire>, issue: Vec<IssueCommentWire>) -> Vec<Comment> {
    let mut comments: Vec<Comment> = review
        .into_iter()
        .map(ReviewCommentWire::into_comment)
        .chain(issue.into_iter().map(IssueCommentWire::into_comment))
        .collect();
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    comments
}

fn sanitize_base_url(input: &str) -> GithubResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(GithubError::configuration(
            "GitHub base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| GithubError::configuration(format!("invalid GitHub base URL: {err}")))?;
    Ok(base)
}
