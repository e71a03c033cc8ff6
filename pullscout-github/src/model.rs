//! Domain types exchanged with the review agent.

use serde::{Deserialize, Serialize};

use pullscout_schema::ToolSchema;

/// Coordinates identifying a pull request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToolSchema)]
#[schema(description = "Pull request coordinates")]
pub struct PullRequestInput {
    /// Repository owner login.
    #[schema(description = "Repository owner")]
    pub owner: String,
    /// Repository name.
    #[schema(description = "Repository name")]
    pub repo: String,
    /// Pull request number.
    #[schema(description = "Pull request number")]
    pub number: u64,
}

/// Pull request details surfaced to the reviewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToolSchema)]
#[schema(description = "Pull request details")]
pub struct PullRequestDetails {
    /// Pull request number.
    #[schema(description = "Pull request number")]
    pub number: u64,
    /// Pull request title.
    #[schema(description = "Pull request title")]
    pub title: String,
    /// Pull request body in raw markdown.
    #[schema(description = "Pull request body")]
    pub body: String,
    /// Login of the pull request author.
    #[schema(description = "Pull request author")]
    pub author: String,
    /// Link to the pull request on GitHub.
    #[schema(description = "Pull request URL")]
    pub url: String,
}

/// Where a comment was left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToolSchema)]
pub enum CommentKind {
    /// Conversation comment on the issue thread.
    Issue,
    /// Review comment attached to the diff.
    Review,
}

/// A unified pull request comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToolSchema)]
#[schema(description = "Pull request comment")]
pub struct Comment {
    /// Comment identifier.
    #[schema(description = "Comment ID")]
    pub id: i64,
    /// Login of the comment author.
    #[schema(description = "Comment author")]
    pub author: String,
    /// Comment body in raw markdown.
    #[schema(description = "Comment body")]
    pub body: String,
    /// Creation timestamp as reported by GitHub (ISO 8601).
    #[schema(description = "Comment creation date")]
    pub created_at: String,
    /// Whether the comment came from the issue thread or a review.
    #[schema(description = "Comment kind")]
    pub kind: CommentKind,
}

// Partial API response models; unknown fields are ignored.

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestWire {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueCommentWire {
    pub id: i64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<UserWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewCommentWire {
    pub id: i64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<UserWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserWire {
    #[serde(default)]
    pub login: Option<String>,
}

impl PullRequestWire {
    pub(crate) fn into_details(self) -> PullRequestDetails {
        PullRequestDetails {
            number: self.number.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            author: self
                .user
                .and_then(|user| user.login)
                .unwrap_or_default(),
            url: self.html_url.unwrap_or_default(),
        }
    }
}

impl IssueCommentWire {
    pub(crate) fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            author: self.user.and_then(|user| user.login).unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            kind: CommentKind::Issue,
        }
    }
}

impl ReviewCommentWire {
    pub(crate) fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            author: self.user.and_then(|user| user.login).unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            kind: CommentKind::Review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pullscout_schema::StructuralSchema;

    #[test]
    fn input_schema_requires_all_coordinates() {
        let StructuralSchema::Object(object) = PullRequestInput::schema() else {
            panic!("expected object shape");
        };
        assert_eq!(object.required_names(), ["owner", "repo", "number"]);
        assert_eq!(object.description(), Some("Pull request coordinates"));
    }

    #[test]
    fn comment_kind_is_a_string_scalar() {
        assert_eq!(
            CommentKind::schema(),
            StructuralSchema::Scalar(pullscout_schema::ScalarKind::String)
        );
    }

    #[test]
    fn wire_mapping_defaults_missing_fields() {
        let wire: PullRequestWire = serde_json::from_str(
            r#"{
                "number": 75,
                "title": "Add JsonPath DSL",
                "html_url": "https://github.com/octo/hello/pull/75",
                "user": {"login": "octocat"},
                "merged": false
            }"#,
        )
        .unwrap();

        let details = wire.into_details();
        assert_eq!(details.number, 75);
        assert_eq!(details.title, "Add JsonPath DSL");
        assert_eq!(details.body, "");
        assert_eq!(details.author, "octocat");
    }

    #[test]
    fn review_comment_maps_to_review_kind() {
        let wire: ReviewCommentWire = serde_json::from_str(
            r#"{"id": 9, "body": "nit", "created_at": "2024-05-01T10:00:00Z", "user": {"login": "octocat"}}"#,
        )
        .unwrap();

        let comment = wire.into_comment();
        assert_eq!(comment.kind, CommentKind::Review);
        assert_eq!(comment.id, 9);
        assert_eq!(comment.author, "octocat");
    }
}
