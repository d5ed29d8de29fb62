use serde::{Deserialize, Serialize};

// ── Users ──

/// Minimal display identity attached to authored content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStub {
    pub id: i64,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Author columns as the backend returns them: either a pre-joined `name`
/// or split `firstname`/`lastname`, plus the raw user id and avatar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorFields {
    #[serde(rename = "createdby", alias = "createdBy", default)]
    pub created_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ── Threads ──

/// One row of `GET /threads/{forumId}`; also the summary a session opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: i64,
    #[serde(rename = "forumid", alias = "forumId", default)]
    pub forum_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub author: AuthorFields,
    #[serde(rename = "createdat", alias = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "votecount", alias = "voteCount", default)]
    pub vote_count: i64,
    #[serde(rename = "uservote", alias = "userVote", default)]
    pub user_vote: Option<i32>,
    #[serde(rename = "replycount", alias = "replyCount", default)]
    pub reply_count: i64,
}

// ── Replies ──

/// One record of `GET /thread/{threadId}/replies`. The server nests children
/// under their parent; `id` stays optional so a malformed row is caught at
/// tree-build time instead of failing the whole payload in serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "threadid", alias = "threadId", default)]
    pub thread_id: i64,
    #[serde(rename = "parentreplyid", alias = "parentReplyId", default)]
    pub parent_reply_id: Option<i64>,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub author: AuthorFields,
    #[serde(rename = "createdat", alias = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "votecount", alias = "voteCount", default)]
    pub vote_count: i64,
    #[serde(rename = "uservote", alias = "userVote", default)]
    pub user_vote: Option<i32>,
    #[serde(default)]
    pub children: Vec<ReplyRecord>,
}

// ── Requests ──

/// Body of `POST /reply_thread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReply {
    pub thread_id: i64,
    pub parent_reply_id: Option<i64>,
    pub content: String,
    pub created_by: i64,
}

/// Body of `POST /vote/thread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadVoteRequest {
    pub thread_id: i64,
    pub user_id: i64,
    pub vote: i32,
}

/// Body of `POST /vote/reply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyVoteRequest {
    pub reply_id: i64,
    pub user_id: i64,
    pub vote: i32,
}

// ── Errors ──

/// JSON envelope the API uses for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
