use campusforum_shared::{AuthorFields, ReplyRecord, UserStub};
use tracing::warn;

use crate::error::ClientError;
use crate::vote::VoteValue;

/// A reply and its children, as the view renders it. A node exclusively owns
/// its children; the whole forest is rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyNode {
    pub id: i64,
    pub thread_id: i64,
    pub parent_reply_id: Option<i64>,
    pub content: String,
    pub author: UserStub,
    pub created_at: String,
    pub vote_count: i64,
    pub user_vote: Option<VoteValue>,
    pub children: Vec<ReplyNode>,
}

/// Resolve the display identity for a record's author columns. The backend
/// sends either a pre-joined `name` or split `firstname`/`lastname`; rows
/// with neither get a synthetic `User {id}` label.
pub(crate) fn resolve_author(fields: &AuthorFields) -> UserStub {
    let id = fields.created_by.unwrap_or(0);
    let display_name = match fields.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            let first = fields.firstname.as_deref().unwrap_or("");
            let last = fields.lastname.as_deref().unwrap_or("");
            let joined = format!("{first} {last}");
            let joined = joined.trim();
            if joined.is_empty() {
                format!("User {id}")
            } else {
                joined.to_string()
            }
        }
    };
    UserStub {
        id,
        display_name,
        avatar_url: fields.avatar.clone(),
    }
}

/// Convert the server's nested reply payload into view trees, one per
/// top-level record, in payload order. Pure transform, no de-duplication: a
/// record the server sends twice appears twice.
pub fn build_reply_tree(records: Vec<ReplyRecord>) -> Result<Vec<ReplyNode>, ClientError> {
    records.into_iter().map(build_node).collect()
}

fn build_node(record: ReplyRecord) -> Result<ReplyNode, ClientError> {
    let id = record
        .id
        .ok_or_else(|| ClientError::MalformedRecord("reply record without a numeric id".into()))?;

    let mut children = Vec::with_capacity(record.children.len());
    for child in record.children {
        // Trust the server's grouping only when the declared parent matches
        // the node the child arrived under.
        if child.parent_reply_id != Some(id) {
            warn!(
                parent = id,
                declared = ?child.parent_reply_id,
                "skipping reply child with mismatched parent id"
            );
            continue;
        }
        children.push(build_node(child)?);
    }

    Ok(ReplyNode {
        id,
        thread_id: record.thread_id,
        parent_reply_id: record.parent_reply_id,
        content: record.content,
        author: resolve_author(&record.author),
        created_at: record.created_at,
        vote_count: record.vote_count,
        user_vote: VoteValue::from_raw(record.user_vote),
        children,
    })
}
