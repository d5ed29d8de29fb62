use campusforum_shared::{
    CreateReply, ReplyVoteRequest, ThreadSummary, ThreadVoteRequest, UserStub,
};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::http::ForumApi;
use crate::tree::{build_reply_tree, resolve_author, ReplyNode};
use crate::vote::{settle, VoteValue};

/// Where the session is in its lifecycle. `Closed` is terminal: the owning
/// view navigated away and anything still in flight settles into the void.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Error(String),
    Closed,
}

/// The thread being viewed. Replaced wholesale on `open`; only the vote
/// fields mutate in place, and only after server acknowledgment.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    pub content: String,
    pub author: UserStub,
    pub created_at: String,
    pub vote_count: i64,
    pub user_vote: Option<VoteValue>,
    pub reply_count: i64,
}

impl From<ThreadSummary> for Thread {
    fn from(s: ThreadSummary) -> Self {
        Self {
            id: s.id,
            forum_id: s.forum_id,
            title: s.title,
            content: s.content,
            author: resolve_author(&s.author),
            created_at: s.created_at,
            vote_count: s.vote_count,
            user_vote: VoteValue::from_raw(s.user_vote),
            reply_count: s.reply_count,
        }
    }
}

/// What a vote is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    Thread,
    Reply(i64),
}

/// `GET /threads/{forumId}` — the summaries a session is opened from.
pub async fn list_threads<A: ForumApi>(api: &A, forum_id: i64) -> Result<Vec<Thread>, ClientError> {
    let summaries = api.list_threads(forum_id).await?;
    Ok(summaries.into_iter().map(Thread::from).collect())
}

/// One open thread view: the active thread, its reply tree, and the
/// orchestration of fetch/post/vote against the API.
///
/// The acting user is a parameter of every mutating operation rather than
/// ambient state, so a logout mid-action can never leak a stale identity
/// into a request.
#[derive(Debug)]
pub struct ThreadSession<A: ForumApi> {
    api: A,
    thread: Option<Thread>,
    replies: Vec<ReplyNode>,
    state: SessionState,
    /// Top-level compose box draft. The only view state that survives a
    /// refetch; cleared when a root reply is posted successfully.
    draft: String,
    /// Fetch sequence: bumped when a fetch is issued, compared when it
    /// settles. A response that is not the latest issued is discarded.
    issued_seq: u64,
}

impl<A: ForumApi> ThreadSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            thread: None,
            replies: Vec::new(),
            state: SessionState::Idle,
            draft: String::new(),
            issued_seq: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn thread(&self) -> Option<&Thread> {
        self.thread.as_ref()
    }

    pub fn replies(&self) -> &[ReplyNode] {
        &self.replies
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Make `summary` the active thread and load its reply tree. The
    /// previous tree is discarded up front, not shown as stale.
    pub async fn open(&mut self, summary: ThreadSummary) -> Result<(), ClientError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        let thread_id = summary.id;
        debug!(thread_id, "opening thread");
        self.thread = Some(Thread::from(summary));
        self.replies.clear();
        self.refetch(thread_id).await
    }

    /// Post a reply under `parent_reply_id` (`None` for a root reply), then
    /// refetch the whole tree so server-assigned ids and ordering stay
    /// authoritative. No node is synthesized locally.
    pub async fn post_reply(
        &mut self,
        viewer: Option<i64>,
        content: &str,
        parent_reply_id: Option<i64>,
    ) -> Result<(), ClientError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        let body = content.trim();
        if body.is_empty() {
            return Err(ClientError::Validation("reply content is empty"));
        }
        let created_by = viewer.ok_or(ClientError::AuthRequired)?;
        let thread_id = self
            .thread
            .as_ref()
            .ok_or(ClientError::Validation("no open thread"))?
            .id;

        let req = CreateReply {
            thread_id,
            parent_reply_id,
            content: body.to_string(),
            created_by,
        };
        self.api.post_reply(&req).await?;

        // Nested compose boxes are cleared by their own views; only the
        // session-owned top-level draft is cleared here.
        if parent_reply_id.is_none() {
            self.draft.clear();
        }
        self.refetch(thread_id).await
    }

    /// Cast or toggle a vote. The count is only touched after the server
    /// acknowledges: a thread ack patches the thread in place, a reply ack
    /// re-derives the whole tree instead of patching a nested node.
    pub async fn vote(
        &mut self,
        viewer: Option<i64>,
        target: VoteTarget,
        value: VoteValue,
    ) -> Result<(), ClientError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        let user_id = viewer.ok_or(ClientError::AuthRequired)?;

        match target {
            VoteTarget::Thread => {
                let thread_id = self
                    .thread
                    .as_ref()
                    .ok_or(ClientError::Validation("no open thread"))?
                    .id;
                let req = ThreadVoteRequest {
                    thread_id,
                    user_id,
                    vote: value.as_i32(),
                };
                self.api.vote_thread(&req).await?;
                if let Some(thread) = self.thread.as_mut() {
                    let settled = settle(thread.user_vote, value);
                    thread.vote_count += settled.delta;
                    thread.user_vote = settled.user_vote;
                }
                Ok(())
            }
            VoteTarget::Reply(reply_id) => {
                let req = ReplyVoteRequest {
                    reply_id,
                    user_id,
                    vote: value.as_i32(),
                };
                self.api.vote_reply(&req).await?;
                match self.thread.as_ref().map(|t| t.id) {
                    Some(thread_id) => self.refetch(thread_id).await,
                    None => Ok(()),
                }
            }
        }
    }

    /// Manual retry from the error state.
    pub async fn retry(&mut self) -> Result<(), ClientError> {
        match (&self.state, self.thread.as_ref().map(|t| t.id)) {
            (SessionState::Error(_), Some(thread_id)) => self.refetch(thread_id).await,
            _ => Ok(()),
        }
    }

    /// Tear the session down. Terminal; later calls are no-ops and any
    /// in-flight fetch is discarded when it settles.
    pub fn close(&mut self) {
        self.issued_seq += 1;
        self.state = SessionState::Closed;
        self.thread = None;
        self.replies.clear();
    }

    /// Issue a tree fetch and apply it unless a newer fetch was issued (or
    /// the session closed) while it was in flight.
    async fn refetch(&mut self, thread_id: i64) -> Result<(), ClientError> {
        let seq = self.begin_fetch();
        let outcome = match self.api.fetch_replies(thread_id).await {
            Ok(records) => build_reply_tree(records),
            Err(e) => Err(e),
        };
        self.finish_fetch(seq, outcome)
    }

    fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.state = SessionState::Loading;
        debug!(seq = self.issued_seq, "reply fetch issued");
        self.issued_seq
    }

    fn finish_fetch(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ReplyNode>, ClientError>,
    ) -> Result<(), ClientError> {
        if self.state == SessionState::Closed || seq != self.issued_seq {
            warn!(seq, latest = self.issued_seq, "discarding stale reply fetch");
            return Ok(());
        }
        match outcome {
            Ok(nodes) => {
                self.replies = nodes;
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(e) => {
                self.replies.clear();
                self.state = SessionState::Error(e.to_string());
                Err(e)
            }
        }
    }
}
