use campusforum_shared::{
    ApiErrorBody, CreateReply, ReplyRecord, ReplyVoteRequest, ThreadSummary, ThreadVoteRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

/// The five endpoints the view-model talks to. `ThreadSession` is generic
/// over this seam so tests can substitute a canned transport.
#[allow(async_fn_in_trait)]
pub trait ForumApi {
    async fn list_threads(&self, forum_id: i64) -> Result<Vec<ThreadSummary>, ClientError>;
    async fn fetch_replies(&self, thread_id: i64) -> Result<Vec<ReplyRecord>, ClientError>;
    async fn post_reply(&self, req: &CreateReply) -> Result<(), ClientError>;
    async fn vote_thread(&self, req: &ThreadVoteRequest) -> Result<(), ClientError>;
    async fn vote_reply(&self, req: &ReplyVoteRequest) -> Result<(), ClientError>;
}

/// Real transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let resp = check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| ClientError::MalformedRecord(e.to_string()))
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Map a non-2xx response to `Server`, preferring the body's JSON `error`
/// field and falling back to the status canonical reason.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let fallback = status.canonical_reason().unwrap_or("unknown error");
    let message = match resp.text().await {
        Ok(body) => serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| fallback.to_string()),
        Err(_) => fallback.to_string(),
    };
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

impl ForumApi for HttpApi {
    async fn list_threads(&self, forum_id: i64) -> Result<Vec<ThreadSummary>, ClientError> {
        self.get(&format!("/threads/{forum_id}")).await
    }

    async fn fetch_replies(&self, thread_id: i64) -> Result<Vec<ReplyRecord>, ClientError> {
        self.get(&format!("/thread/{thread_id}/replies")).await
    }

    async fn post_reply(&self, req: &CreateReply) -> Result<(), ClientError> {
        self.post("/reply_thread", req).await
    }

    async fn vote_thread(&self, req: &ThreadVoteRequest) -> Result<(), ClientError> {
        self.post("/vote/thread", req).await
    }

    async fn vote_reply(&self, req: &ReplyVoteRequest) -> Result<(), ClientError> {
        self.post("/vote/reply", req).await
    }
}
