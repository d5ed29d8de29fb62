//! End-to-end tests for the reqwest transport against a stub axum backend
//! serving the five forum endpoints.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use campusforum_client::{
    ClientError, HttpApi, SessionState, ThreadSession, VoteTarget, VoteValue,
};
use campusforum_shared::ThreadSummary;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn summary(id: i64, vote_count: i64) -> ThreadSummary {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "forumid": 1,
        "title": "Welcome",
        "content": "Introduce yourself",
        "createdby": 1,
        "name": "John Smith",
        "votecount": vote_count,
    }))
    .unwrap()
}

#[tokio::test]
async fn open_builds_the_tree_from_the_wire_payload() {
    let app = Router::new().route(
        "/thread/{id}/replies",
        get(|| async {
            Json(serde_json::json!([
                {"id": 1, "threadid": 7, "parentreplyid": null,
                 "content": "Hello everyone!",
                 "createdby": 2, "firstname": "Jane", "lastname": "Doe",
                 "votecount": 15,
                 "children": [
                    {"id": 2, "threadid": 7, "parentreplyid": 1,
                     "content": "Welcome to the course!",
                     "createdby": 3, "votecount": 8, "children": []}
                 ]}
            ]))
        }),
    );
    let base = serve(app).await;

    let mut session = ThreadSession::new(HttpApi::new(base));
    session.open(summary(7, 42)).await.unwrap();

    assert_eq!(*session.state(), SessionState::Ready);
    let roots = session.replies();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].author.display_name, "Jane Doe");
    assert_eq!(roots[0].children.len(), 1);
    assert_eq!(roots[0].children[0].author.display_name, "User 3");
    assert_eq!(roots[0].children[0].parent_reply_id, Some(1));
}

#[tokio::test]
async fn list_threads_hits_the_forum_route() {
    let app = Router::new().route(
        "/threads/{forum_id}",
        get(|Path(forum_id): Path<i64>| async move {
            Json(serde_json::json!([
                {"id": 7, "forumid": forum_id, "title": "Welcome",
                 "content": "Hi", "createdby": 1, "name": "John Smith",
                 "votecount": 42, "replycount": 2}
            ]))
        }),
    );
    let base = serve(app).await;

    let threads = campusforum_client::list_threads(&HttpApi::new(base), 1)
        .await
        .unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].forum_id, 1);
    assert_eq!(threads[0].author.display_name, "John Smith");
    assert_eq!(threads[0].reply_count, 2);
}

#[tokio::test]
async fn non_json_500_surfaces_the_status_text_and_changes_nothing() {
    let app = Router::new()
        .route(
            "/vote/thread",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "wedged") }),
        )
        .route(
            "/thread/{id}/replies",
            get(|| async { Json(serde_json::json!([])) }),
        );
    let base = serve(app).await;

    let mut session = ThreadSession::new(HttpApi::new(base));
    session.open(summary(7, 10)).await.unwrap();

    let err = session
        .vote(Some(3), VoteTarget::Thread, VoteValue::Up)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Server {
            status: 500,
            message: "Internal Server Error".into(),
        }
    );
    assert_eq!(session.thread().unwrap().vote_count, 10);
    assert_eq!(session.thread().unwrap().user_vote, None);
}

#[tokio::test]
async fn json_error_envelope_wins_over_the_status_text() {
    let app = Router::new().route(
        "/vote/reply",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "bad vote value"})),
            )
        }),
    );
    let base = serve(app).await;

    let mut session = ThreadSession::new(HttpApi::new(base));
    // No open() needed: a reply vote carries its own target id.
    let err = session
        .vote(Some(3), VoteTarget::Reply(1), VoteValue::Up)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Server {
            status: 400,
            message: "bad vote value".into(),
        }
    );
}

#[tokio::test]
async fn posting_a_reply_refetches_the_authoritative_tree() {
    #[derive(Clone, Default)]
    struct Board {
        replies: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    let board = Board::default();

    let app = Router::new()
        .route(
            "/thread/{id}/replies",
            get(|State(board): State<Board>| async move {
                Json(serde_json::Value::Array(board.replies.lock().unwrap().clone()))
            }),
        )
        .route(
            "/reply_thread",
            post(
                |State(board): State<Board>, Json(body): Json<serde_json::Value>| async move {
                    // The client sends the camelCase body of POST /reply_thread.
                    let id = board.replies.lock().unwrap().len() as i64 + 1;
                    board.replies.lock().unwrap().push(serde_json::json!({
                        "id": id,
                        "threadid": body["threadId"],
                        "parentreplyid": body["parentReplyId"],
                        "content": body["content"],
                        "createdby": body["createdBy"],
                        "children": [],
                    }));
                    Json(serde_json::json!({"status": "ok"}))
                },
            ),
        )
        .with_state(board);
    let base = serve(app).await;

    let mut session = ThreadSession::new(HttpApi::new(base));
    session.open(summary(7, 10)).await.unwrap();
    assert!(session.replies().is_empty());

    session.post_reply(Some(3), "hello", None).await.unwrap();

    assert_eq!(*session.state(), SessionState::Ready);
    assert_eq!(session.replies().len(), 1);
    assert_eq!(session.replies()[0].content, "hello");
    assert_eq!(session.replies()[0].author.display_name, "User 3");
}
