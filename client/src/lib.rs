//! Thread/reply view-model for the campusforum discussion boards.
//!
//! The crate owns the state behind one open thread view: fetching the nested
//! reply payload, normalizing it into a tree, posting replies, and casting
//! togglable votes. Rendering lives elsewhere; everything here is plain data
//! plus the orchestration against the HTTP API.

pub mod error;
pub mod http;
pub mod session;
pub mod tree;
pub mod vote;

pub use error::ClientError;
pub use http::{ForumApi, HttpApi};
pub use session::{list_threads, SessionState, Thread, ThreadSession, VoteTarget};
pub use tree::{build_reply_tree, ReplyNode};
pub use vote::VoteValue;
