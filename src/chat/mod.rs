//! Chat widget state
//!
//! - `models`: messages, citations and course scoping
//! - `store`: the conversation store and request tokens
//! - `reply`: applies a streamed AI reply to a shared store

pub mod models;
pub mod reply;
pub mod store;

pub use models::*;
pub use reply::{ChatError, ReplyDriver, ReplyEvent, ReplyOutcome};
pub use store::{ConversationStore, RequestToken};
