//! Applies a streamed assistant reply to a shared [`ConversationStore`]

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::SourceCitation;
use super::store::{ConversationStore, RequestToken};

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Conversation store lock poisoned")]
    LockPoisoned,
}

/// Events emitted by the AI endpoint while a reply streams in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplyEvent {
    /// Incremental text, appended to what has arrived so far
    #[serde(rename = "chunk")]
    Chunk { content: String },
    #[serde(rename = "sources")]
    Sources { sources: Vec<SourceCitation> },
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "error")]
    Error { message: String },
}

/// How a driven reply ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Completed { content: String },
    Failed { message: String },
    /// A newer request (or a cleared transcript) took over mid-stream
    Superseded,
}

/// Feeds reply events into a store shared with the UI
#[derive(Clone)]
pub struct ReplyDriver {
    store: Arc<Mutex<ConversationStore>>,
}

impl ReplyDriver {
    pub fn new(store: Arc<Mutex<ConversationStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Mutex<ConversationStore>> {
        &self.store
    }

    fn lock(&self) -> Result<MutexGuard<'_, ConversationStore>, ChatError> {
        self.store.lock().map_err(|_| ChatError::LockPoisoned)
    }

    /// Record the user's message and open a new request
    pub fn send(&self, user_text: impl Into<String>) -> Result<RequestToken, ChatError> {
        let mut store = self.lock()?;
        let token = store.begin_request(user_text);
        log::info!("Chat request {} started", token.generation());
        Ok(token)
    }

    /// Consume `events` for the request identified by `token`.
    ///
    /// The lock is taken per event so the UI can render between chunks. A
    /// stream that ends without `Done` or `Error` is treated as complete.
    pub fn drive<I>(&self, token: RequestToken, events: I) -> Result<ReplyOutcome, ChatError>
    where
        I: IntoIterator<Item = ReplyEvent>,
    {
        let mut content = String::new();
        let mut event_count = 0usize;

        for event in events {
            event_count += 1;
            let mut store = self.lock()?;
            if !store.is_current(token) {
                log::info!(
                    "Chat request {} superseded after {} events",
                    token.generation(),
                    event_count
                );
                return Ok(ReplyOutcome::Superseded);
            }

            match event {
                ReplyEvent::Chunk { content: delta } => {
                    content.push_str(&delta);
                    store.apply_reply(token, content.as_str(), None);
                }
                ReplyEvent::Sources { sources } => {
                    store.apply_reply(token, content.as_str(), Some(sources));
                }
                ReplyEvent::Done => {
                    store.finish_request(token);
                    log::info!(
                        "Chat request {} completed after {} events",
                        token.generation(),
                        event_count
                    );
                    return Ok(ReplyOutcome::Completed { content });
                }
                ReplyEvent::Error { message } => {
                    log::error!("Chat request {} failed: {}", token.generation(), message);
                    store.fail_request(token, message.as_str());
                    return Ok(ReplyOutcome::Failed { message });
                }
            }
        }

        let mut store = self.lock()?;
        if !store.finish_request(token) {
            return Ok(ReplyOutcome::Superseded);
        }
        if event_count == 0 {
            log::warn!("Chat request {}: stream closed without any events", token.generation());
        }
        Ok(ReplyOutcome::Completed { content })
    }
}
