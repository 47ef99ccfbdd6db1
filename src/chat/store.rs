//! In-memory state behind the floating chat widget
//!
//! The store does no I/O. Whoever talks to the AI endpoint feeds results in
//! through [`ConversationStore::begin_request`] and friends, and the widget
//! renders from the read accessors.

use super::models::*;

/// Identifies one outstanding request.
///
/// Tokens are issued from a monotonic generation counter; only the most
/// recently issued token may write to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConversationStore {
    open: bool,
    course_context: Option<CourseContext>,
    messages: Vec<ChatMessage>,
    loading: bool,
    generation: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn course_context(&self) -> Option<&CourseContext> {
        self.course_context.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Append a message. Ids are not checked for uniqueness.
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replace the content of the newest assistant message.
    ///
    /// `sources` replaces the citations only when given. Returns `false` when
    /// the transcript has no assistant message yet.
    pub fn update_last_assistant_message(
        &mut self,
        content: impl Into<String>,
        sources: Option<Vec<SourceCitation>>,
    ) -> bool {
        match self.messages.iter_mut().rev().find(|m| m.is_assistant()) {
            Some(message) => {
                message.content = content.into();
                if sources.is_some() {
                    message.sources = sources;
                }
                true
            }
            None => {
                log::debug!("No assistant message to update");
                false
            }
        }
    }

    pub fn set_course_context(&mut self, context: Option<CourseContext>) {
        self.course_context = context;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Empty the transcript. Any outstanding request token becomes stale.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.generation += 1;
        self.loading = false;
    }

    // ===== Request tracking =====

    /// Start a new exchange: appends the user message and an empty assistant
    /// placeholder, marks the store loading and returns the token for it.
    ///
    /// Issuing a new token supersedes any request still in flight.
    pub fn begin_request(&mut self, user_text: impl Into<String>) -> RequestToken {
        self.generation += 1;
        self.messages.push(ChatMessage::user(user_text));
        self.messages.push(ChatMessage::assistant(String::new()));
        self.loading = true;
        RequestToken {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.generation == self.generation
    }

    /// Apply (partial) reply content for `token`. Stale tokens are ignored.
    pub fn apply_reply(
        &mut self,
        token: RequestToken,
        content: impl Into<String>,
        sources: Option<Vec<SourceCitation>>,
    ) -> bool {
        if !self.is_current(token) {
            log::debug!(
                "Dropping reply for stale request {} (current {})",
                token.generation,
                self.generation
            );
            return false;
        }
        self.update_last_assistant_message(content, sources)
    }

    /// Mark the request as finished. No effect for a stale token.
    pub fn finish_request(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Mark the request as failed.
    ///
    /// The error text goes into the placeholder only if nothing streamed in
    /// yet; partial replies are kept as they are.
    pub fn fail_request(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.loading = false;
        let placeholder_empty = self
            .messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(|m| m.content.is_empty())
            .unwrap_or(false);
        if placeholder_empty {
            self.update_last_assistant_message(message, None);
        }
        true
    }
}
