//! Core domain entities for the chat room.

use serde::Serialize;

use super::{
    error::ValueObjectError,
    value_object::{Emote, MessageContent, MessageId, Timestamp, UserId},
};
use crate::time::now_timestamp_millis;

/// One posted chat line.
///
/// Owned exclusively by the ChatRoom that created it; immutable after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: MessageId,
    user_id: UserId,
    content: MessageContent,
    timestamp: Timestamp,
    emotes: Vec<Emote>,
}

impl Message {
    /// Create a new Message.
    ///
    /// Content is validated and trimmed through [`MessageContent`].
    ///
    /// # Arguments
    ///
    /// * `id` - Message identifier, assigned by the owning room
    /// * `user_id` - The sender
    /// * `content` - Raw content, 1 to 500 characters after trimming
    /// * `emotes` - Emotes referenced by the message, possibly empty
    /// * `timestamp` - Creation time, computed by the caller
    ///
    /// # Errors
    ///
    /// Returns a [`ValueObjectError`] when the content fails validation.
    pub fn create(
        id: MessageId,
        user_id: UserId,
        content: &str,
        emotes: Vec<Emote>,
        timestamp: Timestamp,
    ) -> Result<Self, ValueObjectError> {
        let content = MessageContent::new(content)?;
        Ok(Self {
            id,
            user_id,
            content,
            timestamp,
            emotes,
        })
    }

    /// Rehydrate a Message from persistence.
    ///
    /// All parts are already-validated value objects; no creation-time
    /// effects are re-run.
    pub fn restore(
        id: MessageId,
        user_id: UserId,
        content: MessageContent,
        timestamp: Timestamp,
        emotes: Vec<Emote>,
    ) -> Self {
        Self {
            id,
            user_id,
            content,
            timestamp,
            emotes,
        }
    }

    /// Get the message identifier.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Get the sender's user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the content.
    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Get the creation timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Get the emotes referenced by the message.
    pub fn emotes(&self) -> &[Emote] {
        &self.emotes
    }

    /// Whether the message was posted within the last `window_ms`
    /// milliseconds, measured against the wall clock.
    pub fn is_recent_within(&self, window_ms: i64) -> bool {
        now_timestamp_millis() - self.timestamp.value() <= window_ms
    }

    /// Whether the message references an emote with the given code.
    pub fn has_emote(&self, code: &str) -> bool {
        self.emotes.iter().any(|emote| emote.code() == code)
    }
}
