//! Repository port for ChatRoom persistence.
//!
//! The trait is defined in the domain layer and implemented by the
//! infrastructure layer (dependency inversion). Cross-process concurrency
//! is resolved by optimistic concurrency control: each stored document
//! carries a version, and saving a stale aggregate fails with
//! [`RepositoryError::VersionConflict`] instead of silently overwriting
//! (last-write-wins is ruled out by contract).

use async_trait::async_trait;
use thiserror::Error;

use super::{
    room::ChatRoom,
    value_object::{ChannelId, RoomId},
};

/// Errors raised by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The aggregate was loaded at an older version than the stored one
    #[error("version conflict for room '{room_id}': aggregate at {loaded}, store at {stored}")]
    VersionConflict {
        room_id: String,
        loaded: u64,
        stored: u64,
    },

    /// The stored document could not be mapped back to a valid aggregate
    #[error("stored document for room '{room_id}' is corrupted: {reason}")]
    CorruptedDocument { room_id: String, reason: String },
}

/// Persistence port for ChatRoom aggregates.
///
/// `save` persists the full collections (messages, roster, bans, mutes)
/// together with the concurrency token and advances the aggregate's
/// version on success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRoomRepository: Send + Sync {
    /// Find a room by its identifier.
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<ChatRoom>, RepositoryError>;

    /// Find the room belonging to a channel.
    async fn find_by_channel(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Option<ChatRoom>, RepositoryError>;

    /// Persist the aggregate, checking the concurrency token.
    async fn save(&self, room: &mut ChatRoom) -> Result<(), RepositoryError>;

    /// Delete a room. Deleting a room that does not exist is a no-op.
    async fn delete(&self, id: &RoomId) -> Result<(), RepositoryError>;
}
