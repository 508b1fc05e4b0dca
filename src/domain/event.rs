//! Domain events produced by the ChatRoom aggregate.
//!
//! Events are immutable facts recorded by the aggregate and drained by the
//! use-case layer, which forwards them to real-time subscribers and to
//! persistence.

use async_trait::async_trait;
use serde::Serialize;

use super::{
    entity::Message,
    service::ModerationAction,
    value_object::{RoomId, UserId},
};

/// Something that happened inside a chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DomainEvent {
    /// A message was published to the room
    MessageSent {
        room_id: RoomId,
        message: Message,
    },
    /// A moderation action was applied to a user
    UserModerated {
        user_id: UserId,
        room_id: RoomId,
        moderator_id: UserId,
        action: ModerationAction,
        /// Timeout duration in milliseconds; absent for ban
        duration_ms: Option<i64>,
    },
}

/// Outbound port for dispatching drained domain events.
///
/// Implementations fan events out to room subscribers; delivery guarantees
/// are out of scope, so publishing never fails the surrounding use case.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a batch of events in order.
    async fn publish_all(&self, events: Vec<DomainEvent>);
}
