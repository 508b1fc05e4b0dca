//! Persistence document DTOs for the chat room.
//!
//! The stored shape is decoupled from the domain model: the mute map is
//! flattened to entries, the ban set is stored as a sorted list, and the
//! concurrency token travels with the document. Mapping back to the domain
//! re-validates through the value-object constructors.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    Badge, ChannelId, ChatParticipant, ChatRoom, Emote, Message, MessageContent, MessageId,
    RoomId, Timestamp, UserId, ValueObjectError,
};

/// Stored form of an emote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmoteDocument {
    pub code: String,
    pub image_url: String,
}

/// Stored form of a badge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeDocument {
    pub name: String,
    pub image_url: String,
}

/// Stored form of a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDocument {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch) in UTC
    pub timestamp: i64,
    pub emotes: Vec<EmoteDocument>,
}

/// Stored form of a connected participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDocument {
    pub user_id: String,
    pub is_moderator: bool,
    pub badges: Vec<BadgeDocument>,
}

/// Stored form of one mute entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutedEntryDocument {
    pub user_id: String,
    /// Mute expiry (Unix millis); entries that already lapsed are stored
    /// as-is and treated as absent by the domain
    pub expires_at: i64,
}

/// Stored form of a chat room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDocument {
    pub id: String,
    pub channel_id: String,
    /// Optimistic concurrency token
    pub version: u64,
    pub next_message_seq: u64,
    pub messages: Vec<MessageDocument>,
    pub connected_participants: Vec<ParticipantDocument>,
    pub banned_user_ids: Vec<String>,
    pub muted_until: Vec<MutedEntryDocument>,
}

impl RoomDocument {
    /// Map a domain aggregate to its stored form.
    ///
    /// Set- and map-backed collections are sorted so the document shape is
    /// deterministic.
    pub fn from_room(room: &ChatRoom) -> Self {
        let mut banned_user_ids: Vec<String> = room
            .banned_user_ids()
            .iter()
            .map(|user_id| user_id.as_str().to_string())
            .collect();
        banned_user_ids.sort();

        let mut muted_until: Vec<MutedEntryDocument> = room
            .muted_until()
            .iter()
            .map(|(user_id, expires_at)| MutedEntryDocument {
                user_id: user_id.as_str().to_string(),
                expires_at: *expires_at,
            })
            .collect();
        muted_until.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Self {
            id: room.id().as_str().to_string(),
            channel_id: room.channel_id().as_str().to_string(),
            version: room.version(),
            next_message_seq: room.next_message_seq(),
            messages: room.messages().iter().map(MessageDocument::from_message).collect(),
            connected_participants: room
                .connected_participants()
                .iter()
                .map(ParticipantDocument::from_participant)
                .collect(),
            banned_user_ids,
            muted_until,
        }
    }

    /// Map the stored form back to a domain aggregate.
    ///
    /// Expired mute entries are restored unchanged; cleanup on load is
    /// intentionally not performed.
    pub fn into_room(self) -> Result<ChatRoom, ValueObjectError> {
        let id = RoomId::new(self.id)?;
        let channel_id = ChannelId::new(self.channel_id)?;

        let messages = self
            .messages
            .into_iter()
            .map(MessageDocument::into_message)
            .collect::<Result<Vec<_>, _>>()?;

        let connected_participants = self
            .connected_participants
            .into_iter()
            .map(ParticipantDocument::into_participant)
            .collect::<Result<Vec<_>, _>>()?;

        let banned_user_ids = self
            .banned_user_ids
            .into_iter()
            .map(UserId::new)
            .collect::<Result<HashSet<_>, _>>()?;

        let muted_until = self
            .muted_until
            .into_iter()
            .map(|entry| Ok((UserId::new(entry.user_id)?, entry.expires_at)))
            .collect::<Result<HashMap<_, _>, ValueObjectError>>()?;

        Ok(ChatRoom::restore(
            id,
            channel_id,
            messages,
            connected_participants,
            banned_user_ids,
            muted_until,
            self.next_message_seq,
            self.version,
        ))
    }
}

impl MessageDocument {
    fn from_message(message: &Message) -> Self {
        Self {
            id: message.id().as_str().to_string(),
            user_id: message.user_id().as_str().to_string(),
            content: message.content().as_str().to_string(),
            timestamp: message.timestamp().value(),
            emotes: message
                .emotes()
                .iter()
                .map(|emote| EmoteDocument {
                    code: emote.code().to_string(),
                    image_url: emote.image_url().to_string(),
                })
                .collect(),
        }
    }

    fn into_message(self) -> Result<Message, ValueObjectError> {
        let emotes = self
            .emotes
            .into_iter()
            .map(|emote| Emote::new(emote.code, emote.image_url))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Message::restore(
            MessageId::new(self.id)?,
            UserId::new(self.user_id)?,
            MessageContent::new(&self.content)?,
            Timestamp::new(self.timestamp)?,
            emotes,
        ))
    }
}

impl ParticipantDocument {
    fn from_participant(participant: &ChatParticipant) -> Self {
        Self {
            user_id: participant.user_id().as_str().to_string(),
            is_moderator: participant.is_moderator(),
            badges: participant
                .badges()
                .iter()
                .map(|badge| BadgeDocument {
                    name: badge.name().to_string(),
                    image_url: badge.image_url().to_string(),
                })
                .collect(),
        }
    }

    fn into_participant(self) -> Result<ChatParticipant, ValueObjectError> {
        let badges = self
            .badges
            .into_iter()
            .map(|badge| Badge::new(badge.name, badge.image_url))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChatParticipant::new(
            UserId::new(self.user_id)?,
            self.is_moderator,
            badges,
        ))
    }
}
