//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// ChannelId validation error
    #[error("ChannelId cannot be empty")]
    ChannelIdEmpty,

    /// ChannelId too long error
    #[error("ChannelId cannot exceed {max} characters (got {actual})")]
    ChannelIdTooLong { max: usize, actual: usize },

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// Emote code validation error
    #[error("Emote code cannot be empty")]
    EmoteCodeEmpty,

    /// Emote image URL validation error
    #[error("Emote image URL must look like http(s)://<host>/<path> (got: {0})")]
    EmoteUrlInvalid(String),

    /// Badge name validation error
    #[error("Badge name must have at least {min} characters (got {actual})")]
    BadgeNameTooShort { min: usize, actual: usize },

    /// Badge image URL validation error
    #[error("Badge image URL must look like http(s)://<host>/<path> (got: {0})")]
    BadgeUrlInvalid(String),

    /// Timestamp validation error (negative)
    #[error("Timestamp cannot be negative (got {0})")]
    TimestampNegative(i64),

    /// Timestamp validation error (future beyond tolerance)
    #[error("Timestamp cannot be in the future (got {value}, now {now})")]
    TimestampInFuture { value: i64, now: i64 },
}

/// Errors related to ChatRoom domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Malformed identifier or content reached the aggregate
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    /// Sender is not connected to the room
    #[error("user '{user_id}' must be connected to send messages")]
    NotConnected { user_id: String },

    /// Sender or connecting user is banned
    #[error("user '{user_id}' is banned from this room")]
    Banned { user_id: String },

    /// Sender is muted and the timeout has not expired yet
    #[error("user '{user_id}' is muted until {expires_at}")]
    Muted { user_id: String, expires_at: i64 },

    /// Content was rejected by the moderation policy
    #[error("message content violates the room policy")]
    PolicyViolation,

    /// Moderator or target is not connected to the room
    #[error("moderator or target user '{user_id}' not found among connected participants")]
    ParticipantNotFound { user_id: String },

    /// Acting user does not carry the moderator flag
    #[error("user '{user_id}' has no moderation permission")]
    InsufficientPermission { user_id: String },

    /// A moderator cannot target themselves
    #[error("a moderator cannot apply moderation actions to themselves")]
    SelfModeration,

    /// Timeout duration missing, zero, or negative
    #[error("timeout duration must be a positive number of milliseconds")]
    InvalidDuration,

    /// Timeout duration above the allowed maximum
    #[error("timeout duration cannot exceed {max_ms} ms (got {actual_ms})")]
    DurationExceeded { max_ms: i64, actual_ms: i64 },
}
