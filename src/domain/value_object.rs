//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;
use crate::time::now_timestamp_millis;

/// Maximum length for identifier value objects
const MAX_ID_LENGTH: usize = 100;

/// Maximum length for message content (Unicode scalar values, after trimming)
pub const MAX_CONTENT_LENGTH: usize = 500;

/// Tolerance for timestamps slightly ahead of the local clock
pub const FUTURE_TOLERANCE_MS: i64 = 1_000;

/// User identifier value object.
///
/// Represents a unique identifier for a chat user. The identity is supplied
/// by the upstream authentication layer and trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::UserIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Channel identifier value object.
///
/// The channel a room belongs to. One room per channel, by convention;
/// the convention is enforced at the use-case layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a new ChannelId.
    ///
    /// # Arguments
    ///
    /// * `id` - The channel identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the ChannelId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::ChannelIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::ChannelIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
///
/// Unique within the owning room. The aggregate formats it as
/// `{room_id}-{sequence}` from its monotonic message counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Create a new MessageId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::MessageIdEmpty);
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// The content is trimmed on construction; validation applies to the
/// trimmed value (1 to 500 Unicode scalar values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw message content
    ///
    /// # Returns
    ///
    /// A Result containing the trimmed MessageContent or an error if
    /// validation fails
    pub fn new(content: &str) -> Result<Self, ValueObjectError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = trimmed.chars().count();
        if len > MAX_CONTENT_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_CONTENT_LENGTH,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC). Rejects negative
/// values and values in the future beyond a small tolerance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    ///
    /// # Returns
    ///
    /// A Result containing the Timestamp or an error if the value is
    /// negative or in the future
    pub fn new(value: i64) -> Result<Self, ValueObjectError> {
        if value < 0 {
            return Err(ValueObjectError::TimestampNegative(value));
        }
        let now = now_timestamp_millis();
        if value > now + FUTURE_TOLERANCE_MS {
            return Err(ValueObjectError::TimestampInFuture { value, now });
        }
        Ok(Self(value))
    }

    /// Create a Timestamp from the current wall clock.
    pub fn now() -> Self {
        Self(now_timestamp_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this timestamp is strictly later than `other`.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check the `scheme://host/path` shape required for decoration images.
///
/// Accepts http and https only; host and path segment must be non-empty.
fn is_valid_image_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    // '/' is a single ASCII byte, so byte positions are char boundaries
    rest.bytes()
        .enumerate()
        .any(|(i, b)| b == b'/' && i > 0 && i < rest.len() - 1)
}

/// Emote value object.
///
/// A short code plus the image URL rendered in place of the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    code: String,
    image_url: String,
}

impl Emote {
    /// Create a new Emote.
    ///
    /// # Arguments
    ///
    /// * `code` - The emote code, e.g. `"Kappa"`
    /// * `image_url` - Image URL of shape `http(s)://<host>/<path>`
    ///
    /// # Returns
    ///
    /// A Result containing the Emote or an error if validation fails
    pub fn new(code: String, image_url: String) -> Result<Self, ValueObjectError> {
        if code.trim().is_empty() {
            return Err(ValueObjectError::EmoteCodeEmpty);
        }
        if !is_valid_image_url(&image_url) {
            return Err(ValueObjectError::EmoteUrlInvalid(image_url));
        }
        Ok(Self { code, image_url })
    }

    /// Get the emote code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the image URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

/// Badge value object.
///
/// A named display decoration attached to a user (subscriber, VIP, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    name: String,
    image_url: String,
}

impl Badge {
    /// Minimum badge name length (after trimming)
    const MIN_NAME_LENGTH: usize = 2;

    /// Create a new Badge.
    ///
    /// # Arguments
    ///
    /// * `name` - The badge name, at least 2 characters
    /// * `image_url` - Image URL of shape `http(s)://<host>/<path>`
    ///
    /// # Returns
    ///
    /// A Result containing the Badge or an error if validation fails
    pub fn new(name: String, image_url: String) -> Result<Self, ValueObjectError> {
        let actual = name.trim().chars().count();
        if actual < Self::MIN_NAME_LENGTH {
            return Err(ValueObjectError::BadgeNameTooShort {
                min: Self::MIN_NAME_LENGTH,
                actual,
            });
        }
        if !is_valid_image_url(&image_url) {
            return Err(ValueObjectError::BadgeUrlInvalid(image_url));
        }
        Ok(Self { name, image_url })
    }

    /// Get the badge name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the image URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

/// Chat participant value object.
///
/// A connected user's chat-relevant identity. Immutable: changing the
/// moderator flag or badges means replacing the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParticipant {
    user_id: UserId,
    is_moderator: bool,
    badges: Vec<Badge>,
}

impl ChatParticipant {
    /// Create a new ChatParticipant.
    pub fn new(user_id: UserId, is_moderator: bool, badges: Vec<Badge>) -> Self {
        Self {
            user_id,
            is_moderator,
            badges,
        }
    }

    /// Get the user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Whether this participant carries the moderator flag.
    pub fn is_moderator(&self) -> bool {
        self.is_moderator
    }

    /// Get the badges.
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Whether this participant may apply moderation actions.
    pub fn can_moderate(&self) -> bool {
        self.is_moderator
    }

    /// Whether this participant carries a badge with the given name.
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|badge| badge.name == name)
    }
}
