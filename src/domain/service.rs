//! Domain services for the chat room.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{error::RoomError, value_object::ChatParticipant};

/// Maximum timeout duration (24 hours, in milliseconds)
pub const MAX_TIMEOUT_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// A single character repeated this many times consecutively marks spam
const MAX_CONSECUTIVE_REPEATS: usize = 10;

/// Kind of moderation action a moderator can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// Permanent removal from the room
    Ban,
    /// Time-bounded mute
    Timeout,
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ban => write!(f, "ban"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// Stateless moderation rules.
///
/// Decides whether content may be posted and whether a moderation action is
/// permitted. Carries no state and no aggregate identity: it returns a
/// decision, and the aggregate alone constructs events with the correct
/// identifiers. Injected per call, never owned by the aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModerationPolicy;

impl ModerationPolicy {
    /// Create a new ModerationPolicy.
    pub fn new() -> Self {
        Self
    }

    /// Whether the given content may be posted.
    ///
    /// Rejects empty/whitespace-only content and content where a single
    /// character repeats 10 or more times consecutively. Everything else
    /// passes; a banned-word list is an extension point, not implemented.
    pub fn is_content_allowed(&self, content: &str) -> bool {
        if content.trim().is_empty() {
            return false;
        }

        let mut previous: Option<char> = None;
        let mut run = 0usize;
        for current in content.chars() {
            if previous == Some(current) {
                run += 1;
            } else {
                run = 1;
                previous = Some(current);
            }
            if run >= MAX_CONSECUTIVE_REPEATS {
                return false;
            }
        }
        true
    }

    /// Whether `moderator` may apply `action` to `target`.
    ///
    /// # Errors
    ///
    /// * [`RoomError::InsufficientPermission`] - moderator flag missing
    /// * [`RoomError::SelfModeration`] - moderator targets themselves
    /// * [`RoomError::InvalidDuration`] - timeout without a positive duration
    /// * [`RoomError::DurationExceeded`] - timeout longer than 24 hours
    pub fn check_moderation_allowed(
        &self,
        moderator: &ChatParticipant,
        target: &ChatParticipant,
        action: ModerationAction,
        duration_ms: Option<i64>,
    ) -> Result<(), RoomError> {
        if !moderator.can_moderate() {
            return Err(RoomError::InsufficientPermission {
                user_id: moderator.user_id().as_str().to_string(),
            });
        }

        if moderator.user_id() == target.user_id() {
            return Err(RoomError::SelfModeration);
        }

        if action == ModerationAction::Timeout {
            let duration_ms = match duration_ms {
                Some(duration_ms) if duration_ms > 0 => duration_ms,
                _ => return Err(RoomError::InvalidDuration),
            };
            if duration_ms > MAX_TIMEOUT_DURATION_MS {
                return Err(RoomError::DurationExceeded {
                    max_ms: MAX_TIMEOUT_DURATION_MS,
                    actual_ms: duration_ms,
                });
            }
        }

        Ok(())
    }
}
