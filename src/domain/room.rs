//! ChatRoom aggregate root.

use std::collections::{HashMap, HashSet};

use super::{
    entity::Message,
    error::RoomError,
    event::DomainEvent,
    service::{ModerationAction, ModerationPolicy},
    value_object::{ChannelId, ChatParticipant, Emote, MessageId, RoomId, Timestamp, UserId},
};

/// Maximum number of messages kept in the room history
pub const MESSAGE_HISTORY_CAPACITY: usize = 100;

/// A per-channel live chat room.
///
/// The aggregate is the consistency boundary: it owns the message log, the
/// connected-participant roster, the banned-user set, and the muted-user
/// timeout map, and is the only mutator of all of them. Every mutating
/// operation either applies completely or leaves the room untouched, and
/// records the resulting domain events in a pending queue drained via
/// [`ChatRoom::take_events`].
///
/// The aggregate never reads the wall clock: callers compute a [`Timestamp`]
/// once per operation and pass it in.
#[derive(Debug, Clone)]
pub struct ChatRoom {
    id: RoomId,
    channel_id: ChannelId,
    /// Insertion order is chronological order
    messages: Vec<Message>,
    /// Unique by user id
    connected_participants: Vec<ChatParticipant>,
    banned_user_ids: HashSet<UserId>,
    /// user id -> mute expiry (Unix millis); entries expire lazily on read
    muted_until: HashMap<UserId, i64>,
    /// Monotonic message counter; survives eviction, so ids never repeat
    next_message_seq: u64,
    /// Optimistic concurrency token, managed by the repository
    version: u64,
    pending_events: Vec<DomainEvent>,
}

impl ChatRoom {
    /// Create a new empty room for the given channel.
    ///
    /// Identifier validation happens at [`RoomId`]/[`ChannelId`]
    /// construction.
    pub fn create(id: RoomId, channel_id: ChannelId) -> Self {
        Self {
            id,
            channel_id,
            messages: Vec::new(),
            connected_participants: Vec::new(),
            banned_user_ids: HashSet::new(),
            muted_until: HashMap::new(),
            next_message_seq: 0,
            version: 0,
            pending_events: Vec::new(),
        }
    }

    /// Rehydrate a room from persistence.
    ///
    /// Expired mute entries are restored as stored; they are treated as
    /// absent by every check and overwritten by the next timeout.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: RoomId,
        channel_id: ChannelId,
        messages: Vec<Message>,
        connected_participants: Vec<ChatParticipant>,
        banned_user_ids: HashSet<UserId>,
        muted_until: HashMap<UserId, i64>,
        next_message_seq: u64,
        version: u64,
    ) -> Self {
        Self {
            id,
            channel_id,
            messages,
            connected_participants,
            banned_user_ids,
            muted_until,
            next_message_seq,
            version,
            pending_events: Vec::new(),
        }
    }

    /// Publish a message to the room.
    ///
    /// Preconditions, each a distinct failure: the sender must not be
    /// banned, must be connected, must not be muted at `now`, and the
    /// content must pass the policy. On success the message is appended,
    /// a [`DomainEvent::MessageSent`] is recorded, and the oldest message
    /// is silently evicted once the history exceeds its capacity.
    ///
    /// Returns a copy of the created message.
    pub fn publish_message(
        &mut self,
        user_id: &UserId,
        content: &str,
        emotes: Vec<Emote>,
        now: Timestamp,
        policy: &ModerationPolicy,
    ) -> Result<Message, RoomError> {
        // Banned before connected: a ban also removes the connection, and a
        // banned sender must always see the ban, not the missing connection.
        if self.banned_user_ids.contains(user_id) {
            return Err(RoomError::Banned {
                user_id: user_id.as_str().to_string(),
            });
        }

        if !self.is_connected(user_id) {
            return Err(RoomError::NotConnected {
                user_id: user_id.as_str().to_string(),
            });
        }

        if let Some(expires_at) = self.muted_until.get(user_id) {
            if *expires_at > now.value() {
                return Err(RoomError::Muted {
                    user_id: user_id.as_str().to_string(),
                    expires_at: *expires_at,
                });
            }
        }

        if !policy.is_content_allowed(content) {
            return Err(RoomError::PolicyViolation);
        }

        let seq = self.next_message_seq + 1;
        let id = MessageId::new(format!("{}-{}", self.id.as_str(), seq))?;
        let message = Message::create(id, user_id.clone(), content, emotes, now)?;

        self.next_message_seq = seq;
        self.messages.push(message.clone());
        self.pending_events.push(DomainEvent::MessageSent {
            room_id: self.id.clone(),
            message: message.clone(),
        });

        // Storage-bound housekeeping, not a moderation action: no event
        if self.messages.len() > MESSAGE_HISTORY_CAPACITY {
            self.messages.remove(0);
        }

        Ok(message)
    }

    /// Connect a participant to the room.
    ///
    /// Re-connecting an already-connected user is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::Banned`] if the user is banned.
    pub fn connect(&mut self, participant: ChatParticipant) -> Result<(), RoomError> {
        if self.banned_user_ids.contains(participant.user_id()) {
            return Err(RoomError::Banned {
                user_id: participant.user_id().as_str().to_string(),
            });
        }

        if !self.is_connected(participant.user_id()) {
            self.connected_participants.push(participant);
        }
        Ok(())
    }

    /// Disconnect a user from the room.
    ///
    /// Disconnecting a user who is not connected is a no-op.
    pub fn disconnect(&mut self, user_id: &UserId) {
        self.connected_participants
            .retain(|participant| participant.user_id() != user_id);
    }

    /// Apply a moderation action to a connected user.
    ///
    /// Both the moderator and the target must currently be connected.
    /// Permission and duration rules are delegated to the policy; the
    /// effects are applied atomically and a [`DomainEvent::UserModerated`]
    /// is recorded.
    pub fn apply_moderation_action(
        &mut self,
        moderator_id: &UserId,
        target_user_id: &UserId,
        action: ModerationAction,
        duration_ms: Option<i64>,
        now: Timestamp,
        policy: &ModerationPolicy,
    ) -> Result<(), RoomError> {
        let moderator =
            self.participant(moderator_id)
                .ok_or_else(|| RoomError::ParticipantNotFound {
                    user_id: moderator_id.as_str().to_string(),
                })?;
        let target =
            self.participant(target_user_id)
                .ok_or_else(|| RoomError::ParticipantNotFound {
                    user_id: target_user_id.as_str().to_string(),
                })?;

        policy.check_moderation_allowed(moderator, target, action, duration_ms)?;

        let event_duration_ms = match action {
            ModerationAction::Ban => {
                self.banned_user_ids.insert(target_user_id.clone());
                self.disconnect(target_user_id);
                None
            }
            ModerationAction::Timeout => {
                let duration_ms = duration_ms.ok_or(RoomError::InvalidDuration)?;
                // Overwrites any prior entry: timeouts do not stack
                self.muted_until
                    .insert(target_user_id.clone(), now.value() + duration_ms);
                Some(duration_ms)
            }
        };

        self.pending_events.push(DomainEvent::UserModerated {
            user_id: target_user_id.clone(),
            room_id: self.id.clone(),
            moderator_id: moderator_id.clone(),
            action,
            duration_ms: event_duration_ms,
        });

        Ok(())
    }

    /// Drain the pending domain events, oldest first.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Get the room identifier.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Get the channel this room belongs to.
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Message history, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Currently connected participants.
    pub fn connected_participants(&self) -> &[ChatParticipant] {
        &self.connected_participants
    }

    /// Banned user ids.
    pub fn banned_user_ids(&self) -> &HashSet<UserId> {
        &self.banned_user_ids
    }

    /// Mute expiries, including entries that already lapsed.
    pub fn muted_until(&self) -> &HashMap<UserId, i64> {
        &self.muted_until
    }

    /// Monotonic message counter value.
    pub fn next_message_seq(&self) -> u64 {
        self.next_message_seq
    }

    /// Optimistic concurrency token.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Advance the concurrency token. Called by the repository after a
    /// successful save; not part of the domain behavior.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }

    /// Get a connected participant by user id.
    pub fn participant(&self, user_id: &UserId) -> Option<&ChatParticipant> {
        self.connected_participants
            .iter()
            .find(|participant| participant.user_id() == user_id)
    }

    /// Whether the user is currently connected.
    pub fn is_connected(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some()
    }

    /// Whether the user is banned.
    pub fn is_banned(&self, user_id: &UserId) -> bool {
        self.banned_user_ids.contains(user_id)
    }

    /// Whether the user is muted at the given instant.
    ///
    /// An entry whose expiry lies in the past counts as not muted; the
    /// entry itself is kept until overwritten (lazy expiry, no sweep).
    pub fn is_muted_at(&self, user_id: &UserId, now: Timestamp) -> bool {
        self.muted_until
            .get(user_id)
            .is_some_and(|expires_at| *expires_at > now.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now_timestamp_millis;

    fn room() -> ChatRoom {
        ChatRoom::create(
            RoomId::new("r1".to_string()).unwrap(),
            ChannelId::new("c1".to_string()).unwrap(),
        )
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn viewer(id: &str) -> ChatParticipant {
        ChatParticipant::new(user_id(id), false, Vec::new())
    }

    fn moderator(id: &str) -> ChatParticipant {
        ChatParticipant::new(user_id(id), true, Vec::new())
    }

    fn policy() -> ModerationPolicy {
        ModerationPolicy::new()
    }

    #[test]
    fn test_create_room_is_empty() {
        // テスト項目: 新しい ChatRoom が空の状態で作成される
        // when (操作):
        let room = room();

        // then (期待する結果):
        assert_eq!(room.id().as_str(), "r1");
        assert_eq!(room.channel_id().as_str(), "c1");
        assert!(room.messages().is_empty());
        assert!(room.connected_participants().is_empty());
        assert!(room.banned_user_ids().is_empty());
        assert!(room.muted_until().is_empty());
        assert_eq!(room.next_message_seq(), 0);
        assert_eq!(room.version(), 0);
    }

    #[test]
    fn test_connect_adds_participant() {
        // テスト項目: 参加者を接続できる
        // given (前提条件):
        let mut room = room();

        // when (操作):
        let result = room.connect(viewer("alice"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.connected_participants().len(), 1);
        assert!(room.is_connected(&user_id("alice")));
    }

    #[test]
    fn test_connect_is_idempotent() {
        // テスト項目: 接続済みユーザーの再接続は何もしない（エラーにもならない）
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();

        // when (操作): モデレーターフラグを変えて再接続を試みる
        let result = room.connect(moderator("alice"));

        // then (期待する結果): 既存の参加者がそのまま残る
        assert!(result.is_ok());
        assert_eq!(room.connected_participants().len(), 1);
        assert!(!room.connected_participants()[0].is_moderator());
    }

    #[test]
    fn test_connect_banned_user_fails() {
        // テスト項目: ban 済みユーザーは接続できない
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        )
        .unwrap();

        // when (操作):
        let result = room.connect(viewer("alice"));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::Banned {
                user_id: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_disconnect_removes_participant() {
        // テスト項目: 参加者を切断できる
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();
        room.connect(viewer("bob")).unwrap();

        // when (操作):
        room.disconnect(&user_id("alice"));

        // then (期待する結果):
        assert_eq!(room.connected_participants().len(), 1);
        assert!(!room.is_connected(&user_id("alice")));
        assert!(room.is_connected(&user_id("bob")));
    }

    #[test]
    fn test_disconnect_unknown_user_is_noop() {
        // テスト項目: 未接続ユーザーの切断は何もしない
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();

        // when (操作):
        room.disconnect(&user_id("ghost"));

        // then (期待する結果):
        assert_eq!(room.connected_participants().len(), 1);
    }

    #[test]
    fn test_publish_message_success() {
        // テスト項目: 接続中のユーザーはメッセージを投稿でき、イベントが記録される
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();

        // when (操作):
        let result = room.publish_message(
            &user_id("alice"),
            "hello",
            Vec::new(),
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.id().as_str(), "r1-1");
        assert_eq!(message.content().as_str(), "hello");
        assert_eq!(room.messages().len(), 1);

        let events = room.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::MessageSent {
                room_id,
                message: sent,
            } => {
                assert_eq!(room_id.as_str(), "r1");
                assert_eq!(sent, &message);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_publish_message_not_connected_fails() {
        // テスト項目: 未接続ユーザーは投稿できず、状態もイベントも変化しない
        // given (前提条件):
        let mut room = room();

        // when (操作):
        let result = room.publish_message(
            &user_id("alice"),
            "hello",
            Vec::new(),
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::NotConnected {
                user_id: "alice".to_string()
            }
        );
        assert!(room.messages().is_empty());
        assert!(room.take_events().is_empty());
        assert_eq!(room.next_message_seq(), 0);
    }

    #[test]
    fn test_publish_message_banned_fails() {
        // テスト項目: ban されたユーザーの投稿は BannedError になる
        // given (前提条件): ban は接続も解除するが、エラーは Banned のまま
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        )
        .unwrap();
        room.take_events();

        // when (操作):
        let result = room.publish_message(
            &user_id("alice"),
            "hello",
            Vec::new(),
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::Banned {
                user_id: "alice".to_string()
            }
        );
        assert!(room.messages().is_empty());
        assert!(room.take_events().is_empty());
    }

    #[test]
    fn test_publish_message_muted_fails_until_expiry() {
        // テスト項目: timeout 中の投稿は Muted になり、期限が過ぎると投稿できる
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();

        // 70 秒前に 60 秒の timeout が適用された
        let applied_at = Timestamp::new(now_timestamp_millis() - 70_000).unwrap();
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Timeout,
            Some(60_000),
            applied_at,
            &policy(),
        )
        .unwrap();
        room.take_events();

        // when (操作): 期限前（適用 30 秒後）の投稿
        let during_mute = Timestamp::new(applied_at.value() + 30_000).unwrap();
        let muted_result = room.publish_message(
            &user_id("alice"),
            "hello",
            Vec::new(),
            during_mute,
            &policy(),
        );

        // then (期待する結果): Muted で拒否される
        assert_eq!(
            muted_result.unwrap_err(),
            RoomError::Muted {
                user_id: "alice".to_string(),
                expires_at: applied_at.value() + 60_000
            }
        );

        // when (操作): 期限後（現在時刻）の投稿
        let after_expiry =
            room.publish_message(&user_id("alice"), "hello", Vec::new(), Timestamp::now(), &policy());

        // then (期待する結果): 投稿できる（エントリは残ったまま）
        assert!(after_expiry.is_ok());
        assert!(room.muted_until().contains_key(&user_id("alice")));
    }

    #[test]
    fn test_publish_message_policy_violation_fails() {
        // テスト項目: ポリシー違反の内容は PolicyViolation になる
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();

        // when (操作):
        let result = room.publish_message(
            &user_id("alice"),
            "aaaaaaaaaaaa",
            Vec::new(),
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RoomError::PolicyViolation);
        assert!(room.messages().is_empty());
        assert!(room.take_events().is_empty());
    }

    #[test]
    fn test_publish_message_too_long_content_fails_as_validation() {
        // テスト項目: 501 文字の内容は ValidationError として拒否される
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();
        let content = "a b".repeat(200); // 600 文字、繰り返し文字ではない

        // when (操作):
        let result = room.publish_message(
            &user_id("alice"),
            &content,
            Vec::new(),
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert!(matches!(result.unwrap_err(), RoomError::Validation(_)));
        assert!(room.messages().is_empty());
        assert!(room.take_events().is_empty());
        assert_eq!(room.next_message_seq(), 0);
    }

    #[test]
    fn test_publish_message_evicts_oldest_beyond_capacity() {
        // テスト項目: 101 件目の投稿で最古のメッセージだけが追い出される
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();

        // when (操作): 101 件投稿する
        for i in 1..=101 {
            room.publish_message(
                &user_id("alice"),
                &format!("message {i}"),
                Vec::new(),
                Timestamp::now(),
                &policy(),
            )
            .unwrap();
        }

        // then (期待する結果): 先頭が 2 件目になり、順序は保たれる
        assert_eq!(room.messages().len(), 100);
        assert_eq!(room.messages()[0].id().as_str(), "r1-2");
        assert_eq!(room.messages()[99].id().as_str(), "r1-101");
        assert_eq!(room.messages()[0].content().as_str(), "message 2");

        // 連番は追い出し後も巻き戻らない
        assert_eq!(room.next_message_seq(), 101);
        let next = room
            .publish_message(
                &user_id("alice"),
                "one more",
                Vec::new(),
                Timestamp::now(),
                &policy(),
            )
            .unwrap();
        assert_eq!(next.id().as_str(), "r1-102");
    }

    #[test]
    fn test_ban_moves_user_from_roster_to_ban_set() {
        // テスト項目: ban で対象が接続リストから外れ、ban セットに入る
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();

        // when (操作):
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        )
        .unwrap();

        // then (期待する結果): connected と banned の両方に現れることはない
        assert!(!room.is_connected(&user_id("alice")));
        assert!(room.is_banned(&user_id("alice")));

        let events = room.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            DomainEvent::UserModerated {
                user_id: user_id("alice"),
                room_id: RoomId::new("r1".to_string()).unwrap(),
                moderator_id: user_id("mod"),
                action: ModerationAction::Ban,
                duration_ms: None,
            }
        );
    }

    #[test]
    fn test_timeout_sets_expiry_and_overwrites() {
        // テスト項目: timeout は期限を設定し、再適用で上書きされる（加算されない）
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();
        let now = Timestamp::now();

        // when (操作): 60 秒の timeout の後に 10 秒の timeout を適用
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Timeout,
            Some(60_000),
            now,
            &policy(),
        )
        .unwrap();
        room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Timeout,
            Some(10_000),
            now,
            &policy(),
        )
        .unwrap();

        // then (期待する結果): 期限は最後の適用で上書きされている
        assert_eq!(
            room.muted_until().get(&user_id("alice")),
            Some(&(now.value() + 10_000))
        );
        assert!(room.is_muted_at(&user_id("alice"), now));
        assert!(room.is_connected(&user_id("alice"))); // timeout は接続を維持する

        let events = room.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            DomainEvent::UserModerated {
                user_id: user_id("alice"),
                room_id: RoomId::new("r1".to_string()).unwrap(),
                moderator_id: user_id("mod"),
                action: ModerationAction::Timeout,
                duration_ms: Some(10_000),
            }
        );
    }

    #[test]
    fn test_moderation_requires_both_parties_connected() {
        // テスト項目: モデレーターまたは対象が未接続なら ParticipantNotFound になる
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();

        // when (操作): 未接続ユーザーを対象にする
        let result = room.apply_moderation_action(
            &user_id("mod"),
            &user_id("ghost"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::ParticipantNotFound {
                user_id: "ghost".to_string()
            }
        );

        // when (操作): 未接続のモデレーター
        let result = room.apply_moderation_action(
            &user_id("ghost-mod"),
            &user_id("mod"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::ParticipantNotFound {
                user_id: "ghost-mod".to_string()
            }
        );
        assert!(room.take_events().is_empty());
    }

    #[test]
    fn test_self_moderation_fails_regardless_of_flag() {
        // テスト項目: モデレーターでも自分自身は ban できない
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();

        // when (操作):
        let result = room.apply_moderation_action(
            &user_id("mod"),
            &user_id("mod"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RoomError::SelfModeration);
        assert!(room.is_connected(&user_id("mod")));
        assert!(!room.is_banned(&user_id("mod")));
        assert!(room.take_events().is_empty());
    }

    #[test]
    fn test_invalid_timeout_duration_never_mutates() {
        // テスト項目: 不正な duration の timeout は muted_until を変化させない
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();

        // when (操作) / then (期待する結果):
        for duration_ms in [None, Some(0), Some(-5), Some(86_400_001)] {
            let result = room.apply_moderation_action(
                &user_id("mod"),
                &user_id("alice"),
                ModerationAction::Timeout,
                duration_ms,
                Timestamp::now(),
                &policy(),
            );
            assert!(result.is_err());
            assert!(room.muted_until().is_empty());
            assert!(room.take_events().is_empty());
        }
    }

    #[test]
    fn test_moderating_disconnected_user_is_rejected() {
        // テスト項目: 退出済みユーザーへのモデレーションはこの経路では適用できない
        // given (前提条件):
        let mut room = room();
        room.connect(moderator("mod")).unwrap();
        room.connect(viewer("alice")).unwrap();
        room.disconnect(&user_id("alice"));

        // when (操作):
        let result = room.apply_moderation_action(
            &user_id("mod"),
            &user_id("alice"),
            ModerationAction::Ban,
            None,
            Timestamp::now(),
            &policy(),
        );

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::ParticipantNotFound {
                user_id: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_take_events_drains_queue() {
        // テスト項目: take_events はイベントを取り出してキューを空にする
        // given (前提条件):
        let mut room = room();
        room.connect(viewer("alice")).unwrap();
        room.publish_message(
            &user_id("alice"),
            "hello",
            Vec::new(),
            Timestamp::now(),
            &policy(),
        )
        .unwrap();

        // when (操作):
        let first = room.take_events();
        let second = room.take_events();

        // then (期待する結果):
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
