//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（ルームの取得、集約の操作、保存、イベント発行）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：投稿の前提条件はすべて集約に委譲される
//! - 保存成功後にのみ MessageSent イベントが発行されることを確認
//! - 存在しないルームへの送信が RoomNotFound になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とイベント発行
//! - 異常系：存在しないルーム、ドメインルール違反（未接続・ミュート中など）
//! - エッジケース：ドメインルール違反時に保存が行われないこと

use std::sync::Arc;

use crate::domain::{
    ChatRoomRepository, Emote, EventPublisher, Message, ModerationPolicy, RoomId, Timestamp,
    UserId,
};

use super::error::UseCaseError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRoomRepository>,
    /// ドメインイベントの発行先
    publisher: Arc<dyn EventPublisher>,
    /// コンテンツ検証のポリシー（ステートレス）
    policy: ModerationPolicy,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ChatRoomRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
            policy: ModerationPolicy::new(),
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 送信先ルームの ID（Domain Model）
    /// * `user_id` - メッセージ送信者のユーザー ID（Domain Model）
    /// * `content` - メッセージ内容（未検証の生文字列）
    /// * `emotes` - メッセージに含まれるエモート
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 作成されたメッセージ
    /// * `Err(UseCaseError)` - 送信失敗
    pub async fn execute(
        &self,
        room_id: RoomId,
        user_id: UserId,
        content: String,
        emotes: Vec<Emote>,
    ) -> Result<Message, UseCaseError> {
        // 1. Repository からルームを取得
        let mut room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound {
                room_id: room_id.as_str().to_string(),
            })?;

        // 2. 集約を操作（前提条件の検証はすべて集約の責務）
        let now = Timestamp::now();
        let message = match room.publish_message(&user_id, &content, emotes, now, &self.policy) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!("Rejected message from '{}' in room '{}': {}", user_id, room_id, err);
                return Err(err.into());
            }
        };

        // 3. 保存に成功してからイベントを発行
        self.repository.save(&mut room).await?;
        self.publisher.publish_all(room.take_events()).await;

        tracing::info!("Message '{}' published to room '{}'", message.id(), room_id);
        Ok(message)
    }
}
