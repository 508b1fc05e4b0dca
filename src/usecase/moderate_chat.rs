//! UseCase: モデレーション処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ModerateChatUseCase::execute() メソッド
//! - モデレーション処理（ban / timeout の適用、UserModerated イベントの発行）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：権限・対象・期間のルールは集約とポリシーに委譲される
//! - 適用後の状態（ban セット、muted_until）が永続化されることを確認
//! - ルール違反時に状態が保存されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ban の適用、timeout の適用
//! - 異常系：存在しないルーム、権限なし、自己モデレーション、不正な期間
//! - エッジケース：ban 済みユーザーへの再適用（対象が接続リストにいない）

use std::sync::Arc;

use crate::domain::{
    ChatRoomRepository, EventPublisher, ModerationAction, ModerationPolicy, RoomId, Timestamp,
    UserId,
};

use super::error::UseCaseError;

/// モデレーションのユースケース
pub struct ModerateChatUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRoomRepository>,
    /// ドメインイベントの発行先
    publisher: Arc<dyn EventPublisher>,
    /// 権限・期間検証のポリシー（ステートレス）
    policy: ModerationPolicy,
}

impl ModerateChatUseCase {
    /// 新しい ModerateChatUseCase を作成
    pub fn new(repository: Arc<dyn ChatRoomRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
            policy: ModerationPolicy::new(),
        }
    }

    /// モデレーションアクションを実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（Domain Model）
    /// * `moderator_id` - モデレーターのユーザー ID
    /// * `target_user_id` - 対象ユーザーの ID
    /// * `action` - 適用するアクション（ban / timeout）
    /// * `duration_ms` - timeout の期間（ミリ秒、ban では無視される）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 適用成功
    /// * `Err(UseCaseError)` - 適用失敗
    pub async fn execute(
        &self,
        room_id: RoomId,
        moderator_id: UserId,
        target_user_id: UserId,
        action: ModerationAction,
        duration_ms: Option<i64>,
    ) -> Result<(), UseCaseError> {
        // 1. Repository からルームを取得
        let mut room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound {
                room_id: room_id.as_str().to_string(),
            })?;

        // 2. 集約を操作（権限・期間の検証はポリシーに委譲される）
        let now = Timestamp::now();
        if let Err(err) = room.apply_moderation_action(
            &moderator_id,
            &target_user_id,
            action,
            duration_ms,
            now,
            &self.policy,
        ) {
            tracing::warn!(
                "Rejected {} by '{}' on '{}' in room '{}': {}",
                action,
                moderator_id,
                target_user_id,
                room_id,
                err
            );
            return Err(err.into());
        }

        // 3. 保存に成功してからイベントを発行
        self.repository.save(&mut room).await?;
        self.publisher.publish_all(room.take_events()).await;

        tracing::info!(
            "Applied {} to '{}' in room '{}' by '{}'",
            action,
            target_user_id,
            room_id,
            moderator_id
        );
        Ok(())
    }
}
