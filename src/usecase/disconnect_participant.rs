//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の切断処理（接続リストからの削除と保存）
//!
//! ### なぜこのテストが必要か
//! - 切断が永続化された状態に反映されることを確認
//! - 未接続ユーザーの切断が冪等であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断
//! - エッジケース：未接続ユーザーの切断（何も起きない）
//! - 異常系：存在しないルーム

use std::sync::Arc;

use crate::domain::{ChatRoomRepository, RoomId, UserId};

use super::error::UseCaseError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRoomRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ChatRoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（Domain Model）
    /// * `user_id` - 切断するユーザーの ID
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 切断成功（未接続でも成功扱い）
    /// * `Err(UseCaseError)` - 切断失敗
    pub async fn execute(&self, room_id: RoomId, user_id: UserId) -> Result<(), UseCaseError> {
        let mut room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound {
                room_id: room_id.as_str().to_string(),
            })?;

        room.disconnect(&user_id);
        self.repository.save(&mut room).await?;

        tracing::info!("User '{}' disconnected from room '{}'", user_id, room_id);
        Ok(())
    }
}
