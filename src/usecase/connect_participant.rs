//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 参加者の接続処理（チャンネルに対応するルームの取得または作成、接続）
//!
//! ### なぜこのテストが必要か
//! - 「1 チャンネルにつき 1 ルーム」の運用規約はこの層が担う
//! - 初回接続でルームが作成されることを確認
//! - ban 済みユーザーの再接続が拒否されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回接続（ルーム作成）、既存ルームへの接続
//! - 異常系：ban 済みユーザーの接続試行
//! - エッジケース：接続済みユーザーの再接続（冪等）

use std::sync::Arc;

use crate::domain::{ChannelId, ChatParticipant, ChatRoom, ChatRoomRepository, RoomId, RoomIdFactory};

use super::error::UseCaseError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRoomRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ChatRoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者接続を実行
    ///
    /// チャンネルにルームがなければ作成する（1 チャンネルにつき 1 ルーム、
    /// 運用規約としてこの層で維持する）。
    ///
    /// # Arguments
    ///
    /// * `channel_id` - 接続先チャンネルの ID（Domain Model）
    /// * `participant` - 接続する参加者
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 接続したルームの ID
    /// * `Err(UseCaseError)` - 接続失敗
    pub async fn execute(
        &self,
        channel_id: ChannelId,
        participant: ChatParticipant,
    ) -> Result<RoomId, UseCaseError> {
        // 1. チャンネルに対応するルームを取得、なければ作成
        let mut room = match self.repository.find_by_channel(&channel_id).await? {
            Some(room) => room,
            None => {
                let room_id = RoomIdFactory::generate()?;
                tracing::info!("Creating room '{}' for channel '{}'", room_id, channel_id);
                ChatRoom::create(room_id, channel_id)
            }
        };

        // 2. 集約に接続（ban チェックは集約の責務）
        let user_id = participant.user_id().clone();
        room.connect(participant)?;

        // 3. 保存
        self.repository.save(&mut room).await?;

        tracing::info!("User '{}' connected to room '{}'", user_id, room.id());
        Ok(room.id().clone())
    }
}
