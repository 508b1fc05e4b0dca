//! InMemory ChatRoom Repository 実装
//!
//! ドメイン層が定義する ChatRoomRepository trait の具体的な実装。
//! ルームごとにシリアライズ済みの JSON ドキュメントを HashMap に保持し、
//! ドキュメントストアの代替として振る舞います。
//!
//! 保存時は必ず `ドメインモデル → RoomDocument (DTO) → JSON` の変換を
//! 経由するため、MongoDB などの DBMS を実装する際も同じ DTO 層を
//! そのまま利用できます。
//!
//! 並行性はバージョントークンの楽観的排他制御で解決します。読み込んだ
//! 時点より新しいバージョンが保存されていた場合、save は
//! VersionConflict で失敗し、何も書き込みません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChannelId, ChatRoom, ChatRoomRepository, RepositoryError, RoomId},
    infrastructure::dto::document::RoomDocument,
};

/// インメモリ ChatRoom Repository 実装
///
/// HashMap をドキュメントストアとして使用する実装。
/// ドメイン層の ChatRoomRepository trait を実装します（依存性の逆転）。
pub struct InMemoryChatRoomRepository {
    /// room_id -> シリアライズ済み RoomDocument
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryChatRoomRepository {
    /// 新しい InMemoryChatRoomRepository を作成
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn decode(room_id: &str, json: &str) -> Result<ChatRoom, RepositoryError> {
        let document: RoomDocument =
            serde_json::from_str(json).map_err(|err| RepositoryError::CorruptedDocument {
                room_id: room_id.to_string(),
                reason: err.to_string(),
            })?;
        document
            .into_room()
            .map_err(|err| RepositoryError::CorruptedDocument {
                room_id: room_id.to_string(),
                reason: err.to_string(),
            })
    }
}

impl Default for InMemoryChatRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRoomRepository for InMemoryChatRoomRepository {
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<ChatRoom>, RepositoryError> {
        let documents = self.documents.lock().await;
        match documents.get(id.as_str()) {
            Some(json) => Ok(Some(Self::decode(id.as_str(), json)?)),
            None => Ok(None),
        }
    }

    async fn find_by_channel(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Option<ChatRoom>, RepositoryError> {
        let documents = self.documents.lock().await;
        for (room_id, json) in documents.iter() {
            let room = Self::decode(room_id, json)?;
            if room.channel_id() == channel_id {
                return Ok(Some(room));
            }
        }
        Ok(None)
    }

    async fn save(&self, room: &mut ChatRoom) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().await;

        // 楽観的排他制御: 保存済みバージョンと読み込み時のバージョンを比較
        if let Some(existing) = documents.get(room.id().as_str()) {
            let stored = Self::decode(room.id().as_str(), existing)?;
            if stored.version() != room.version() {
                return Err(RepositoryError::VersionConflict {
                    room_id: room.id().as_str().to_string(),
                    loaded: room.version(),
                    stored: stored.version(),
                });
            }
        }

        let mut document = RoomDocument::from_room(room);
        document.version = room.version() + 1;

        let json =
            serde_json::to_string(&document).map_err(|err| RepositoryError::CorruptedDocument {
                room_id: room.id().as_str().to_string(),
                reason: err.to_string(),
            })?;
        documents.insert(room.id().as_str().to_string(), json);
        room.advance_version();

        Ok(())
    }

    async fn delete(&self, id: &RoomId) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().await;
        documents.remove(id.as_str());
        Ok(())
    }
}
