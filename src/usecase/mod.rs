//! UseCase 層
//!
//! ビジネスロジックの入口となるレイヤー。トランスポート層から呼び出され、
//! ルームの取得 → 集約の操作 → 保存 → イベント発行の順で処理します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod moderate_chat;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ErrorClass, UseCaseError};
pub use moderate_chat::ModerateChatUseCase;
pub use send_message::SendMessageUseCase;
