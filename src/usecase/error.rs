//! UseCase 層のエラー定義
//!
//! ドメインエラーとリポジトリエラーを集約し、トランスポート層が必要とする
//! 分類（クライアント起因 / サーバー起因）だけを公開します。

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// Failure classification for the transport boundary.
///
/// This is the only contract a transport layer needs: `Client` maps to a
/// 400-class response, `Server` to a 500-class response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-caused rule violation, recoverable by the caller
    Client,
    /// Infrastructure fault, not attributable to the caller
    Server,
}

/// Errors surfaced by the use-case layer.
///
/// The use case performs no recovery: every failure propagates to the
/// transport boundary unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// The repository returned nothing for the requested room
    #[error("chat room '{room_id}' not found")]
    RoomNotFound { room_id: String },

    /// A rule violation raised by the aggregate or the policy
    #[error(transparent)]
    Domain(#[from] RoomError),

    /// A persistence fault
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValueObjectError> for UseCaseError {
    fn from(err: ValueObjectError) -> Self {
        Self::Domain(RoomError::Validation(err))
    }
}

impl UseCaseError {
    /// Classify this failure for the transport boundary.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::RoomNotFound { .. } | Self::Domain(_) => ErrorClass::Client,
            Self::Repository(_) => ErrorClass::Server,
        }
    }
}
