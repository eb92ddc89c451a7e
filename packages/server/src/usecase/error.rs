//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("client '{0}' is already connected")]
    DuplicateClientId(String),
}

/// メッセージ送信処理のエラー
///
/// 送信者に対してのみ報告される非致命的なエラーです。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// ルームが存在しない、または送信者がそのルームのメンバーではない
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
