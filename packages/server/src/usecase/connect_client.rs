//! クライアント接続のユースケース

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    ClientId, Gender, GenderCounts, MatchmakingRepository, MessagePusher, PusherChannel,
    RegisterError,
};
use crate::usecase::error::ConnectError;

/// クライアント接続のユースケース
///
/// 在席登録と送信チャンネルの登録を行います。ID が重複している場合は
/// 接続を拒否します。
pub struct ConnectClientUseCase {
    repository: Arc<dyn MatchmakingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアントを在席登録し、送信チャンネルを紐付ける
    pub async fn execute(
        &self,
        client_id: ClientId,
        gender: Gender,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        self.repository
            .register_client(client_id.clone(), gender)
            .await
            .map_err(|RegisterError::DuplicateClientId(id)| ConnectError::DuplicateClientId(id))?;
        self.message_pusher
            .register_client(client_id.clone(), sender)
            .await;

        info!("client connected: client_id = {}", client_id.as_str());
        Ok(())
    }

    /// 在席数と性別ごとの在席数のスナップショット
    pub async fn presence_snapshot(&self) -> (usize, GenderCounts) {
        let count = self.repository.active_count().await;
        let genders = self.repository.gender_counts().await;
        (count, genders)
    }

    /// 接続中の全クライアントに通知をブロードキャストする
    ///
    /// `message` は直列化済みの JSON 文字列です。
    pub async fn broadcast_to_all(&self, message: &str) {
        let targets = self.repository.all_client_ids().await;
        if let Err(e) = self.message_pusher.broadcast(targets, message).await {
            tracing::warn!("failed to broadcast: {}", e);
        }
    }
}
