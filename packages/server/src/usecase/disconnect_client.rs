//! クライアント切断のユースケース

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{ClientId, GenderCounts, MatchmakingRepository, MessagePusher};

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// 切断時点でペアを組んでいた相手（いれば）
    pub former_partner: Option<ClientId>,
}

/// クライアント切断のユースケース
///
/// 待機列エントリの取り下げ、ペアの解消、在席解除、送信チャンネルの
/// 登録解除を行います。どの手順も冪等で、二重切断は無害です。
pub struct DisconnectClientUseCase {
    repository: Arc<dyn MatchmakingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアントの状態を全て片付ける
    pub async fn execute(&self, client_id: &ClientId) -> DisconnectOutcome {
        self.repository.withdraw_waiting(client_id).await;
        let former_partner = self.repository.dissolve_pair(client_id).await;
        self.repository.unregister_client(client_id).await;
        self.message_pusher.unregister_client(client_id).await;

        info!("client disconnected: client_id = {}", client_id.as_str());
        DisconnectOutcome { former_partner }
    }

    /// 元パートナーに切断を通知する
    ///
    /// `message` は直列化済みの JSON 文字列です。相手も既に切断していれば
    /// 何も起きません。
    pub async fn notify_peer_left(&self, partner: &ClientId, message: &str) {
        if let Err(e) = self.message_pusher.push_to(partner, message).await {
            warn!("failed to notify partner of disconnect: {}", e);
        }
    }

    /// 在席数と性別ごとの在席数のスナップショット
    pub async fn presence_snapshot(&self) -> (usize, GenderCounts) {
        let count = self.repository.active_count().await;
        let genders = self.repository.gender_counts().await;
        (count, genders)
    }

    /// 接続中の全クライアントに通知をブロードキャストする
    pub async fn broadcast_to_all(&self, message: &str) {
        let targets = self.repository.all_client_ids().await;
        if let Err(e) = self.message_pusher.broadcast(targets, message).await {
            warn!("failed to broadcast: {}", e);
        }
    }
}
