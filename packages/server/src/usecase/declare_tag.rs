//! タグ申告のユースケース

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{ClientId, Gender, MatchmakingRepository, MessagePusher, Tag, TagOutcome};

/// タグ申告のユースケース
///
/// 申告は Repository 内で単一のクリティカルセクションとして処理され、
/// マッチ成立時はペア作成まで済んだ結果が返ります。
pub struct DeclareTagUseCase {
    repository: Arc<dyn MatchmakingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DeclareTagUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// タグを申告する
    pub async fn execute(
        &self,
        client_id: ClientId,
        tag: Tag,
        gender: Gender,
        desired_partner_gender: Gender,
    ) -> TagOutcome {
        let outcome = self
            .repository
            .offer_tag(client_id.clone(), tag.clone(), gender, desired_partner_gender)
            .await;

        match &outcome {
            TagOutcome::Queued => {
                info!(
                    "client queued: client_id = {}, tag = {}",
                    client_id.as_str(),
                    tag.as_str()
                );
            }
            TagOutcome::Paired { partner, room_id } => {
                info!(
                    "pair created: room_id = {}, clients = [{}, {}]",
                    room_id.as_str(),
                    client_id.as_str(),
                    partner.as_str()
                );
            }
            TagOutcome::AlreadyPaired => {
                warn!(
                    "tag declared while paired: client_id = {}",
                    client_id.as_str()
                );
            }
        }
        outcome
    }

    /// マッチ成立を両側に通知する
    ///
    /// `client_message` / `partner_message` は直列化済みの JSON 文字列です。
    /// どちらかが到達不能でも残りへの送信は続行します。
    pub async fn notify_matched(
        &self,
        client_id: &ClientId,
        client_message: &str,
        partner: &ClientId,
        partner_message: &str,
    ) {
        if let Err(e) = self.message_pusher.push_to(client_id, client_message).await {
            warn!("failed to notify client of match: {}", e);
        }
        if let Err(e) = self.message_pusher.push_to(partner, partner_message).await {
            warn!("failed to notify partner of match: {}", e);
        }
    }
}
