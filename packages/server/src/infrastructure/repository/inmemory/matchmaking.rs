//! InMemory マッチメイキング Repository 実装
//!
//! 在席レジストリ・待機列・ペアレジストリを単一の Mutex の内側に置き、
//! 全ての変更操作を直列化します。特に `offer_tag` はマッチ判定と
//! ペア作成を 1 回のロック取得で行うため、並行するイベントが
//! 同じ待機エントリを二重にマッチさせることはありません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, Gender, GenderCounts, MatchResult, MatchmakingRepository, PairRegistry,
    PresenceRegistry, RegisterError, RoomId, Tag, TagOutcome, Waitlist,
};

/// 単一 Mutex 配下のマッチメイキング状態
#[derive(Debug, Default)]
struct MatchmakingState {
    presence: PresenceRegistry,
    waitlist: Waitlist,
    pairs: PairRegistry,
}

/// インメモリ マッチメイキング Repository 実装
pub struct InMemoryMatchmakingRepository {
    state: Arc<Mutex<MatchmakingState>>,
}

impl InMemoryMatchmakingRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MatchmakingState::default())),
        }
    }
}

impl Default for InMemoryMatchmakingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchmakingRepository for InMemoryMatchmakingRepository {
    async fn register_client(
        &self,
        client_id: ClientId,
        gender: Gender,
    ) -> Result<(), RegisterError> {
        let mut state = self.state.lock().await;
        if !state.presence.register(client_id.clone(), gender) {
            return Err(RegisterError::DuplicateClientId(
                client_id.as_str().to_string(),
            ));
        }
        Ok(())
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut state = self.state.lock().await;
        state.presence.unregister(client_id);
    }

    async fn all_client_ids(&self) -> Vec<ClientId> {
        let state = self.state.lock().await;
        state.presence.all_client_ids()
    }

    async fn active_count(&self) -> usize {
        let state = self.state.lock().await;
        state.presence.active_count()
    }

    async fn gender_counts(&self) -> GenderCounts {
        let state = self.state.lock().await;
        state.presence.gender_counts()
    }

    async fn offer_tag(
        &self,
        client_id: ClientId,
        tag: Tag,
        gender: Gender,
        desired_partner_gender: Gender,
    ) -> TagOutcome {
        let mut state = self.state.lock().await;

        // ペア所属中の再申告は受け付けない（ペアは切断時のみ解消される）
        if state.pairs.partner_of(&client_id).is_some() {
            return TagOutcome::AlreadyPaired;
        }

        state.presence.update_gender(&client_id, gender);

        match state
            .waitlist
            .offer(tag, client_id.clone(), gender, desired_partner_gender)
        {
            MatchResult::Queued => TagOutcome::Queued,
            MatchResult::Matched(partner) => {
                // マッチ判定と同一クリティカルセクション内でペアを作成する
                let room_id = state.pairs.create_pair(client_id, partner.clone());
                TagOutcome::Paired { partner, room_id }
            }
        }
    }

    async fn withdraw(&self, tag: &Tag, client_id: &ClientId) {
        let mut state = self.state.lock().await;
        state.waitlist.withdraw(tag, client_id);
    }

    async fn withdraw_waiting(&self, client_id: &ClientId) {
        let mut state = self.state.lock().await;
        state.waitlist.withdraw_client(client_id);
    }

    async fn partner_of(&self, client_id: &ClientId) -> Option<ClientId> {
        let state = self.state.lock().await;
        state.pairs.partner_of(client_id).cloned()
    }

    async fn pair_members(&self, room_id: &RoomId) -> Option<(ClientId, ClientId)> {
        let state = self.state.lock().await;
        state.pairs.members_of(room_id).cloned()
    }

    async fn dissolve_pair(&self, client_id: &ClientId) -> Option<ClientId> {
        let mut state = self.state.lock().await;
        state.pairs.dissolve(client_id)
    }
}
