//! メッセージ送信のユースケース

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::domain::{
    censor, Blacklist, ClientId, GroupRoomRepository, MatchmakingRepository, MessageContent,
    MessagePusher, RoomId,
};
use crate::usecase::error::SendMessageError;

/// リレー計画
///
/// 検閲済み本文と配信先のリストです。送信者自身は含まれません
/// （エコーは配信時に別途行います）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPlan {
    pub censored_text: String,
    pub recipients: Vec<ClientId>,
}

/// メッセージ送信のユースケース
///
/// ペアルーム・グループルームの両経路で、配信前に必ず検閲を通します。
pub struct SendMessageUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
    groups: Arc<dyn GroupRoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    blacklist: Arc<Blacklist>,
}

impl SendMessageUseCase {
    pub fn new(
        matchmaking: Arc<dyn MatchmakingRepository>,
        groups: Arc<dyn GroupRoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        blacklist: Arc<Blacklist>,
    ) -> Self {
        Self {
            matchmaking,
            groups,
            message_pusher,
            blacklist,
        }
    }

    /// ペアルーム宛てメッセージのリレー計画を立てる
    ///
    /// 送信者がそのルームのメンバーでない場合もルーム不存在として扱います。
    pub async fn plan_pair_message(
        &self,
        sender: &ClientId,
        room_id: &RoomId,
        content: &MessageContent,
    ) -> Result<RelayPlan, SendMessageError> {
        let (a, b) = self
            .matchmaking
            .pair_members(room_id)
            .await
            .ok_or_else(|| SendMessageError::RoomNotFound(room_id.as_str().to_string()))?;
        let recipient = if *sender == a {
            b
        } else if *sender == b {
            a
        } else {
            return Err(SendMessageError::RoomNotFound(room_id.as_str().to_string()));
        };

        Ok(RelayPlan {
            censored_text: censor(content.as_str(), &self.blacklist),
            recipients: vec![recipient],
        })
    }

    /// グループルーム宛てメッセージのリレー計画を立てる
    pub async fn plan_group_message(
        &self,
        sender: &ClientId,
        room_id: &RoomId,
        content: &MessageContent,
    ) -> Result<RelayPlan, SendMessageError> {
        let members = self
            .groups
            .members_of(room_id)
            .await
            .ok_or_else(|| SendMessageError::RoomNotFound(room_id.as_str().to_string()))?;
        if !members.contains(sender) {
            return Err(SendMessageError::RoomNotFound(room_id.as_str().to_string()));
        }

        // 重複参加でメンバーリストに同じ ID が複数回現れても配信は 1 回
        let mut seen = HashSet::new();
        let recipients = members
            .into_iter()
            .filter(|m| m != sender && seen.insert(m.clone()))
            .collect();

        Ok(RelayPlan {
            censored_text: censor(content.as_str(), &self.blacklist),
            recipients,
        })
    }

    /// 計画に従って配信し、送信者にもエコーする
    ///
    /// `message` は直列化済みの JSON 文字列です。配信はベストエフォートで、
    /// 到達不能な受信者はスキップします。
    pub async fn deliver(&self, sender: &ClientId, recipients: Vec<ClientId>, message: &str) {
        if let Err(e) = self.message_pusher.broadcast(recipients, message).await {
            warn!("failed to relay message: {}", e);
        }
        if let Err(e) = self.message_pusher.push_to(sender, message).await {
            warn!("failed to echo message to sender: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, RoomName, Tag, TagOutcome};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::repository::{
        InMemoryGroupRoomRepository, InMemoryMatchmakingRepository,
    };
    use tokio::sync::mpsc;

    struct Fixture {
        matchmaking: Arc<InMemoryMatchmakingRepository>,
        groups: Arc<InMemoryGroupRoomRepository>,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: SendMessageUseCase,
    }

    fn fixture() -> Fixture {
        let matchmaking = Arc::new(InMemoryMatchmakingRepository::new());
        let groups = Arc::new(InMemoryGroupRoomRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = SendMessageUseCase::new(
            matchmaking.clone(),
            groups.clone(),
            pusher.clone(),
            Arc::new(Blacklist::builtin()),
        );
        Fixture {
            matchmaking,
            groups,
            pusher,
            usecase,
        }
    }

    async fn connect(
        fixture: &Fixture,
        id: &str,
        gender: Gender,
    ) -> (ClientId, mpsc::UnboundedReceiver<String>) {
        let client_id = ClientId::new(id.to_string()).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        fixture
            .matchmaking
            .register_client(client_id.clone(), gender)
            .await
            .unwrap();
        fixture.pusher.register_client(client_id.clone(), tx).await;
        (client_id, rx)
    }

    async fn paired_room(fixture: &Fixture, alice: &ClientId, bob: &ClientId) -> RoomId {
        let tag = Tag::new("movies".to_string()).unwrap();
        fixture
            .matchmaking
            .offer_tag(alice.clone(), tag.clone(), Gender::Female, Gender::Male)
            .await;
        match fixture
            .matchmaking
            .offer_tag(bob.clone(), tag, Gender::Male, Gender::Female)
            .await
        {
            TagOutcome::Paired { room_id, .. } => room_id,
            other => panic!("expected Paired, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pair_message_goes_to_partner_only() {
        // テスト項目: ペアメッセージがパートナーにのみ計画される
        // given (前提条件):
        let fixture = fixture();
        let (alice, _rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let (bob, _rx_b) = connect(&fixture, "bob", Gender::Male).await;
        let room_id = paired_room(&fixture, &alice, &bob).await;

        // when (操作):
        let plan = fixture
            .usecase
            .plan_pair_message(
                &alice,
                &room_id,
                &MessageContent::new("hello".to_string()).unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(plan.recipients, vec![bob]);
        assert_eq!(plan.censored_text, "hello");
    }

    #[tokio::test]
    async fn test_pair_message_is_censored_before_relay() {
        // テスト項目: ブラックリスト語が配信前に伏せ字になる
        // given (前提条件):
        let fixture = fixture();
        let (alice, _rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let (bob, _rx_b) = connect(&fixture, "bob", Gender::Male).await;
        let room_id = paired_room(&fixture, &alice, &bob).await;

        // when (操作):
        let plan = fixture
            .usecase
            .plan_pair_message(
                &alice,
                &room_id,
                &MessageContent::new("you are STUPID".to_string()).unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(plan.censored_text, "you are ******");
    }

    #[tokio::test]
    async fn test_message_to_unknown_room_is_rejected() {
        // テスト項目: 存在しないルーム宛ては RoomNotFound になる
        // given (前提条件):
        let fixture = fixture();
        let (alice, _rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let ghost_room = RoomId::new("no-such-room".to_string()).unwrap();

        // when (操作):
        let result = fixture
            .usecase
            .plan_pair_message(
                &alice,
                &ghost_room,
                &MessageContent::new("hello".to_string()).unwrap(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::RoomNotFound("no-such-room".to_string()))
        );
    }

    #[tokio::test]
    async fn test_pair_message_from_outsider_is_rejected() {
        // テスト項目: ペアの部外者からの送信はルーム不存在として扱う
        // given (前提条件):
        let fixture = fixture();
        let (alice, _rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let (bob, _rx_b) = connect(&fixture, "bob", Gender::Male).await;
        let (carol, _rx_c) = connect(&fixture, "carol", Gender::Female).await;
        let room_id = paired_room(&fixture, &alice, &bob).await;

        // when (操作):
        let result = fixture
            .usecase
            .plan_pair_message(
                &carol,
                &room_id,
                &MessageContent::new("hi".to_string()).unwrap(),
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::RoomNotFound(_))));
    }

    #[tokio::test]
    async fn test_group_message_reaches_other_members_once() {
        // テスト項目: グループメッセージが送信者以外の各メンバーに 1 回ずつ計画される
        // given (前提条件): carol は重複参加している
        let fixture = fixture();
        let (alice, _rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let (bob, _rx_b) = connect(&fixture, "bob", Gender::Male).await;
        let (carol, _rx_c) = connect(&fixture, "carol", Gender::Female).await;
        let room = fixture
            .groups
            .create_room(
                RoomName::new("lounge".to_string()).unwrap(),
                false,
                None,
                alice.clone(),
            )
            .await
            .unwrap();
        fixture
            .groups
            .join_room(&room.id, None, bob.clone())
            .await
            .unwrap();
        fixture
            .groups
            .join_room(&room.id, None, carol.clone())
            .await
            .unwrap();
        fixture
            .groups
            .join_room(&room.id, None, carol.clone())
            .await
            .unwrap();

        // when (操作):
        let plan = fixture
            .usecase
            .plan_group_message(
                &alice,
                &room.id,
                &MessageContent::new("hello all".to_string()).unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(plan.recipients, vec![bob, carol]);
    }

    #[tokio::test]
    async fn test_deliver_echoes_to_sender() {
        // テスト項目: 配信で送信者にもエコーされる
        // given (前提条件):
        let fixture = fixture();
        let (alice, mut rx_a) = connect(&fixture, "alice", Gender::Female).await;
        let (bob, mut rx_b) = connect(&fixture, "bob", Gender::Male).await;

        // when (操作):
        fixture
            .usecase
            .deliver(&alice, vec![bob], r#"{"type":"message","sender":"alice","message":"hi"}"#)
            .await;

        // then (期待する結果):
        assert_eq!(
            rx_b.recv().await.unwrap(),
            r#"{"type":"message","sender":"alice","message":"hi"}"#
        );
        assert_eq!(
            rx_a.recv().await.unwrap(),
            r#"{"type":"message","sender":"alice","message":"hi"}"#
        );
    }
}
