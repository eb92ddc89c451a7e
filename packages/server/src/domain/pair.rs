//! ペアレジストリ
//!
//! マッチ成立後のペア関係（パートナー・ペアルーム）を管理します。
//! 双方向に記録されるため、どちら側からでも O(1) で参照できます。

use std::collections::HashMap;

use super::value_object::{ClientId, RoomId, RoomIdFactory};

/// マッチ済みペアのレジストリ
///
/// 不変条件: 1 接続が同時に所属できるペアは最大 1 つ。
#[derive(Debug, Default)]
pub struct PairRegistry {
    /// クライアント → パートナー（双方向に格納）
    partners: HashMap<ClientId, ClientId>,
    /// クライアント → 所属ペアルーム
    room_by_client: HashMap<ClientId, RoomId>,
    /// ペアルーム → メンバー 2 名
    members_by_room: HashMap<RoomId, (ClientId, ClientId)>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// ペアを作成し、新しいペアルーム ID を返す
    ///
    /// ルーム ID はメンバー ID と無関係な不透明値として生成されます。
    pub fn create_pair(&mut self, a: ClientId, b: ClientId) -> RoomId {
        let room_id = RoomIdFactory::generate();
        self.partners.insert(a.clone(), b.clone());
        self.partners.insert(b.clone(), a.clone());
        self.room_by_client.insert(a.clone(), room_id.clone());
        self.room_by_client.insert(b.clone(), room_id.clone());
        self.members_by_room.insert(room_id.clone(), (a, b));
        room_id
    }

    /// パートナーを取得（ペア未所属なら None）
    pub fn partner_of(&self, client_id: &ClientId) -> Option<&ClientId> {
        self.partners.get(client_id)
    }

    /// 所属しているペアルームを取得
    pub fn room_of(&self, client_id: &ClientId) -> Option<&RoomId> {
        self.room_by_client.get(client_id)
    }

    /// ペアルームのメンバー 2 名を取得
    pub fn members_of(&self, room_id: &RoomId) -> Option<&(ClientId, ClientId)> {
        self.members_by_room.get(room_id)
    }

    /// ペアを解消し、（元）パートナーの ID を返す
    ///
    /// 双方向のエントリとペアルームをまとめて削除します。
    /// 既に未所属の場合は何もせず None を返します（冪等）。
    pub fn dissolve(&mut self, client_id: &ClientId) -> Option<ClientId> {
        let partner = self.partners.remove(client_id)?;
        self.partners.remove(&partner);
        if let Some(room_id) = self.room_by_client.remove(client_id) {
            self.members_by_room.remove(&room_id);
        }
        self.room_by_client.remove(&partner);
        Some(partner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_create_pair_records_both_directions() {
        // テスト項目: ペア作成で双方向の参照が記録される
        // given (前提条件):
        let mut pairs = PairRegistry::new();

        // when (操作):
        let room_id = pairs.create_pair(client("alice"), client("bob"));

        // then (期待する結果):
        assert_eq!(pairs.partner_of(&client("alice")), Some(&client("bob")));
        assert_eq!(pairs.partner_of(&client("bob")), Some(&client("alice")));
        assert_eq!(pairs.room_of(&client("alice")), Some(&room_id));
        assert_eq!(pairs.room_of(&client("bob")), Some(&room_id));
        assert_eq!(
            pairs.members_of(&room_id),
            Some(&(client("alice"), client("bob")))
        );
    }

    #[test]
    fn test_room_id_is_not_derived_from_member_ids() {
        // テスト項目: ルーム ID がメンバー ID を含まない不透明値である
        // given (前提条件):
        let mut pairs = PairRegistry::new();

        // when (操作):
        let room_id = pairs.create_pair(client("alice"), client("bob"));

        // then (期待する結果):
        assert!(!room_id.as_str().contains("alice"));
        assert!(!room_id.as_str().contains("bob"));
    }

    #[test]
    fn test_dissolve_removes_pair_symmetrically() {
        // テスト項目: 片側の解消で両側のペア状態が消える
        // given (前提条件):
        let mut pairs = PairRegistry::new();
        let room_id = pairs.create_pair(client("alice"), client("bob"));

        // when (操作):
        let former_partner = pairs.dissolve(&client("alice"));

        // then (期待する結果):
        assert_eq!(former_partner, Some(client("bob")));
        assert_eq!(pairs.partner_of(&client("alice")), None);
        assert_eq!(pairs.partner_of(&client("bob")), None);
        assert_eq!(pairs.members_of(&room_id), None);
    }

    #[test]
    fn test_dissolve_is_idempotent() {
        // テスト項目: 未所属のクライアントの解消は no-op（冪等性）
        // given (前提条件):
        let mut pairs = PairRegistry::new();
        pairs.create_pair(client("alice"), client("bob"));
        pairs.dissolve(&client("alice"));

        // when (操作): 2 回目の解消
        let result = pairs.dissolve(&client("alice"));
        let partner_side = pairs.dissolve(&client("bob"));

        // then (期待する結果):
        assert_eq!(result, None);
        assert_eq!(partner_side, None);
    }

    #[test]
    fn test_separate_pairs_are_independent() {
        // テスト項目: 複数のペアが互いに独立している
        // given (前提条件):
        let mut pairs = PairRegistry::new();
        let room_ab = pairs.create_pair(client("alice"), client("bob"));
        let room_cd = pairs.create_pair(client("carol"), client("dave"));
        assert_ne!(room_ab, room_cd);

        // when (操作): alice-bob のペアを解消
        pairs.dissolve(&client("bob"));

        // then (期待する結果): carol-dave のペアは維持される
        assert_eq!(pairs.partner_of(&client("carol")), Some(&client("dave")));
        assert_eq!(
            pairs.members_of(&room_cd),
            Some(&(client("carol"), client("dave")))
        );
    }
}
