//! 在席レジストリ
//!
//! 現在接続中のクライアントと申告済みの性別を追跡し、
//! 集計カウンタ（activeUsersCount / genderCount）の元データを提供します。

use std::collections::HashMap;

use super::value_object::{ClientId, Gender};

/// 性別ごとの在席数
///
/// `unspecified` は集計に含めません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

/// 接続中クライアントのレジストリ
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    clients: HashMap<ClientId, Gender>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// クライアントを登録する。既存の場合は false を返す。
    pub fn register(&mut self, client_id: ClientId, gender: Gender) -> bool {
        if self.clients.contains_key(&client_id) {
            return false;
        }
        self.clients.insert(client_id, gender);
        true
    }

    /// 申告された性別を更新する（declareTag 経由）
    pub fn update_gender(&mut self, client_id: &ClientId, gender: Gender) {
        if let Some(entry) = self.clients.get_mut(client_id) {
            *entry = gender;
        }
    }

    /// クライアントを登録解除する。不在なら no-op（冪等）。
    pub fn unregister(&mut self, client_id: &ClientId) {
        self.clients.remove(client_id);
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.clients.contains_key(client_id)
    }

    /// 接続中クライアント数
    pub fn active_count(&self) -> usize {
        self.clients.len()
    }

    /// 性別ごとの集計
    pub fn gender_counts(&self) -> GenderCounts {
        let mut counts = GenderCounts::default();
        for gender in self.clients.values() {
            match gender {
                Gender::Male => counts.male += 1,
                Gender::Female => counts.female += 1,
                Gender::Unspecified => {}
            }
        }
        counts
    }

    /// 接続中の全クライアント ID
    pub fn all_client_ids(&self) -> Vec<ClientId> {
        self.clients.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_register_and_count() {
        // テスト項目: 登録したクライアントが集計に反映される
        // given (前提条件):
        let mut presence = PresenceRegistry::new();

        // when (操作):
        assert!(presence.register(client("alice"), Gender::Female));
        assert!(presence.register(client("bob"), Gender::Male));
        assert!(presence.register(client("carol"), Gender::Unspecified));

        // then (期待する結果):
        assert_eq!(presence.active_count(), 3);
        let counts = presence.gender_counts();
        assert_eq!(counts.male, 1);
        assert_eq!(counts.female, 1);
    }

    #[test]
    fn test_register_duplicate_returns_false() {
        // テスト項目: 重複登録は拒否される
        // given (前提条件):
        let mut presence = PresenceRegistry::new();
        presence.register(client("alice"), Gender::Female);

        // when (操作):
        let result = presence.register(client("alice"), Gender::Male);

        // then (期待する結果): 登録は失敗し、元の性別が維持される
        assert!(!result);
        assert_eq!(presence.active_count(), 1);
        assert_eq!(presence.gender_counts().female, 1);
    }

    #[test]
    fn test_update_gender() {
        // テスト項目: declareTag で申告された性別が反映される
        // given (前提条件):
        let mut presence = PresenceRegistry::new();
        presence.register(client("alice"), Gender::Unspecified);

        // when (操作):
        presence.update_gender(&client("alice"), Gender::Female);

        // then (期待する結果):
        assert_eq!(presence.gender_counts().female, 1);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        // テスト項目: 登録解除は冪等
        // given (前提条件):
        let mut presence = PresenceRegistry::new();
        presence.register(client("alice"), Gender::Female);

        // when (操作):
        presence.unregister(&client("alice"));
        presence.unregister(&client("alice"));

        // then (期待する結果):
        assert_eq!(presence.active_count(), 0);
        assert!(!presence.contains(&client("alice")));
    }
}
