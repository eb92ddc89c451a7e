//! InMemory グループルーム Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, GroupDirectory, GroupRoom, GroupRoomError, GroupRoomRepository, RoomId, RoomName,
    Timestamp,
};
use enishi_shared::time::get_unix_timestamp_millis;

/// インメモリ グループルーム Repository 実装
///
/// GroupDirectory ドメインモデルを Mutex の内側に保持します。
pub struct InMemoryGroupRoomRepository {
    directory: Arc<Mutex<GroupDirectory>>,
}

impl InMemoryGroupRoomRepository {
    pub fn new() -> Self {
        Self {
            directory: Arc::new(Mutex::new(GroupDirectory::new())),
        }
    }
}

impl Default for InMemoryGroupRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupRoomRepository for InMemoryGroupRoomRepository {
    async fn create_room(
        &self,
        name: RoomName,
        is_locked: bool,
        password: Option<String>,
        creator: ClientId,
    ) -> Result<GroupRoom, GroupRoomError> {
        let mut directory = self.directory.lock().await;
        let created_at = Timestamp::new(get_unix_timestamp_millis());
        directory
            .create_room(name, is_locked, password, creator, created_at)
            .map(|room| room.clone())
    }

    async fn list_rooms(&self) -> Vec<GroupRoom> {
        let directory = self.directory.lock().await;
        directory.list_rooms().into_iter().cloned().collect()
    }

    async fn join_room(
        &self,
        room_id: &RoomId,
        password: Option<String>,
        client_id: ClientId,
    ) -> Result<GroupRoom, GroupRoomError> {
        let mut directory = self.directory.lock().await;
        directory
            .join_room(room_id, password.as_deref(), client_id)
            .map(|room| room.clone())
    }

    async fn members_of(&self, room_id: &RoomId) -> Option<Vec<ClientId>> {
        let directory = self.directory.lock().await;
        directory.members_of(room_id).map(|members| members.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_join_room() {
        // テスト項目: ルーム作成と参加が反映される
        // given (前提条件):
        let repo = InMemoryGroupRoomRepository::new();

        // when (操作):
        let room = repo
            .create_room(name("lounge"), false, None, client("alice"))
            .await
            .unwrap();
        let joined = repo
            .join_room(&room.id, None, client("bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(joined.members, vec![client("alice"), client("bob")]);
        assert_eq!(
            repo.members_of(&room.id).await,
            Some(vec![client("alice"), client("bob")])
        );
    }

    #[tokio::test]
    async fn test_join_with_wrong_password_does_not_change_membership() {
        // テスト項目: パスワード不一致の参加失敗でメンバーシップが変化しない
        // given (前提条件):
        let repo = InMemoryGroupRoomRepository::new();
        let room = repo
            .create_room(
                name("vault"),
                true,
                Some("hunter2".to_string()),
                client("alice"),
            )
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .join_room(&room.id, Some("wrong".to_string()), client("bob"))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), GroupRoomError::IncorrectPassword);
        assert_eq!(repo.members_of(&room.id).await, Some(vec![client("alice")]));
    }

    #[tokio::test]
    async fn test_list_rooms_in_creation_order() {
        // テスト項目: 一覧が作成順で返される
        // given (前提条件):
        let repo = InMemoryGroupRoomRepository::new();
        for n in ["first", "second"] {
            repo.create_room(name(n), false, None, client("alice"))
                .await
                .unwrap();
        }

        // when (操作):
        let rooms = repo.list_rooms().await;

        // then (期待する結果):
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_members_of_unknown_room() {
        // テスト項目: 存在しないルームのメンバー取得は None
        // given (前提条件):
        let repo = InMemoryGroupRoomRepository::new();
        let unknown = RoomId::new("no-such-room".to_string()).unwrap();

        // when (操作):
        let result = repo.members_of(&unknown).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }
}
