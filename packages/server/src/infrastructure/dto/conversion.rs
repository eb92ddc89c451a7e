//! Conversion logic between DTOs and domain entities.

use crate::domain::GroupRoom;
use crate::infrastructure::dto::{http, websocket as dto};
use enishi_shared::time::timestamp_to_rfc3339;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&GroupRoom> for dto::GroupRoomSnapshotDto {
    fn from(room: &GroupRoom) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            is_locked: room.is_locked,
            members: room
                .members
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }
}

impl From<&GroupRoom> for dto::GroupRoomSummaryDto {
    fn from(room: &GroupRoom) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            is_locked: room.is_locked,
            member_count: room.members.len(),
        }
    }
}

impl From<&GroupRoom> for http::RoomSummaryDto {
    fn from(room: &GroupRoom) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            is_locked: room.is_locked,
            member_count: room.members.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, PasswordHash, RoomId, RoomName, Timestamp};

    fn locked_room() -> GroupRoom {
        GroupRoom {
            id: RoomId::new("room-1".to_string()).unwrap(),
            name: RoomName::new("vault".to_string()).unwrap(),
            is_locked: true,
            password_hash: Some(PasswordHash::hash("hunter2")),
            members: vec![
                ClientId::new("alice".to_string()).unwrap(),
                ClientId::new("bob".to_string()).unwrap(),
            ],
            created_at: Timestamp::new(1672531200000),
        }
    }

    #[test]
    fn test_snapshot_dto_excludes_password() {
        // テスト項目: スナップショット DTO にパスワードが含まれない
        // given (前提条件):
        let room = locked_room();

        // when (操作):
        let dto = dto::GroupRoomSnapshotDto::from(&room);
        let json = serde_json::to_string(&dto).unwrap();

        // then (期待する結果):
        assert!(!json.contains("password"));
        assert!(!json.contains("hunter2"));
        assert_eq!(dto.members, vec!["alice", "bob"]);
        assert!(dto.is_locked);
    }

    #[test]
    fn test_summary_dto_carries_member_count() {
        // テスト項目: サマリ DTO にメンバー数が入り、メンバー ID は含まれない
        // given (前提条件):
        let room = locked_room();

        // when (操作):
        let dto = dto::GroupRoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(dto.member_count, 2);
        assert_eq!(dto.name, "vault");
    }

    #[test]
    fn test_http_summary_renders_rfc3339_created_at() {
        // テスト項目: HTTP サマリの created_at が RFC 3339 形式になる
        // given (前提条件):
        let room = locked_room();

        // when (操作):
        let dto = http::RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }
}
