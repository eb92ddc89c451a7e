//! グループルームディレクトリ
//!
//! 名前付き・任意でパスワードロック可能なルームの登録簿です。
//! マッチメイキング待機列とは独立して動作します。
//! ルームはプロセス存続中は削除されません（空になっても名前は残ります）。

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::value_object::{ClientId, RoomId, RoomIdFactory, RoomName, Timestamp};

/// グループルーム操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupRoomError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("a locked room requires a non-empty password")]
    PasswordRequired,
}

/// パスワードの SHA-256 ハッシュ
///
/// 平文のパスワードはドメインに保持しません。検証は供給された平文を
/// ハッシュ化して比較します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn hash(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(format!("{digest:x}"))
    }

    pub fn verify(&self, supplied: &str) -> bool {
        Self::hash(supplied) == *self
    }
}

/// グループルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRoom {
    pub id: RoomId,
    pub name: RoomName,
    pub is_locked: bool,
    /// ロックされたルームのみ Some。一覧・配信ペイロードには決して含めない。
    pub password_hash: Option<PasswordHash>,
    /// 参加順のメンバーリスト。重複参加は許容される（重複排除しない）。
    pub members: Vec<ClientId>,
    pub created_at: Timestamp,
}

/// 名前付きルームのディレクトリ
#[derive(Debug, Default)]
pub struct GroupDirectory {
    rooms: HashMap<RoomId, GroupRoom>,
    /// 作成順（listRooms の順序保証用）
    creation_order: Vec<RoomId>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームを作成し、作成者をメンバーに含めて返す
    ///
    /// ロック付きルームは空でないパスワードが必須です。
    pub fn create_room(
        &mut self,
        name: RoomName,
        is_locked: bool,
        password: Option<String>,
        creator: ClientId,
        created_at: Timestamp,
    ) -> Result<&GroupRoom, GroupRoomError> {
        let password_hash = if is_locked {
            match password.as_deref() {
                Some(p) if !p.is_empty() => Some(PasswordHash::hash(p)),
                _ => return Err(GroupRoomError::PasswordRequired),
            }
        } else {
            None
        };

        let id = RoomIdFactory::generate();
        let room = GroupRoom {
            id: id.clone(),
            name,
            is_locked,
            password_hash,
            members: vec![creator],
            created_at,
        };
        self.creation_order.push(id.clone());
        Ok(self.rooms.entry(id).or_insert(room))
    }

    /// ルームに参加する
    ///
    /// ロック付きルームはパスワード照合に成功した場合のみ参加できます。
    /// 失敗時はメンバーシップを変更しません。重複参加は許容されます。
    pub fn join_room(
        &mut self,
        room_id: &RoomId,
        supplied_password: Option<&str>,
        client_id: ClientId,
    ) -> Result<&GroupRoom, GroupRoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| GroupRoomError::RoomNotFound(room_id.as_str().to_string()))?;

        if room.is_locked {
            let verified = match (&room.password_hash, supplied_password) {
                (Some(hash), Some(supplied)) => hash.verify(supplied),
                _ => false,
            };
            if !verified {
                return Err(GroupRoomError::IncorrectPassword);
            }
        }

        room.members.push(client_id);
        Ok(room)
    }

    /// 全ルームを作成順で返す
    pub fn list_rooms(&self) -> Vec<&GroupRoom> {
        self.creation_order
            .iter()
            .filter_map(|id| self.rooms.get(id))
            .collect()
    }

    /// ルームのメンバーリストを取得
    pub fn members_of(&self, room_id: &RoomId) -> Option<&[ClientId]> {
        self.rooms.get(room_id).map(|room| room.members.as_slice())
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&GroupRoom> {
        self.rooms.get(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
