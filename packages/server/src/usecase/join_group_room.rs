//! グループルーム参加のユースケース

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{ClientId, GroupRoom, GroupRoomError, GroupRoomRepository, RoomId};

/// グループルーム参加のユースケース
pub struct JoinGroupRoomUseCase {
    repository: Arc<dyn GroupRoomRepository>,
}

impl JoinGroupRoomUseCase {
    pub fn new(repository: Arc<dyn GroupRoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームに参加する
    ///
    /// 施錠ルームはパスワードの検証に成功した場合のみ参加できます。
    /// 失敗時にメンバーリストは変化しません。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        password: Option<String>,
        client_id: ClientId,
    ) -> Result<GroupRoom, GroupRoomError> {
        match self
            .repository
            .join_room(room_id, password, client_id.clone())
            .await
        {
            Ok(room) => {
                info!(
                    "client joined group room: room_id = {}, client_id = {}",
                    room.id.as_str(),
                    client_id.as_str()
                );
                Ok(room)
            }
            Err(e) => {
                warn!(
                    "failed to join group room: room_id = {}, client_id = {}, reason = {}",
                    room_id.as_str(),
                    client_id.as_str(),
                    e
                );
                Err(e)
            }
        }
    }
}
