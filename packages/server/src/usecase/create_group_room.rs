//! グループルーム作成のユースケース

use std::sync::Arc;

use tracing::info;

use crate::domain::{ClientId, GroupRoom, GroupRoomError, GroupRoomRepository, RoomName};

/// グループルーム作成のユースケース
///
/// 作成者は最初のメンバーとしてルームに入ります。
pub struct CreateGroupRoomUseCase {
    repository: Arc<dyn GroupRoomRepository>,
}

impl CreateGroupRoomUseCase {
    pub fn new(repository: Arc<dyn GroupRoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームを作成する
    pub async fn execute(
        &self,
        name: RoomName,
        is_locked: bool,
        password: Option<String>,
        creator: ClientId,
    ) -> Result<GroupRoom, GroupRoomError> {
        let room = self
            .repository
            .create_room(name, is_locked, password, creator.clone())
            .await?;

        info!(
            "group room created: room_id = {}, name = {}, locked = {}, creator = {}",
            room.id.as_str(),
            room.name.as_str(),
            room.is_locked,
            creator.as_str()
        );
        Ok(room)
    }
}
