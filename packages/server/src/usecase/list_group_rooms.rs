//! グループルーム一覧取得のユースケース

use std::sync::Arc;

use crate::domain::{GroupRoom, GroupRoomRepository};

/// グループルーム一覧取得のユースケース
///
/// ルームは作成順で返されます。
pub struct ListGroupRoomsUseCase {
    repository: Arc<dyn GroupRoomRepository>,
}

impl ListGroupRoomsUseCase {
    pub fn new(repository: Arc<dyn GroupRoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームを作成順で返す
    pub async fn execute(&self) -> Vec<GroupRoom> {
        self.repository.list_rooms().await
    }
}
