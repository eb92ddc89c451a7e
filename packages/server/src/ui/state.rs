//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, CreateGroupRoomUseCase, DeclareTagUseCase, DisconnectClientUseCase,
    JoinGroupRoomUseCase, ListGroupRoomsUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DeclareTagUseCase（タグ申告のユースケース）
    pub declare_tag_usecase: Arc<DeclareTagUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// CreateGroupRoomUseCase（グループルーム作成のユースケース）
    pub create_group_room_usecase: Arc<CreateGroupRoomUseCase>,
    /// ListGroupRoomsUseCase（グループルーム一覧のユースケース）
    pub list_group_rooms_usecase: Arc<ListGroupRoomsUseCase>,
    /// JoinGroupRoomUseCase（グループルーム参加のユースケース）
    pub join_group_room_usecase: Arc<JoinGroupRoomUseCase>,
}
