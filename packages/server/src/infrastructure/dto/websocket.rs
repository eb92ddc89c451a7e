//! WebSocket メッセージ DTO
//!
//! インバウンドイベントは `type` フィールドで内部タグ付けされた JSON、
//! アウトバウンド通知は `type` を先頭フィールドに持つ構造体です。
//! フィールド名はワイヤ上では camelCase になります。

use serde::{Deserialize, Serialize};

use crate::domain::Gender;

/// クライアントから受信するイベント
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// マッチングタグの申告
    #[serde(rename_all = "camelCase")]
    DeclareTag {
        tag: String,
        gender: Gender,
        desired_partner_gender: Gender,
    },
    /// グループルームの作成
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        name: String,
        is_locked: bool,
        #[serde(default)]
        password: Option<String>,
    },
    /// グループルーム一覧の取得
    ListRooms,
    /// グループルームへの参加
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        #[serde(default)]
        password: Option<String>,
    },
    /// ペアルームへのメッセージ送信
    #[serde(rename_all = "camelCase")]
    SendMessage { message: String, room_id: String },
    /// グループルームへのメッセージ送信
    #[serde(rename_all = "camelCase")]
    SendGroupMessage { message: String, room_id: String },
}

/// アウトバウンド通知の種別
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    ActiveUsersCount,
    GenderCount,
    Matched,
    PeerLeft,
    Message,
    CreateRoomSuccess,
    ChatRoomsList,
    JoinRoomSuccess,
    JoinRoomError,
    Error,
}

/// エラー通知のコード
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    MalformedRequest,
    RoomNotFound,
    AlreadyPaired,
}

/// 接続中ユーザー数の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveUsersCountMessage {
    pub r#type: MessageType,
    pub count: usize,
}

/// 性別ごとの在席数の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderCountMessage {
    pub r#type: MessageType,
    pub male: usize,
    pub female: usize,
}

/// マッチ成立の通知
///
/// 各側の通知には「相手」の ID が入ります。両側で同じ roomId を共有します。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedMessage {
    pub r#type: MessageType,
    pub room_id: String,
    pub matched_peer_id: String,
}

/// パートナー切断の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerLeftMessage {
    pub r#type: MessageType,
    pub client_id: String,
}

/// リレーされたチャットメッセージ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayedMessage {
    pub r#type: MessageType,
    pub sender: String,
    pub message: String,
}

/// グループルームのスナップショット（参加成功・作成成功の応答）
///
/// パスワード（ハッシュ含む）は決して含まれません。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRoomSnapshotDto {
    pub id: String,
    pub name: String,
    pub is_locked: bool,
    pub members: Vec<String>,
}

/// グループルームの一覧用サマリ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRoomSummaryDto {
    pub id: String,
    pub name: String,
    pub is_locked: bool,
    pub member_count: usize,
}

/// ルーム作成成功の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomSuccessMessage {
    pub r#type: MessageType,
    pub room: GroupRoomSnapshotDto,
}

/// ルーム一覧の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRoomsListMessage {
    pub r#type: MessageType,
    pub rooms: Vec<GroupRoomSummaryDto>,
}

/// ルーム参加成功の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomSuccessMessage {
    pub r#type: MessageType,
    pub room: GroupRoomSnapshotDto,
}

/// ルーム参加失敗の通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomErrorMessage {
    pub r#type: MessageType,
    pub reason: String,
}

/// 一般エラーの通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub code: ErrorCode,
}
