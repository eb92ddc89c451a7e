//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::group::{GroupRoom, GroupRoomError};
use super::presence::GenderCounts;
use super::value_object::{ClientId, Gender, RoomId, RoomName, Tag};

/// 在席登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("client '{0}' is already connected")]
    DuplicateClientId(String),
}

/// タグ申告の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// 互換性のある相手が見つからず待機列に入った
    Queued,
    /// マッチが成立し、ペアルームが作成された
    Paired { partner: ClientId, room_id: RoomId },
    /// 既にペア所属中のため申告は受け付けられない
    AlreadyPaired,
}

/// マッチメイキング状態（在席・待機列・ペア）の Repository trait
///
/// 待機列・ペア・在席への全ての変更はこの trait の実装内で
/// 直列化されます。`offer_tag` はマッチ判定とペア作成を単一の
/// クリティカルセクションで行い、同一エントリの二重マッチを防ぎます。
#[async_trait]
pub trait MatchmakingRepository: Send + Sync {
    /// クライアントを在席登録する
    async fn register_client(
        &self,
        client_id: ClientId,
        gender: Gender,
    ) -> Result<(), RegisterError>;

    /// クライアントを在席解除する（冪等）
    async fn unregister_client(&self, client_id: &ClientId);

    /// 接続中の全クライアント ID
    async fn all_client_ids(&self) -> Vec<ClientId>;

    /// 接続中クライアント数
    async fn active_count(&self) -> usize;

    /// 性別ごとの在席数
    async fn gender_counts(&self) -> GenderCounts;

    /// タグを申告し、マッチすればペアを作成する（アトミック）
    async fn offer_tag(
        &self,
        client_id: ClientId,
        tag: Tag,
        gender: Gender,
        desired_partner_gender: Gender,
    ) -> TagOutcome;

    /// 待機列からエントリを取り下げる（冪等）
    ///
    /// タグが分かっている場合の明示的なキャンセル用。切断時の
    /// クリーンアップはタグ不問の `withdraw_waiting` を使います。
    async fn withdraw(&self, tag: &Tag, client_id: &ClientId);

    /// 待機列からクライアントのエントリをタグ不問で取り下げる（冪等）
    async fn withdraw_waiting(&self, client_id: &ClientId);

    /// パートナーを取得
    async fn partner_of(&self, client_id: &ClientId) -> Option<ClientId>;

    /// ペアルームのメンバー 2 名を取得
    async fn pair_members(&self, room_id: &RoomId) -> Option<(ClientId, ClientId)>;

    /// ペアを解消し、（元）パートナーを返す（冪等）
    async fn dissolve_pair(&self, client_id: &ClientId) -> Option<ClientId>;
}

/// グループルームディレクトリの Repository trait
#[async_trait]
pub trait GroupRoomRepository: Send + Sync {
    /// ルームを作成する
    async fn create_room(
        &self,
        name: RoomName,
        is_locked: bool,
        password: Option<String>,
        creator: ClientId,
    ) -> Result<GroupRoom, GroupRoomError>;

    /// 全ルームを作成順で返す
    async fn list_rooms(&self) -> Vec<GroupRoom>;

    /// ルームに参加する
    async fn join_room(
        &self,
        room_id: &RoomId,
        password: Option<String>,
        client_id: ClientId,
    ) -> Result<GroupRoom, GroupRoomError>;

    /// ルームのメンバーリストを取得
    async fn members_of(&self, room_id: &RoomId) -> Option<Vec<ClientId>>;
}
