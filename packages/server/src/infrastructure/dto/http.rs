//! HTTP API レスポンス DTO

use serde::{Deserialize, Serialize};

/// `/api/rooms` のルームサマリ
///
/// パスワード（ハッシュ含む）は含まれません。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub name: String,
    pub is_locked: bool,
    pub member_count: usize,
    pub created_at: String,
}
