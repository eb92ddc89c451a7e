//! Value Object 定義
//!
//! 不正な値を型レベルで排除するため、各識別子・文字列は
//! 検証付きコンストラクタを持つ newtype として定義します。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value Object の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client_id must not be empty")]
    EmptyClientId,
    #[error("client_id must be at most {max} characters (got {actual})")]
    ClientIdTooLong { max: usize, actual: usize },
    #[error("tag must not be empty")]
    EmptyTag,
    #[error("tag must be at most {max} characters (got {actual})")]
    TagTooLong { max: usize, actual: usize },
    #[error("room name must not be empty")]
    EmptyRoomName,
    #[error("room name must be at most {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("message must be at most {max} characters (got {actual})")]
    MessageTooLong { max: usize, actual: usize },
}

/// クライアント ID（トランスポート層が割り当てる接続単位の識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    const MAX_LEN: usize = 64;

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyClientId);
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::ClientIdTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// マッチングタグ（興味・話題を表す任意の文字列キー）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    const MAX_LEN: usize = 100;

    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::TagTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 性別属性
///
/// マッチング互換性判定に使用されます。`unspecified` はワイルドカードではなく
/// 通常の値として比較されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unspecified" => Ok(Gender::Unspecified),
            other => Err(format!("unknown gender: '{other}'")),
        }
    }
}

/// ルーム ID（ペアルーム・グループルーム共通の不透明な識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// RoomId の生成ファクトリ
///
/// メンバー ID の連結ではなく UUID v4 を使用し、衝突と
/// パース曖昧性を避けます。
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> RoomId {
        RoomId(uuid::Uuid::new_v4().to_string())
    }
}

/// グループルーム名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    const MAX_LEN: usize = 100;

    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRoomName);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::RoomNameTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// メッセージ本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    const MAX_LEN: usize = 2000;

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::MessageTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
