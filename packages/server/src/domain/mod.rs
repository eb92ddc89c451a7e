//! ドメイン層
//!
//! マッチメイキング待機列・ペア・グループルーム・在席管理の
//! ビジネスロジックと、それらが必要とする抽象（Repository / MessagePusher）を
//! 定義します。外側の層（UseCase / Infrastructure / UI）には依存しません。

pub mod group;
pub mod moderation;
pub mod pair;
pub mod presence;
pub mod pusher;
pub mod repository;
pub mod value_object;
pub mod waitlist;

pub use group::{GroupDirectory, GroupRoom, GroupRoomError, PasswordHash};
pub use moderation::{Blacklist, censor};
pub use pair::PairRegistry;
pub use presence::{GenderCounts, PresenceRegistry};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{
    GroupRoomRepository, MatchmakingRepository, RegisterError, TagOutcome,
};
pub use value_object::{
    ClientId, Gender, MessageContent, RoomId, RoomIdFactory, RoomName, Tag, Timestamp,
    ValidationError,
};
pub use waitlist::{MatchResult, Waitlist, WaitlistEntry};
