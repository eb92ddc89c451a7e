//! InMemory Repository 実装
//!
//! 全ての状態はプロセスメモリ上にあり、再起動で失われます（仕様どおり）。

pub mod group;
pub mod matchmaking;

pub use group::InMemoryGroupRoomRepository;
pub use matchmaking::InMemoryMatchmakingRepository;
