//! UseCase 層
//!
//! インバウンドイベントごとに 1 つのユースケースを定義します。
//! 各ユースケースはドメイン層の抽象（Repository / MessagePusher）にのみ依存します。

mod connect_client;
mod create_group_room;
mod declare_tag;
mod disconnect_client;
mod error;
mod join_group_room;
mod list_group_rooms;
mod send_message;

pub use connect_client::ConnectClientUseCase;
pub use create_group_room::CreateGroupRoomUseCase;
pub use declare_tag::DeclareTagUseCase;
pub use disconnect_client::{DisconnectClientUseCase, DisconnectOutcome};
pub use error::{ConnectError, SendMessageError};
pub use join_group_room::JoinGroupRoomUseCase;
pub use list_group_rooms::ListGroupRoomsUseCase;
pub use send_message::{RelayPlan, SendMessageUseCase};
