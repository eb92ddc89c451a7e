//! Infrastructure 層
//!
//! ドメイン層が定義する抽象（Repository / MessagePusher）の具体的な実装と、
//! ワイヤプロトコルの DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
