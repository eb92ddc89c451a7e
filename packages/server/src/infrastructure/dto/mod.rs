//! Data Transfer Objects (DTOs) for the wire protocol.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event / notification DTOs
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
