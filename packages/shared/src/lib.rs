//! Shared utilities for the enishi matchmaking chat server.
//!
//! Provides logging setup and time helpers used by the server binary
//! and its tests.

pub mod logger;
pub mod time;
