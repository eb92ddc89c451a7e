//! Tag-based matchmaking and relay chat server library.
//!
//! Anonymous clients attach over WebSocket, declare a matching tag with
//! optional gender attributes, and are paired into ephemeral private rooms
//! once a compatible counterpart appears. Named group rooms with optional
//! password locks exist alongside the matchmaking waitlist. All relayed
//! text passes through a blacklist moderation filter.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
