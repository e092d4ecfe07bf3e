//! WebSocket infrastructure for real-time project chat.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handlers used by Axum routes. Every connection is pinned to a
//! single project; chat fan-out targets the project's connection set.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{portal_ws_handler, staff_ws_handler};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
