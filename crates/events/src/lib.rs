//! In-process platform event infrastructure.
//!
//! The realtime backbone of the application: mutations publish
//! [`PlatformEvent`]s on the [`EventBus`], and long-lived consumers (the
//! chat router) fan them out to connected WebSocket clients.

pub mod bus;

pub use bus::{EventBus, PlatformEvent};
