//! Real-time chat routing infrastructure.
//!
//! The [`ChatRouter`] subscribes to the event bus and pushes newly created
//! messages to the WebSocket connections watching the affected project.

pub mod router;

pub use router::ChatRouter;
