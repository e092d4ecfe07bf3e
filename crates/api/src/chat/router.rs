//! Event-to-WebSocket chat routing engine.
//!
//! [`ChatRouter`] subscribes to the platform event bus and, for each
//! `message.created` event, re-fetches the message row with its author name
//! joined in and fans the hydrated frame out to every connection watching
//! the message's project.

use std::sync::Arc;

use axum::extract::ws::Message;
use clientpulse_db::repositories::MessageRepo;
use clientpulse_db::DbPool;
use clientpulse_events::PlatformEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Event type emitted when a chat message is persisted.
pub const EVENT_MESSAGE_CREATED: &str = "message.created";

/// Routes message events to project chat connections.
///
/// Events carry only row references, so the router re-fetches the full row
/// (including the author name join) before delivery. This keeps the wire
/// format identical no matter which code path inserted the message.
pub struct ChatRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl ChatRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](clientpulse_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Chat router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, chat router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to the project's chat connections.
    async fn route_event(&self, event: &PlatformEvent) -> Result<(), sqlx::Error> {
        if event.event_type != EVENT_MESSAGE_CREATED {
            return Ok(());
        }

        let (Some(project_id), Some(message_id)) = (event.project_id, event.source_entity_id)
        else {
            tracing::warn!(
                event_type = %event.event_type,
                "Message event missing project or message id, skipping"
            );
            return Ok(());
        };

        // Re-fetch with the author join; the event only references the row.
        let Some(message) = MessageRepo::find_with_author(&self.pool, message_id).await? else {
            // Deleted between insert and fan-out; nothing to deliver.
            tracing::debug!(message_id, "Message gone before fan-out, skipping");
            return Ok(());
        };

        let frame = serde_json::json!({
            "type": "message",
            "message": message,
        });
        let ws_msg = Message::Text(frame.to_string().into());
        let delivered = self.ws_manager.send_to_project(project_id, ws_msg).await;
        tracing::debug!(project_id, message_id, delivered, "Chat message fanned out");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clientpulse_core::types::DbId;
    use clientpulse_db::models::agency::CreateAgency;
    use clientpulse_db::models::client::CreateClient;
    use clientpulse_db::models::message::{CreateMessage, MessageAuthor};
    use clientpulse_db::models::project::CreateProject;
    use clientpulse_db::repositories::{AgencyRepo, ClientRepo, ProjectRepo};
    use sqlx::PgPool;

    use crate::ws::manager::WsPeer;

    /// Seed an agency, client, project, and one client-authored message.
    /// Returns (project_id, message_id).
    async fn seed_chat(pool: &PgPool) -> (DbId, DbId) {
        let agency = AgencyRepo::create(
            pool,
            &CreateAgency {
                name: "Fanout Agency".into(),
                slug: "fanout-agency".into(),
            },
        )
        .await
        .expect("agency insert");

        let client = ClientRepo::create(
            pool,
            agency.id,
            &CreateClient {
                name: "Chatty".into(),
                email: "chatty@client.test".into(),
                company: None,
                phone: None,
            },
            "0123456789abcdef0123456789abcdef",
        )
        .await
        .expect("client insert");

        let project = ProjectRepo::create(
            pool,
            agency.id,
            &CreateProject {
                client_id: client.id,
                name: "Threaded".into(),
                description: None,
                status: None,
                progress: None,
                start_date: None,
                due_date: None,
                budget: None,
            },
        )
        .await
        .expect("project insert");

        let message = MessageRepo::create(
            pool,
            &CreateMessage {
                project_id: project.id,
                author: MessageAuthor::Client(client.id),
                content: "hello from the portal".into(),
            },
        )
        .await
        .expect("message insert");

        (project.id, message.id)
    }

    fn message_event(project_id: DbId, message_id: DbId) -> PlatformEvent {
        PlatformEvent::new(EVENT_MESSAGE_CREATED)
            .with_project(project_id)
            .with_source("message", message_id)
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn route_event_delivers_hydrated_frame_to_project(pool: PgPool) {
        let (project_id, message_id) = seed_chat(&pool).await;

        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("c1".into(), project_id, WsPeer::Staff(1)).await;
        let mut rx_other = manager
            .add("c2".into(), project_id + 1, WsPeer::Staff(2))
            .await;

        let router = ChatRouter::new(pool, Arc::clone(&manager));
        router
            .route_event(&message_event(project_id, message_id))
            .await
            .expect("routing should succeed");

        let Some(Message::Text(text)) = rx.try_recv().ok() else {
            panic!("project connection must receive a text frame");
        };
        let frame: serde_json::Value = serde_json::from_str(&text).expect("frame is JSON");
        assert_eq!(frame["type"], "message");
        assert_eq!(frame["message"]["id"], message_id);
        assert_eq!(frame["message"]["content"], "hello from the portal");
        assert_eq!(frame["message"]["author_name"], "Chatty");
        assert!(frame["message"]["client_id"].is_number());
        assert!(frame["message"]["user_id"].is_null());

        assert!(
            rx_other.try_recv().is_err(),
            "other project must not receive the frame"
        );
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn route_event_skips_foreign_and_incomplete_events(pool: PgPool) {
        let (project_id, message_id) = seed_chat(&pool).await;

        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("c1".into(), project_id, WsPeer::Client(1)).await;
        let router = ChatRouter::new(pool, Arc::clone(&manager));

        // Unrelated event type.
        router
            .route_event(&PlatformEvent::new("invoice.overdue").with_project(project_id))
            .await
            .expect("foreign events are ignored");

        // Message event missing its row reference.
        router
            .route_event(&PlatformEvent::new(EVENT_MESSAGE_CREATED).with_project(project_id))
            .await
            .expect("incomplete events are skipped");

        // Message event missing its project.
        router
            .route_event(&PlatformEvent::new(EVENT_MESSAGE_CREATED).with_source("message", message_id))
            .await
            .expect("incomplete events are skipped");

        assert!(rx.try_recv().is_err(), "no frame may be delivered");
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn route_event_tolerates_message_gone_before_fanout(pool: PgPool) {
        let (project_id, message_id) = seed_chat(&pool).await;

        sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(message_id)
            .execute(&pool)
            .await
            .expect("delete seeded message");

        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("c1".into(), project_id, WsPeer::Staff(1)).await;
        let router = ChatRouter::new(pool, Arc::clone(&manager));

        router
            .route_event(&message_event(project_id, message_id))
            .await
            .expect("vanished rows are skipped, not errors");
        assert!(rx.try_recv().is_err(), "no frame for a vanished message");
    }
}
