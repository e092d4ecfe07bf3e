//! Repository for the `messages` table.

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message, MessageWithAuthor};

/// Columns for the author-name join. The display name resolves to the
/// staff user's full name or the client's name, whichever side is set.
const JOINED_COLUMNS: &str = "m.id, m.project_id, m.user_id, m.client_id, \
                               COALESCE(u.full_name, c.name) AS author_name, \
                               m.content, m.created_at";

/// Provides insert and history operations for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the raw created row.
    ///
    /// The author enum guarantees exactly one of `user_id`/`client_id` is
    /// set; the database CHECK constraint enforces the same invariant.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let (user_id, client_id) = input.author.into_columns();
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (project_id, user_id, client_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING id, project_id, user_id, client_id, content, created_at",
        )
        .bind(input.project_id)
        .bind(user_id)
        .bind(client_id)
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }

    /// Fetch a single message with its author join. Used to enrich the
    /// bare row reference carried by a `message.created` event before
    /// fan-out.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MessageWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM messages m
             LEFT JOIN users u ON u.id = m.user_id
             LEFT JOIN clients c ON c.id = m.client_id
             WHERE m.id = $1"
        );
        sqlx::query_as::<_, MessageWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the full message history for a project, ascending by creation
    /// time with the row id as tie-break, so two messages inserted within
    /// the same instant still have a stable order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MessageWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM messages m
             LEFT JOIN users u ON u.id = m.user_id
             LEFT JOIN clients c ON c.id = m.client_id
             WHERE m.project_id = $1
             ORDER BY m.created_at, m.id"
        );
        sqlx::query_as::<_, MessageWithAuthor>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
