//! Chat message entity model and DTOs.
//!
//! Messages are append-only. A message is authored by exactly one of a
//! staff user or a portal client; [`MessageAuthor`] makes constructing
//! anything else impossible at the type level, and the database enforces
//! the same rule with a CHECK constraint.

use clientpulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// The author of a message: a staff user or a portal client, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAuthor {
    Staff(DbId),
    Client(DbId),
}

impl MessageAuthor {
    /// Split into the nullable `(user_id, client_id)` column pair.
    pub fn into_columns(self) -> (Option<DbId>, Option<DbId>) {
        match self {
            MessageAuthor::Staff(id) => (Some(id), None),
            MessageAuthor::Client(id) => (None, Some(id)),
        }
    }
}

/// A raw message row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub content: String,
    pub created_at: Timestamp,
}

/// A message row joined with its author's display name.
///
/// `author_name` resolves to the staff user's full name or the client's
/// name. Author FKs cascade on delete, so a surviving row always has a
/// living author; the field stays `Option` only because the SQL join
/// produces a nullable column.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MessageWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
}

impl MessageWithAuthor {
    /// Whether this message was sent from the client portal (as opposed to
    /// agency staff). Drives presentation alignment in chat views.
    pub fn is_from_client(&self) -> bool {
        self.client_id.is_some()
    }
}

/// DTO for inserting a new message.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub project_id: DbId,
    pub author: MessageAuthor,
    pub content: String,
}
