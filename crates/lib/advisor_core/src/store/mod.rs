//! Conversation store — the append-only message log and advisor lookup.

mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::{Advisor, MessageRecord, NewMessage};

pub use postgres::PgConversationStore;

/// Number of stored messages replayed into each prompt.
pub const HISTORY_WINDOW: i64 = 9;

/// Store errors. The display form is the backend's own message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Db(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// Durable message log plus advisor lookup.
///
/// Implementations own ordering and isolation of concurrent writes; callers
/// take no locks.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append a message to the `(user_id, advisor_id)` log.
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRecord, StoreError>;

    /// The most recent `limit` messages for a pair, oldest first.
    async fn recent_messages(
        &self,
        user_id: &str,
        advisor_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageRecord>, StoreError>;

    /// Look up a single advisor by id.
    async fn find_advisor(&self, advisor_id: &str) -> Result<Option<Advisor>, StoreError>;

    /// Whether the backend is reachable.
    async fn ping(&self) -> bool;
}
