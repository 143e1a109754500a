use async_trait::async_trait;
use sqlx::PgPool;

use super::{ConversationStore, StoreError};
use crate::models::chat::{Advisor, MessageRecord, NewMessage};
use crate::uuid::uuidv7;

/// PostgreSQL-backed conversation store.
#[derive(Debug, Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRecord, StoreError> {
        let row = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (id, advisor_id, user_id, message, from_user)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id::text, advisor_id, user_id, message, from_user, created_at
            "#,
        )
        .bind(uuidv7())
        .bind(&message.advisor_id)
        .bind(&message.user_id)
        .bind(message.message.as_deref())
        .bind(message.from_user)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn recent_messages(
        &self,
        user_id: &str,
        advisor_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        // Newest `limit` rows, flipped back to chronological order.
        let rows = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, advisor_id, user_id, message, from_user, created_at
            FROM (
                SELECT id::text AS id, advisor_id, user_id,
                       message, from_user, created_at, id AS sort_id
                FROM messages
                WHERE user_id = $1 AND advisor_id = $2
                ORDER BY created_at DESC, id DESC
                LIMIT $3
            ) recent
            ORDER BY created_at ASC, sort_id ASC
            "#,
        )
        .bind(user_id)
        .bind(advisor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_advisor(&self, advisor_id: &str) -> Result<Option<Advisor>, StoreError> {
        let row = sqlx::query_as::<_, Advisor>(
            "SELECT id::text, name, persona FROM advisors WHERE id::text = $1",
        )
        .bind(advisor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
