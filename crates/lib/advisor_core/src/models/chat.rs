//! Advisor and message models.

use chrono::{DateTime, Utc};

/// An advisor persona. Created by external administration; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Advisor {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text behavioral description used in the system prompt.
    pub persona: String,
}

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    pub advisor_id: String,
    pub user_id: String,
    /// `None` when the completion service returned no text.
    pub message: Option<String>,
    /// `true` if authored by the end user, `false` if by the model.
    pub from_user: bool,
    pub created_at: DateTime<Utc>,
}

/// A message to append to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub advisor_id: String,
    pub user_id: String,
    pub message: Option<String>,
    pub from_user: bool,
}

impl NewMessage {
    /// A message authored by the end user.
    pub fn from_user(user_id: &str, advisor_id: &str, message: &str) -> Self {
        Self {
            advisor_id: advisor_id.to_string(),
            user_id: user_id.to_string(),
            message: Some(message.to_string()),
            from_user: true,
        }
    }

    /// A reply authored by the model.
    pub fn from_assistant(user_id: &str, advisor_id: &str, message: Option<String>) -> Self {
        Self {
            advisor_id: advisor_id.to_string(),
            user_id: user_id.to_string(),
            message,
            from_user: false,
        }
    }
}
