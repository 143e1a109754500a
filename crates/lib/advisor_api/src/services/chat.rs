//! Chat turn pipeline.
//!
//! One turn runs strictly in order, stopping at the first failure:
//! 1. Validate the payload
//! 2. Append the user's message
//! 3. Load the recent conversation window
//! 4. Load the advisor persona
//! 5. Build the prompt and request a completion
//! 6. Append the advisor's reply
//!
//! Nothing is rolled back: a failure after step 2 leaves the user's message
//! stored without a reply.

use std::sync::Arc;

use advisor_core::completion::CompletionService;
use advisor_core::models::auth::Identity;
use advisor_core::models::chat::NewMessage;
use advisor_core::prompt::build_prompt;
use advisor_core::store::{ConversationStore, HISTORY_WINDOW};
use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult, MISSING_FIELDS};
use crate::models::{ChatTurnRequest, ChatTurnResponse};

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub message: String,
    pub advisor_id: String,
}

impl ChatTurnRequest {
    /// Parse a raw JSON body. Malformed JSON is treated like missing fields.
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(body).map_err(|e| {
            debug!("chat payload rejected: {e}");
            AppError::InvalidRequest(MISSING_FIELDS.into())
        })
    }

    /// Require both fields to be present and non-empty.
    pub fn validate(self) -> AppResult<ChatTurn> {
        match (self.message, self.advisor_id) {
            (Some(message), Some(advisor_id)) if !message.is_empty() && !advisor_id.is_empty() => {
                Ok(ChatTurn {
                    message,
                    advisor_id,
                })
            }
            _ => Err(AppError::InvalidRequest(MISSING_FIELDS.into())),
        }
    }
}

/// Runs chat turns against injected collaborators.
#[derive(Clone)]
pub struct ChatTurnHandler {
    store: Arc<dyn ConversationStore>,
    completions: Arc<dyn CompletionService>,
    model: String,
}

impl ChatTurnHandler {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        completions: Arc<dyn CompletionService>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            completions,
            model: model.into(),
        }
    }

    /// Run one turn for an authenticated caller.
    pub async fn handle(&self, user: &Identity, turn: ChatTurn) -> AppResult<ChatTurnResponse> {
        let user_id = user.user_id.as_str();
        let advisor_id = turn.advisor_id.as_str();

        self.store
            .insert_message(&NewMessage::from_user(user_id, advisor_id, &turn.message))
            .await
            .map_err(|e| {
                error!(user_id, advisor_id, "failed to store user message: {e}");
                AppError::StoreWrite(e.to_string())
            })?;

        let window = self
            .store
            .recent_messages(user_id, advisor_id, HISTORY_WINDOW)
            .await
            .map_err(|e| {
                error!(user_id, advisor_id, "failed to load conversation window: {e}");
                AppError::StoreRead(e.to_string())
            })?;

        // A lookup error is reported the same as a missing advisor.
        let advisor = match self.store.find_advisor(advisor_id).await {
            Ok(Some(advisor)) => advisor,
            Ok(None) => {
                warn!(user_id, advisor_id, "advisor not found");
                return Err(AppError::AdvisorNotFound);
            }
            Err(e) => {
                warn!(user_id, advisor_id, "advisor lookup failed: {e}");
                return Err(AppError::AdvisorNotFound);
            }
        };

        let prompt = build_prompt(&advisor, &window);

        let reply = self
            .completions
            .complete(&self.model, &prompt)
            .await
            .map_err(|e| {
                error!(user_id, advisor_id, model = %self.model, "completion failed: {e}");
                AppError::Completion(e.to_string())
            })?
            .into_iter()
            .next()
            .and_then(|choice| choice.content);

        self.store
            .insert_message(&NewMessage::from_assistant(user_id, advisor_id, reply))
            .await
            .map_err(|e| {
                error!(user_id, advisor_id, "failed to store advisor reply: {e}");
                AppError::StoreWrite(e.to_string())
            })?;

        debug!(
            user_id,
            advisor_id,
            window = window.len(),
            "chat turn completed"
        );

        Ok(ChatTurnResponse { success: true })
    }
}
