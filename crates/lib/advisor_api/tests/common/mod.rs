//! In-memory collaborators for driving the router without PostgreSQL or a
//! completion API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use advisor_api::config::ApiConfig;
use advisor_api::{AppState, router};
use advisor_core::auth::{
    Credentials, IdentityError, IdentityProvider, IdentityResolution, JwtIdentityProvider,
};
use advisor_core::completion::{
    CompletionChoice, CompletionError, CompletionService, DEFAULT_MODEL, PromptMessage,
};
use advisor_core::models::auth::Identity;
use advisor_core::models::chat::{Advisor, MessageRecord, NewMessage};
use advisor_core::store::{ConversationStore, StoreError};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const ADVISOR_ID: &str = "0190a5d2-0000-7000-8000-000000000001";

pub fn jordan() -> Advisor {
    Advisor {
        id: ADVISOR_ID.into(),
        name: "Jordan".into(),
        persona: "You are cautious and data-driven.".into(),
    }
}

pub fn token_for(user_id: &str) -> String {
    advisor_core::auth::jwt::generate_access_token(user_id, JWT_SECRET.as_bytes())
        .expect("issue token")
}

/// Which store operation should fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreFailures {
    pub user_write: bool,
    pub assistant_write: bool,
    pub window_read: bool,
    pub advisor_read: bool,
}

/// Vec-backed conversation store.
pub struct MemoryStore {
    advisors: Vec<Advisor>,
    messages: Mutex<Vec<MessageRecord>>,
    failures: StoreFailures,
    epoch: DateTime<Utc>,
}

impl MemoryStore {
    pub fn new(advisors: Vec<Advisor>) -> Self {
        Self::with_failures(advisors, StoreFailures::default())
    }

    pub fn with_failures(advisors: Vec<Advisor>, failures: StoreFailures) -> Self {
        Self {
            advisors,
            messages: Mutex::new(Vec::new()),
            failures,
            epoch: Utc::now(),
        }
    }

    /// Append directly, bypassing failure injection.
    pub fn seed(&self, message: NewMessage) {
        self.append(&message);
    }

    pub fn messages(&self) -> Vec<MessageRecord> {
        self.messages.lock().unwrap().clone()
    }

    fn append(&self, message: &NewMessage) -> MessageRecord {
        let mut messages = self.messages.lock().unwrap();
        let record = MessageRecord {
            id: advisor_core::uuid::uuidv7().to_string(),
            advisor_id: message.advisor_id.clone(),
            user_id: message.user_id.clone(),
            message: message.message.clone(),
            from_user: message.from_user,
            created_at: self.epoch + Duration::seconds(messages.len() as i64),
        };
        messages.push(record.clone());
        record
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRecord, StoreError> {
        if (message.from_user && self.failures.user_write)
            || (!message.from_user && self.failures.assistant_write)
        {
            return Err(StoreError::Backend("insert into messages failed".into()));
        }
        Ok(self.append(message))
    }

    async fn recent_messages(
        &self,
        user_id: &str,
        advisor_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        if self.failures.window_read {
            return Err(StoreError::Backend("select from messages failed".into()));
        }
        let matching: Vec<MessageRecord> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.advisor_id == advisor_id)
            .cloned()
            .collect();
        let skip = matching.len().saturating_sub(limit as usize);
        Ok(matching.into_iter().skip(skip).collect())
    }

    async fn find_advisor(&self, advisor_id: &str) -> Result<Option<Advisor>, StoreError> {
        if self.failures.advisor_read {
            return Err(StoreError::Backend("select from advisors failed".into()));
        }
        Ok(self.advisors.iter().find(|a| a.id == advisor_id).cloned())
    }

    async fn ping(&self) -> bool {
        true
    }
}

/// Completion service that records prompts and returns a canned reply.
pub struct ScriptedCompletions {
    reply: Result<Option<String>, String>,
    calls: Mutex<Vec<(String, Vec<PromptMessage>)>>,
}

impl ScriptedCompletions {
    pub fn replying(text: &str) -> Self {
        Self::new(Ok(Some(text.to_string())))
    }

    pub fn empty_reply() -> Self {
        Self::new(Ok(None))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_string()))
    }

    fn new(reply: Result<Option<String>, String>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<PromptMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletions {
    async fn complete(
        &self,
        model: &str,
        messages: &[PromptMessage],
    ) -> Result<Vec<CompletionChoice>, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        match &self.reply {
            Ok(content) => Ok(vec![
                CompletionChoice {
                    content: content.clone(),
                },
                CompletionChoice {
                    content: Some("second choice is ignored".into()),
                },
            ]),
            Err(msg) => Err(CompletionError::Request(msg.clone())),
        }
    }
}

/// Identity provider with a fixed outcome, ignoring credentials.
pub struct FixedIdentity {
    pub user: Option<&'static str>,
    pub error: Option<&'static str>,
}

#[async_trait]
impl IdentityProvider for FixedIdentity {
    async fn resolve(&self, _credentials: &Credentials) -> IdentityResolution {
        IdentityResolution {
            user: self.user.map(|id| Identity {
                user_id: id.to_string(),
            }),
            error: self
                .error
                .map(|e| IdentityError::TokenError(e.to_string())),
        }
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        pg_connection_url: "postgres://unused".into(),
        jwt_secret: JWT_SECRET.into(),
        openai_api_key: None,
        openai_base_url: "http://localhost:0/v1".into(),
        completion_model: DEFAULT_MODEL.into(),
    }
}

pub fn app_with_identity(
    identity: Arc<dyn IdentityProvider>,
    store: Arc<MemoryStore>,
    completions: Arc<ScriptedCompletions>,
) -> Router {
    router(AppState::new(test_config(), identity, store, completions))
}

pub fn app(store: Arc<MemoryStore>, completions: Arc<ScriptedCompletions>) -> Router {
    app_with_identity(
        Arc::new(JwtIdentityProvider::new(JWT_SECRET)),
        store,
        completions,
    )
}

/// POST `body` to `/api/chat`, returning status and parsed JSON.
pub async fn post_chat(
    app: Router,
    token: Option<String>,
    body: impl Into<Body>,
) -> (StatusCode, serde_json::Value) {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {token}"));
    }
    let resp = app
        .oneshot(req.body(body.into()).unwrap())
        .await
        .expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("parse JSON");
    (status, json)
}

pub fn chat_body(message: &str, advisor_id: &str) -> String {
    serde_json::json!({ "message": message, "advisor_id": advisor_id }).to_string()
}
