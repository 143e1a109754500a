//! # advisor_api
//!
//! HTTP API library for Advisor chat.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use advisor_core::auth::IdentityProvider;
use advisor_core::completion::CompletionService;
use advisor_core::store::ConversationStore;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};
use crate::services::chat::ChatTurnHandler;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Resolves the caller of protected routes.
    pub identity: Arc<dyn IdentityProvider>,
    /// Conversation store, shared with the chat handler.
    pub store: Arc<dyn ConversationStore>,
    /// Chat turn pipeline.
    pub chat: ChatTurnHandler,
}

impl AppState {
    /// Wire the collaborators into a state, building the chat handler with
    /// the configured completion model.
    pub fn new(
        config: ApiConfig,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ConversationStore>,
        completions: Arc<dyn CompletionService>,
    ) -> Self {
        let chat = ChatTurnHandler::new(
            store.clone(),
            completions,
            config.completion_model.clone(),
        );
        Self {
            config,
            identity,
            store,
            chat,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new().route(routes::GET_API_HEALTH, get(health::health_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
