//! API server configuration.

use advisor_core::auth::jwt::resolve_jwt_secret;
use advisor_core::completion::{DEFAULT_MODEL, OPENAI_API_BASE};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// API key for the completion service.
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible completion API.
    pub openai_base_url: String,
    /// Model used for every advisor reply.
    pub completion_model: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                                     |
    /// |--------------------|---------------------------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:3100`                            |
    /// | `DATABASE_URL`     | `postgres://localhost:5432/advisor`         |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file     |
    /// | `OPENAI_API_KEY`   | unset                                       |
    /// | `OPENAI_BASE_URL`  | `https://api.openai.com/v1`                 |
    /// | `COMPLETION_MODEL` | `gpt-4o-mini`                               |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/advisor".into()),
            jwt_secret: resolve_jwt_secret(),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OPENAI_API_BASE.into()),
            completion_model: std::env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}
