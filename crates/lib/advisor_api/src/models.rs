//! HTTP request and response bodies.

use serde::{Deserialize, Serialize};

/// `POST /api/chat` body. Both fields are required and must be non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatTurnRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub advisor_id: Option<String>,
}

/// Successful chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub success: bool,
}

/// Failure envelope shared by every error path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    /// Model used for advisor replies.
    pub model: String,
    pub store_connected: bool,
}
