//! Chat request handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ChatTurnRequest, ChatTurnResponse};

/// `POST /api/chat` — store the user's message, ask the advisor, store the reply.
///
/// The body is read as raw bytes so that authentication (in middleware) is
/// always decided before the payload is inspected. Bodies over axum's default
/// 2 MB limit are rejected with 413 in the JSON error envelope.
pub async fn chat_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<ChatTurnResponse>> {
    let body = body?;
    let turn = ChatTurnRequest::from_slice(&body)?.validate()?;
    let resp = state.chat.handle(&user.0, turn).await?;
    Ok(Json(resp))
}
