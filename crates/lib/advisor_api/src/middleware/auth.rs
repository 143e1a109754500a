//! Authentication middleware — resolves the caller through the configured
//! [`IdentityProvider`](advisor_core::auth::IdentityProvider).

use advisor_core::auth::Credentials;
use advisor_core::models::auth::Identity;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::AppState;
use crate::error::AppError;

/// Key used to store the resolved caller in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Extract the bearer token from `Authorization`, if present.
pub fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let bearer_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    Credentials { bearer_token }
}

/// Axum middleware: resolves the caller and injects `AuthenticatedUser` into
/// request extensions.
///
/// A missing user is checked before a provider error, so a provider failure
/// that yields no user reports 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = credentials_from_headers(request.headers());
    let resolution = state.identity.resolve(&credentials).await;

    let Some(user) = resolution.user else {
        return Err(AppError::Unauthenticated);
    };

    if let Some(e) = resolution.error {
        warn!(user_id = %user.user_id, "identity provider error: {e}");
        return Err(AppError::IdentityProvider(e.to_string()));
    }

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}
