//! Caller identity resolution.
//!
//! The [`IdentityProvider`] trait is the seam between the HTTP layer and
//! whatever issues credentials. [`JwtIdentityProvider`] verifies HS256 bearer
//! tokens signed with the shared secret.

pub mod jwt;
mod provider;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::Identity;

pub use provider::JwtIdentityProvider;

/// Identity provider errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Token error: {0}")]
    TokenError(String),
}

/// Credentials carried by an inbound request, opaque to the chat handler.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Token from `Authorization: Bearer <token>`, if any.
    pub bearer_token: Option<String>,
}

/// Outcome of resolving a caller.
///
/// A provider may report an error alongside (or instead of) a user. Callers
/// check `user` first: no user means unauthenticated regardless of `error`.
#[derive(Debug, Default)]
pub struct IdentityResolution {
    pub user: Option<Identity>,
    pub error: Option<IdentityError>,
}

impl IdentityResolution {
    pub fn resolved(user: Identity) -> Self {
        Self {
            user: Some(user),
            error: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn failed(error: IdentityError) -> Self {
        Self {
            user: None,
            error: Some(error),
        }
    }
}

/// Resolves the caller of a request from its credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> IdentityResolution;
}
