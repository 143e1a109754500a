use async_trait::async_trait;
use tracing::debug;

use super::{Credentials, IdentityProvider, IdentityResolution, jwt};
use crate::models::auth::Identity;

/// Resolves callers from HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtIdentityProvider {
    secret: Vec<u8>,
}

impl JwtIdentityProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, credentials: &Credentials) -> IdentityResolution {
        let Some(token) = credentials.bearer_token.as_deref() else {
            return IdentityResolution::anonymous();
        };

        match jwt::verify_access_token(token, &self.secret) {
            Ok(claims) => IdentityResolution::resolved(Identity {
                user_id: claims.sub,
            }),
            Err(e) => {
                debug!("bearer token rejected: {e}");
                IdentityResolution::failed(e)
            }
        }
    }
}
