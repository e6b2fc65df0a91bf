//! Authentication is a named external collaborator: callers may be
//! anonymous (seat holds only need a `sessionId`) or carry a bearer token
//! that resolves to a user. `IdentityProvider` is the seam; a fuller JWT
//! verifier lives in `boxoffice-integrations::identity`.

use async_trait::async_trait;
use uuid::Uuid;

use boxoffice_types::Result;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to a user. `None` means no token was
    /// presented, which is valid for anonymous hold/checkout flows, not an
    /// error. An invalid or expired token is `Unauthenticated`.
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<Option<AuthUser>>;
}

/// Treats every request as anonymous. Used when no identity provider is
/// configured; anonymous holds and checkouts still work end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousIdentityProvider;

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn authenticate(&self, _bearer_token: Option<&str>) -> Result<Option<AuthUser>> {
        Ok(None)
    }
}
