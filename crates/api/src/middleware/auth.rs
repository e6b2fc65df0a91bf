use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use boxoffice_core::identity::AuthUser as CoreAuthUser;
use boxoffice_types::AppError;

use crate::middleware::AppState;

/// Resolves the caller's identity, if any. Never fails on a missing
/// header — most of this surface works anonymously via `sessionId`; only
/// an invalid/expired token that *was* presented is `Unauthenticated`.
pub struct MaybeAuthUser(pub Option<CoreAuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    AppState: axum::extract::FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok()
            .map(|TypedHeader(Authorization(b))| b.token().to_string());

        let user = app_state
            .identity
            .authenticate(bearer.as_deref())
            .await?;

        Ok(MaybeAuthUser(user))
    }
}
