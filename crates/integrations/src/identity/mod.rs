//! Bearer JWT verification, mirroring the claim shape of the teacher's
//! Supabase auth client without the JWKS round trip: this deployment
//! verifies against a single configured signing secret.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use boxoffice_core::identity::{AuthUser, IdentityProvider};
use boxoffice_types::{AppError, Result};

#[derive(Debug, Deserialize)]
struct JwtClaims {
    sub: Uuid,
    email: Option<String>,
    #[serde(default = "default_role")]
    role: String,
}

fn default_role() -> String {
    "authenticated".to_string()
}

#[derive(Clone)]
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(signing_secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(signing_secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<Option<AuthUser>> {
        let Some(token) = bearer_token else {
            return Ok(None);
        };

        let claims = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AppError::Unauthenticated)?
            .claims;

        Ok(Some(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_token_is_anonymous() {
        let provider = JwtIdentityProvider::new("secret", "authenticated");
        assert!(provider.authenticate(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_token_is_unauthenticated() {
        let provider = JwtIdentityProvider::new("secret", "authenticated");
        let err = provider.authenticate(Some("not-a-jwt")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }
}
