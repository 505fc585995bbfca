use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::UserRole;

/// Identity attached to every issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Wire claims: the payload plus the expiry stamped at issuance. Immutable
/// once embedded in a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: usize,
}

/// HS256 key material for both token kinds.
///
/// Access and refresh tokens are signed with independent secrets, so a token
/// of one kind can never be presented as the other. Verification failures are
/// reported uniformly without distinguishing expiry from tampering.
pub struct TokenKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.refresh_secret.as_bytes(),
            config.token_expires_in,
            config.refresh_token_expires_in,
        )
    }

    pub fn new(access_secret: &[u8], refresh_secret: &[u8], access_ttl: i64, refresh_ttl: i64) -> Self {
        TokenKeys {
            access_encoding: EncodingKey::from_secret(access_secret),
            access_decoding: DecodingKey::from_secret(access_secret),
            refresh_encoding: EncodingKey::from_secret(refresh_secret),
            refresh_decoding: DecodingKey::from_secret(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    fn claims_for(&self, payload: &TokenPayload, ttl: i64) -> Claims {
        Claims {
            id: payload.id,
            email: payload.email.clone(),
            role: payload.role,
            exp: (Utc::now() + Duration::seconds(ttl)).timestamp() as usize,
        }
    }

    pub fn issue_access_token(&self, payload: &TokenPayload) -> Result<String, ApiError> {
        let claims = self.claims_for(payload, self.access_ttl);
        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign access token: {e}")))
    }

    pub fn issue_refresh_token(&self, payload: &TokenPayload) -> Result<String, ApiError> {
        let claims = self.claims_for(payload, self.refresh_ttl);
        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign refresh token: {e}")))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.access_decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired access token".into()))
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.refresh_decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired refresh token".into()))
    }
}
