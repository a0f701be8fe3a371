//! Authentication: password hashing, JWT access tokens, and the axum
//! extractors that gate protected routes.
//!
//! The boundary resolves a request to a `(user, is_admin)` pair before any
//! domain service runs; the services themselves never see credentials.

use async_trait::async_trait;
use axum::extract::FromRef;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::config::AppConfig;
use crate::domain::errors::TradeError;
use crate::persistence::models::UserRecord;
use crate::persistence::repository::UserRepository;

/// JWT claims carried in every access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    pub is_admin: bool,
    /// Expiry as a unix timestamp; validated on decode
    pub exp: usize,
}

/// Bcrypt-hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, TradeError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| TradeError::Internal(format!("password hashing failed: {}", e)))
}

/// Constant-time verification against a stored hash. A malformed hash
/// verifies as false rather than erroring; login treats both the same.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

/// Issue a signed HS256 access token for the user.
pub fn create_access_token(user: &UserRecord, config: &AppConfig) -> Result<String, TradeError> {
    let expiry = Utc::now() + Duration::minutes(config.token_expiry_minutes);
    let claims = Claims {
        sub: user.username.clone(),
        is_admin: user.is_admin,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| TradeError::Internal(format!("token signing failed: {}", e)))
}

/// Decode and validate a token. Returns `None` for anything invalid:
/// bad signature, expired, malformed.
pub fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .ok()
}

/// Extractor for the authenticated user on protected routes.
///
/// Validates the bearer token and resolves the user row, so a token issued
/// to a since-deleted account is rejected.
pub struct AuthUser(pub UserRecord);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(auth) if auth.starts_with("Bearer ") => &auth[7..],
            Some(_) => {
                warn!("Invalid Authorization header format (expected Bearer token)");
                return Err(ApiError::unauthorized("Could not validate credentials"));
            }
            None => {
                return Err(ApiError::unauthorized("Missing Authorization header"));
            }
        };

        let claims = decode_token(token, &state.config.jwt_secret)
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        let users = UserRepository::new(state.pool.clone());
        let user = users
            .find_by_username(&claims.sub)
            .await
            .map_err(TradeError::from)?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        Ok(AuthUser(user))
    }
}

/// Extractor for admin-only routes. Chains through [`AuthUser`] and then
/// checks the `is_admin` flag, so non-admins get 403 rather than 401.
pub struct AdminUser(pub UserRecord);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            warn!("User {} attempted an admin-only operation", user.username);
            return Err(TradeError::Forbidden.into());
        }
        Ok(AdminUser(user))
    }
}
