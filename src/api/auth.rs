//! Registration and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::AppState;
use crate::auth::{create_access_token, hash_password, verify_password};
use crate::domain::entities::user::User;
use crate::domain::errors::TradeError;
use crate::persistence::models::NewUser;
use crate::persistence::repository::UserRepository;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// OAuth2-style token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Usernames are login identifiers: 3-50 chars, letters/digits/`_`/`-`,
/// normalized to lowercase so lookups are case-insensitive.
fn validate_username(raw: &str) -> Result<String, TradeError> {
    let username = raw.trim().to_lowercase();
    if username.len() < 3 || username.len() > 50 {
        return Err(TradeError::validation(
            "username",
            "must be between 3 and 50 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(TradeError::validation(
            "username",
            "can only contain letters, numbers, underscores, and hyphens",
        ));
    }
    Ok(username)
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let username = validate_username(&request.username)?;
    if request.password.len() < 8 {
        return Err(TradeError::validation("password", "must be at least 8 characters").into());
    }

    let users = UserRepository::new(state.pool.clone());

    if users
        .find_by_username(&username)
        .await
        .map_err(TradeError::from)?
        .is_some()
    {
        warn!("Registration failed: username '{}' already exists", username);
        return Err(TradeError::UsernameTaken(username).into());
    }

    let hashed_password = hash_password(&request.password)?;
    let record = users
        .create(NewUser {
            username,
            hashed_password,
        })
        .await
        .map_err(TradeError::from)?;

    info!("New user registered: '{}' (ID: {})", record.username, record.id);

    Ok((StatusCode::CREATED, Json(record.into_user())))
}

/// POST /api/v1/auth/login
///
/// Unknown username and wrong password produce the same error, so login
/// attempts cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());

    let user = users
        .find_by_username(&request.username.trim().to_lowercase())
        .await
        .map_err(TradeError::from)?;

    let user = match user {
        Some(user) if verify_password(&request.password, &user.hashed_password) => user,
        _ => {
            warn!("Login failed for '{}'", request.username);
            return Err(TradeError::InvalidCredentials.into());
        }
    };

    let access_token = create_access_token(&user, &state.config)?;
    info!("User logged in: '{}' (admin={})", user.username, user.is_admin);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
