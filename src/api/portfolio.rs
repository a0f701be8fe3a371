//! Portfolio analytics handler.

use axum::extract::State;
use axum::Json;

use super::error::ApiError;
use super::AppState;
use crate::auth::AuthUser;
use crate::domain::services::portfolio_service::{PortfolioService, PortfolioSummary};

/// GET /api/v1/portfolio/summary
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PortfolioSummary>, ApiError> {
    let service = PortfolioService::new(state.pool.clone());
    let summary = service.summarize(user.id).await?;
    Ok(Json(summary))
}
