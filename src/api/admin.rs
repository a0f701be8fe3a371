//! Admin handlers. The [`AdminUser`] extractor rejects non-admins with 403
//! before any of these run.

use axum::extract::State;
use axum::Json;

use super::error::ApiError;
use super::trades::TradeResponse;
use super::AppState;
use crate::auth::AdminUser;
use crate::domain::services::trade_service::TradeService;

/// GET /api/v1/admin/trades
///
/// System-wide read-only listing for monitoring and support. Mutation stays
/// owner-only; there is no admin close path.
pub async fn list_all_trades(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<TradeResponse>>, ApiError> {
    let service = TradeService::new(state.pool.clone());
    let trades = service.list_all().await?;
    Ok(Json(trades.into_iter().map(TradeResponse::from).collect()))
}
