//! Trade lifecycle handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::auth::AuthUser;
use crate::domain::entities::trade::{Trade, TradeSide, TradeStatus};
use crate::domain::services::trade_service::{OpenTrade, TradeService};

#[derive(Debug, Deserialize)]
pub struct OpenTradeRequest {
    pub symbol: String,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    /// Accepts LONG/SHORT, plus the exchange-style BUY/SELL aliases and the
    /// legacy `trade_type` field name.
    #[serde(alias = "trade_type")]
    pub side: TradeSide,
}

#[derive(Debug, Deserialize)]
pub struct CloseTradeRequest {
    pub exit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TradeListQuery {
    pub status: Option<TradeStatus>,
}

/// Trade as exposed over the API. Owner id is deliberately omitted;
/// every listing is already scoped to a caller.
#[derive(Debug, Serialize)]
pub struct TradeResponse {
    pub id: i64,
    pub symbol: String,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    pub side: TradeSide,
    pub status: TradeStatus,
    pub exit_price: Option<Decimal>,
    pub realized_pnl: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<Trade> for TradeResponse {
    fn from(trade: Trade) -> Self {
        TradeResponse {
            id: trade.id,
            symbol: trade.symbol,
            entry_price: trade.entry_price,
            quantity: trade.quantity,
            side: trade.side,
            status: trade.status,
            exit_price: trade.exit_price,
            realized_pnl: trade.realized_pnl,
            created_at: trade.created_at,
            closed_at: trade.closed_at,
        }
    }
}

/// POST /api/v1/trades
pub async fn create_trade(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<OpenTradeRequest>,
) -> Result<(StatusCode, Json<TradeResponse>), ApiError> {
    let service = TradeService::new(state.pool.clone());
    let trade = service
        .open(
            user.id,
            OpenTrade {
                symbol: request.symbol,
                entry_price: request.entry_price,
                quantity: request.quantity,
                side: request.side,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(trade.into())))
}

/// GET /api/v1/trades?status=OPEN|CLOSED
pub async fn list_trades(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<TradeListQuery>,
) -> Result<Json<Vec<TradeResponse>>, ApiError> {
    let service = TradeService::new(state.pool.clone());
    let trades = service.list_for_user(user.id, query.status).await?;

    Ok(Json(trades.into_iter().map(TradeResponse::from).collect()))
}

/// PATCH /api/v1/trades/:trade_id/close
pub async fn close_trade(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(trade_id): Path<i64>,
    Json(request): Json<CloseTradeRequest>,
) -> Result<Json<TradeResponse>, ApiError> {
    let service = TradeService::new(state.pool.clone());
    let trade = service.close(trade_id, user.id, request.exit_price).await?;

    Ok(Json(trade.into()))
}
