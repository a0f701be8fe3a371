//! Portfolio aggregation service.
//!
//! Scans a user's trades and computes summary statistics. Figures are
//! computed fresh on every call; stale numbers are worse than a second
//! query when money is involved.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entities::trade::TradeStatus;
use crate::domain::errors::TradeError;
use crate::persistence::repository::TradeRepository;
use crate::persistence::DbPool;

/// Per-user trading performance overview.
///
/// Breakeven trades (realized P&L exactly zero) count toward
/// `closed_positions` and the P&L sum but toward neither `winning_trades`
/// nor `losing_trades`.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_realized_pnl: Decimal,
    pub open_positions: i64,
    pub closed_positions: i64,
    pub winning_trades: i64,
    pub losing_trades: i64,
    /// Percentage of closed trades with strictly positive P&L, rounded to
    /// 2 decimal places. Zero when there are no closed trades.
    pub win_rate: f64,
}

pub struct PortfolioService {
    repo: TradeRepository,
}

impl PortfolioService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            repo: TradeRepository::new(pool),
        }
    }

    /// Compute summary statistics over the user's own trades only.
    pub async fn summarize(&self, user_id: i64) -> Result<PortfolioSummary, TradeError> {
        let open_positions = self
            .repo
            .count_for_user(user_id, TradeStatus::Open)
            .await?;

        let closed = self
            .repo
            .list_for_user(user_id, Some(TradeStatus::Closed))
            .await?;

        let mut total_realized_pnl = Decimal::ZERO;
        let mut winning_trades = 0i64;
        let mut losing_trades = 0i64;

        for record in &closed {
            let trade = record.clone().into_trade()?;
            if let Some(pnl) = trade.realized_pnl {
                total_realized_pnl += pnl;
                if pnl > Decimal::ZERO {
                    winning_trades += 1;
                } else if pnl < Decimal::ZERO {
                    losing_trades += 1;
                }
            }
        }

        let closed_positions = closed.len() as i64;
        let win_rate = if closed_positions > 0 {
            let rate = winning_trades as f64 / closed_positions as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(PortfolioSummary {
            total_realized_pnl,
            open_positions,
            closed_positions,
            winning_trades,
            losing_trades,
            win_rate,
        })
    }
}
