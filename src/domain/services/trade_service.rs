//! Trade lifecycle service.
//!
//! Enforces the OPEN -> CLOSED state machine, input validation, and the
//! ownership scoping of every read and write. HTTP handlers stay thin and
//! call into here.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::entities::symbol::Symbol;
use crate::domain::entities::trade::{calculate_pnl, Trade, TradeSide, TradeStatus};
use crate::domain::errors::TradeError;
use crate::persistence::models::NewTrade;
use crate::persistence::repository::TradeRepository;
use crate::persistence::DbPool;

/// Request to open a position, as accepted from the boundary.
#[derive(Debug, Clone)]
pub struct OpenTrade {
    pub symbol: String,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    pub side: TradeSide,
}

pub struct TradeService {
    repo: TradeRepository,
}

impl TradeService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            repo: TradeRepository::new(pool),
        }
    }

    /// Open a new position for `user_id`.
    ///
    /// Validates price and quantity strictly positive and the symbol format,
    /// normalizes the symbol to uppercase, and rounds numerics to 8
    /// fractional digits before storage.
    pub async fn open(&self, user_id: i64, request: OpenTrade) -> Result<Trade, TradeError> {
        let symbol = Symbol::parse(&request.symbol)?;
        let entry_price = positive_decimal("entry_price", request.entry_price)?;
        let quantity = positive_decimal("quantity", request.quantity)?;

        let record = self
            .repo
            .create(NewTrade {
                user_id,
                symbol: symbol.into_string(),
                entry_price,
                quantity,
                side: request.side,
            })
            .await?;

        let trade = record.into_trade()?;
        info!(
            "Opened trade {} ({} {} @ {}) for user {}",
            trade.id, trade.side, trade.symbol, trade.entry_price, user_id
        );
        Ok(trade)
    }

    /// List the user's own trades, newest first, optionally filtered.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<TradeStatus>,
    ) -> Result<Vec<Trade>, TradeError> {
        let records = self.repo.list_for_user(user_id, status).await?;
        records
            .into_iter()
            .map(|r| r.into_trade().map_err(TradeError::from))
            .collect()
    }

    /// List every trade in the system. Callers must gate this behind the
    /// admin check; the service itself does not re-check.
    pub async fn list_all(&self) -> Result<Vec<Trade>, TradeError> {
        let records = self.repo.list_all().await?;
        records
            .into_iter()
            .map(|r| r.into_trade().map_err(TradeError::from))
            .collect()
    }

    /// Fetch a trade the user owns, or `TradeNotFound`.
    ///
    /// A trade owned by someone else yields the same error as a trade that
    /// does not exist.
    pub async fn get_owned(&self, trade_id: i64, user_id: i64) -> Result<Trade, TradeError> {
        match self.repo.get_owned(trade_id, user_id).await? {
            Some(record) => Ok(record.into_trade()?),
            None => Err(TradeError::TradeNotFound { trade_id }),
        }
    }

    /// Close an open trade at `exit_price`, computing realized P&L.
    ///
    /// The underlying update is conditional on the trade still being open,
    /// so a concurrent close cannot double-apply; the loser of that race
    /// gets `AlreadyClosed`.
    pub async fn close(
        &self,
        trade_id: i64,
        user_id: i64,
        exit_price: Decimal,
    ) -> Result<Trade, TradeError> {
        let exit_price = positive_decimal("exit_price", exit_price)?;

        let trade = self.get_owned(trade_id, user_id).await?;
        if !trade.is_open() {
            return Err(TradeError::AlreadyClosed { trade_id });
        }

        let realized_pnl = calculate_pnl(trade.side, trade.entry_price, exit_price, trade.quantity);

        let record = self
            .repo
            .close(trade_id, user_id, exit_price, realized_pnl, Utc::now())
            .await?;

        match record {
            Some(record) => {
                let trade = record.into_trade()?;
                info!(
                    "Closed trade {} @ {} (P&L {}) for user {}",
                    trade.id, exit_price, realized_pnl, user_id
                );
                Ok(trade)
            }
            // Lost a race with another close between the read and the update.
            None => Err(TradeError::AlreadyClosed { trade_id }),
        }
    }
}

/// Validate a monetary input: strictly positive, capped at 8 fractional
/// digits (the industry-standard satoshi precision).
fn positive_decimal(field: &'static str, value: Decimal) -> Result<Decimal, TradeError> {
    if value <= Decimal::ZERO {
        return Err(TradeError::validation(field, "must be greater than 0"));
    }
    Ok(value.round_dp(8))
}
