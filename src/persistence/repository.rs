//! Database repositories.
//!
//! Data access for user accounts and trades. All trade queries that serve
//! user requests are scoped by `user_id`; the unscoped listing exists only
//! for the admin path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use tracing::{debug, error};

use super::models::{NewTrade, NewUser, TradeRecord, UserRecord};
use super::{DatabaseError, DbPool};
use crate::domain::entities::trade::TradeStatus;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    pub async fn create(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, hashed_password, is_admin, created_at)
            VALUES (?1, ?2, 0, ?3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            DatabaseError::QueryError(format!("Failed to create user: {}", e))
        })?;

        debug!("Created user: {} ({})", record.username, record.id);
        Ok(record)
    }

    /// Look up a user by username (stored lowercased)
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to get user {}: {}", username, e);
                DatabaseError::QueryError(format!("Failed to get user: {}", e))
            })?;

        Ok(record)
    }

    /// Grant or revoke admin rights. Used by operators and test setup.
    pub async fn set_admin(&self, id: i64, is_admin: bool) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET is_admin = ?1 WHERE id = ?2")
            .bind(is_admin)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update user {}: {}", id, e);
                DatabaseError::QueryError(format!("Failed to update user: {}", e))
            })?;

        Ok(())
    }
}

/// Trade repository
#[derive(Clone)]
pub struct TradeRepository {
    pool: DbPool,
}

impl TradeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new open trade
    pub async fn create(&self, trade: NewTrade) -> Result<TradeRecord, DatabaseError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, TradeRecord>(
            r#"
            INSERT INTO trades (user_id, symbol, entry_price, quantity, side, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, 'OPEN', ?6)
            RETURNING *
            "#,
        )
        .bind(trade.user_id)
        .bind(&trade.symbol)
        .bind(trade.entry_price.to_string())
        .bind(trade.quantity.to_string())
        .bind(trade.side.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create trade: {}", e);
            DatabaseError::QueryError(format!("Failed to create trade: {}", e))
        })?;

        debug!("Created trade: {} for user {}", record.id, record.user_id);
        Ok(record)
    }

    /// Fetch a trade only if it belongs to the given user.
    ///
    /// Returns `None` both when the trade does not exist and when it belongs
    /// to someone else; callers cannot tell the two apart.
    pub async fn get_owned(
        &self,
        trade_id: i64,
        user_id: i64,
    ) -> Result<Option<TradeRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, TradeRecord>(
            "SELECT * FROM trades WHERE id = ?1 AND user_id = ?2",
        )
        .bind(trade_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get trade {}: {}", trade_id, e);
            DatabaseError::QueryError(format!("Failed to get trade: {}", e))
        })?;

        Ok(record)
    }

    /// List a user's trades, newest first, optionally filtered by status
    pub async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<TradeStatus>,
    ) -> Result<Vec<TradeRecord>, DatabaseError> {
        let result = match status {
            Some(status) => {
                sqlx::query_as::<_, TradeRecord>(
                    r#"
                    SELECT * FROM trades
                    WHERE user_id = ?1 AND status = ?2
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(user_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TradeRecord>(
                    "SELECT * FROM trades WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        };

        result.map_err(|e| {
            error!("Failed to list trades for user {}: {}", user_id, e);
            DatabaseError::QueryError(format!("Failed to list trades: {}", e))
        })
    }

    /// List every trade in the system, newest first. Admin path only.
    pub async fn list_all(&self) -> Result<Vec<TradeRecord>, DatabaseError> {
        let records = sqlx::query_as::<_, TradeRecord>(
            "SELECT * FROM trades ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list all trades: {}", e);
            DatabaseError::QueryError(format!("Failed to list trades: {}", e))
        })?;

        Ok(records)
    }

    /// Count a user's trades with the given status
    pub async fn count_for_user(
        &self,
        user_id: i64,
        status: TradeStatus,
    ) -> Result<i64, DatabaseError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM trades WHERE user_id = ?1 AND status = ?2",
        )
        .bind(user_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to count trades for user {}: {}", user_id, e);
            DatabaseError::QueryError(format!("Failed to count trades: {}", e))
        })?;

        let count: i64 = row.get("count");
        Ok(count)
    }

    /// Atomically close an open trade.
    ///
    /// The update is conditional on `status = 'OPEN'`, so of two concurrent
    /// close attempts exactly one gets the row back; the other sees `None`.
    pub async fn close(
        &self,
        trade_id: i64,
        user_id: i64,
        exit_price: Decimal,
        realized_pnl: Decimal,
        closed_at: DateTime<Utc>,
    ) -> Result<Option<TradeRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, TradeRecord>(
            r#"
            UPDATE trades
            SET status = 'CLOSED', exit_price = ?1, realized_pnl = ?2, closed_at = ?3
            WHERE id = ?4 AND user_id = ?5 AND status = 'OPEN'
            RETURNING *
            "#,
        )
        .bind(exit_price.to_string())
        .bind(realized_pnl.to_string())
        .bind(closed_at)
        .bind(trade_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to close trade {}: {}", trade_id, e);
            DatabaseError::QueryError(format!("Failed to close trade: {}", e))
        })?;

        if record.is_some() {
            debug!("Closed trade: {}", trade_id);
        }
        Ok(record)
    }
}
