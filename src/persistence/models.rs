//! Database models.
//!
//! Row-shaped structs plus the insert inputs the repositories accept.
//! Decimal columns are TEXT in SQLite; `TradeRecord::into_trade` parses them
//! back into exact decimals and fails loudly on a corrupt row rather than
//! silently producing wrong P&L.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::DatabaseError;
use crate::domain::entities::trade::{Trade, TradeSide, TradeStatus};
use crate::domain::entities::user::User;

/// User row in the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub hashed_password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Drop the password hash; everything else is safe to expose.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}

/// Trade row in the database
#[derive(Debug, Clone, FromRow)]
pub struct TradeRecord {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub entry_price: String,
    pub quantity: String,
    pub side: String,
    pub status: String,
    pub exit_price: Option<String>,
    pub realized_pnl: Option<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl TradeRecord {
    pub fn into_trade(self) -> Result<Trade, DatabaseError> {
        let parse_decimal = |field: &str, value: &str| {
            value.parse::<Decimal>().map_err(|e| {
                DatabaseError::CorruptRow(format!(
                    "trade {}: bad {} '{}': {}",
                    self.id, field, value, e
                ))
            })
        };

        let entry_price = parse_decimal("entry_price", &self.entry_price)?;
        let quantity = parse_decimal("quantity", &self.quantity)?;
        let exit_price = self
            .exit_price
            .as_deref()
            .map(|v| parse_decimal("exit_price", v))
            .transpose()?;
        let realized_pnl = self
            .realized_pnl
            .as_deref()
            .map(|v| parse_decimal("realized_pnl", v))
            .transpose()?;

        let side = self.side.parse::<TradeSide>().map_err(|e| {
            DatabaseError::CorruptRow(format!("trade {}: {}", self.id, e))
        })?;
        let status = self.status.parse::<TradeStatus>().map_err(|e| {
            DatabaseError::CorruptRow(format!("trade {}: {}", self.id, e))
        })?;

        Ok(Trade {
            id: self.id,
            user_id: self.user_id,
            symbol: self.symbol,
            entry_price,
            quantity,
            side,
            status,
            exit_price,
            realized_pnl,
            created_at: self.created_at,
            closed_at: self.closed_at,
        })
    }
}

/// Create user input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
}

/// Create trade input. Numeric fields are already validated and rounded to
/// 8 fractional digits by the service layer.
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub user_id: i64,
    pub symbol: String,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    pub side: TradeSide,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(entry: &str, status: &str) -> TradeRecord {
        TradeRecord {
            id: 1,
            user_id: 2,
            symbol: "BTC/USDT".to_string(),
            entry_price: entry.to_string(),
            quantity: "0.1".to_string(),
            side: "LONG".to_string(),
            status: status.to_string(),
            exit_price: None,
            realized_pnl: None,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    #[test]
    fn test_into_trade_parses_decimals_exactly() {
        let trade = record("50000.12345678", "OPEN").into_trade().unwrap();
        assert_eq!(trade.entry_price, dec!(50000.12345678));
        assert_eq!(trade.quantity, dec!(0.1));
        assert_eq!(trade.side, TradeSide::Long);
        assert_eq!(trade.status, TradeStatus::Open);
        assert!(trade.exit_price.is_none());
        assert!(trade.realized_pnl.is_none());
    }

    #[test]
    fn test_into_trade_rejects_corrupt_decimal() {
        let result = record("not-a-number", "OPEN").into_trade();
        assert!(matches!(result, Err(DatabaseError::CorruptRow(_))));
    }

    #[test]
    fn test_into_trade_rejects_unknown_status() {
        let result = record("1", "SETTLED").into_trade();
        assert!(matches!(result, Err(DatabaseError::CorruptRow(_))));
    }

    #[test]
    fn test_into_user_drops_hash() {
        let user = UserRecord {
            id: 1,
            username: "alice".to_string(),
            hashed_password: "$2b$12$secret".to_string(),
            is_admin: false,
            created_at: Utc::now(),
        }
        .into_user();
        assert_eq!(user.username, "alice");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
    }
}
