use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a trade.
///
/// Long profits when the price rises, short when it falls. The legacy wire
/// names BUY/SELL are accepted on input for compatibility with exchange-style
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[serde(alias = "BUY")]
    Long,
    #[serde(alias = "SELL")]
    Short,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Long => "LONG",
            TradeSide::Short => "SHORT",
        }
    }
}

impl std::str::FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LONG" | "BUY" => Ok(TradeSide::Long),
            "SHORT" | "SELL" => Ok(TradeSide::Short),
            other => Err(format!("unknown trade side: {}", other)),
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a trade. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "OPEN",
            TradeStatus::Closed => "CLOSED",
        }
    }
}

impl std::str::FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(TradeStatus::Open),
            "CLOSED" => Ok(TradeStatus::Closed),
            other => Err(format!("unknown trade status: {}", other)),
        }
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single trading position, tracked from open to close.
///
/// `exit_price`, `realized_pnl` and `closed_at` are all `None` while the
/// trade is open and all `Some` once it is closed; the repository's
/// conditional update keeps that invariant even under concurrent closes.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub id: i64,
    pub user_id: i64,
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

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}

/// Realized P&L for a closed position.
///
/// Long:  (exit - entry) * quantity
/// Short: (entry - exit) * quantity
///
/// Exact decimal arithmetic throughout; positive means profit, negative loss.
pub fn calculate_pnl(
    side: TradeSide,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
) -> Decimal {
    match side {
        TradeSide::Long => (exit_price - entry_price) * quantity,
        TradeSide::Short => (entry_price - exit_price) * quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_long_pnl_btc_scenario() {
        // Open BTC/USDT long at 50000, quantity 0.1, close at 55000.
        let pnl = calculate_pnl(TradeSide::Long, dec!(50000), dec!(55000), dec!(0.1));
        assert_eq!(pnl, dec!(500));
    }

    #[test]
    fn test_short_pnl_eth_scenario() {
        // Open ETH/USDT short at 3000, quantity 2, close at 2500.
        let pnl = calculate_pnl(TradeSide::Short, dec!(3000), dec!(2500), dec!(2));
        assert_eq!(pnl, dec!(1000));
    }

    #[test]
    fn test_long_loses_when_price_drops() {
        let pnl = calculate_pnl(TradeSide::Long, dec!(50000), dec!(45000), dec!(0.5));
        assert_eq!(pnl, dec!(-2500));
    }

    #[test]
    fn test_short_loses_when_price_rises() {
        let pnl = calculate_pnl(TradeSide::Short, dec!(3000), dec!(3100), dec!(2));
        assert_eq!(pnl, dec!(-200));
    }

    #[test]
    fn test_breakeven_is_exactly_zero() {
        let pnl = calculate_pnl(TradeSide::Long, dec!(123.456), dec!(123.456), dec!(7));
        assert_eq!(pnl, Decimal::ZERO);
    }

    #[test]
    fn test_sign_property() {
        let entry = dec!(100);
        let qty = dec!(3);
        for exit in [dec!(99.99999999), dec!(100.00000001), dec!(250)] {
            let long = calculate_pnl(TradeSide::Long, entry, exit, qty);
            let short = calculate_pnl(TradeSide::Short, entry, exit, qty);
            assert_eq!(long > Decimal::ZERO, exit > entry);
            assert_eq!(short > Decimal::ZERO, exit < entry);
            // Long and short mirror each other for the same fill.
            assert_eq!(long, -short);
        }
    }

    #[test]
    fn test_exact_decimal_no_float_drift() {
        // 0.1 + 0.2 style inputs stay exact with decimal arithmetic.
        let pnl = calculate_pnl(TradeSide::Long, dec!(0.1), dec!(0.3), dec!(1));
        assert_eq!(pnl, dec!(0.2));
    }

    #[test]
    fn test_side_parsing_accepts_legacy_aliases() {
        assert_eq!("LONG".parse::<TradeSide>().unwrap(), TradeSide::Long);
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Long);
        assert_eq!("short".parse::<TradeSide>().unwrap(), TradeSide::Short);
        assert_eq!("SELL".parse::<TradeSide>().unwrap(), TradeSide::Short);
        assert!("HOLD".parse::<TradeSide>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!("OPEN".parse::<TradeStatus>().unwrap(), TradeStatus::Open);
        assert_eq!("CLOSED".parse::<TradeStatus>().unwrap(), TradeStatus::Closed);
        assert_eq!(TradeStatus::Open.as_str(), "OPEN");
        assert!("SETTLED".parse::<TradeStatus>().is_err());
    }

    #[test]
    fn test_side_json_names() {
        assert_eq!(serde_json::to_string(&TradeSide::Long).unwrap(), "\"LONG\"");
        let side: TradeSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, TradeSide::Short);
    }
}
