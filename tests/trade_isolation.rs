//! Trade isolation tests.
//!
//! Users must never see or touch each other's trading activity: listings,
//! single-trade lookups, close attempts, and portfolio figures are all
//! scoped to the owner.

use rust_decimal_macros::dec;

use tradelogd::domain::entities::trade::{TradeSide, TradeStatus};
use tradelogd::domain::errors::TradeError;
use tradelogd::domain::services::portfolio_service::PortfolioService;
use tradelogd::domain::services::trade_service::{OpenTrade, TradeService};
use tradelogd::persistence::models::NewUser;
use tradelogd::persistence::repository::UserRepository;
use tradelogd::persistence::{init_database, DbPool};

async fn setup_two_users() -> (DbPool, i64, i64) {
    let pool = init_database("sqlite::memory:").await.unwrap();
    let users = UserRepository::new(pool.clone());
    let alice = users
        .create(NewUser {
            username: "trader_alice".to_string(),
            hashed_password: "hash".to_string(),
        })
        .await
        .unwrap();
    let bob = users
        .create(NewUser {
            username: "trader_bob".to_string(),
            hashed_password: "hash".to_string(),
        })
        .await
        .unwrap();
    (pool, alice.id, bob.id)
}

fn open_request(symbol: &str, entry: &str, qty: &str, side: TradeSide) -> OpenTrade {
    OpenTrade {
        symbol: symbol.to_string(),
        entry_price: entry.parse().unwrap(),
        quantity: qty.parse().unwrap(),
        side,
    }
}

#[tokio::test]
async fn user_cannot_see_other_users_trades() {
    let (pool, alice, bob) = setup_two_users().await;
    let trades = TradeService::new(pool);

    let trade_a = trades
        .open(alice, open_request("BTC/USDT", "50000", "1.0", TradeSide::Long))
        .await
        .unwrap();
    let trade_b = trades
        .open(bob, open_request("ETH/USDT", "3000", "10.0", TradeSide::Long))
        .await
        .unwrap();

    let listing = trades.list_for_user(alice, None).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, trade_a.id);
    assert_eq!(listing[0].symbol, "BTC/USDT");
    assert!(listing.iter().all(|t| t.id != trade_b.id));
}

#[tokio::test]
async fn user_cannot_fetch_other_users_trade() {
    let (pool, alice, bob) = setup_two_users().await;
    let trades = TradeService::new(pool);

    let trade_b = trades
        .open(bob, open_request("ETH/USDT", "3000", "5.0", TradeSide::Long))
        .await
        .unwrap();

    // Indistinguishable from a trade that does not exist at all.
    let foreign = trades.get_owned(trade_b.id, alice).await;
    let missing = trades.get_owned(999_999, alice).await;
    assert!(matches!(foreign, Err(TradeError::TradeNotFound { .. })));
    assert!(matches!(missing, Err(TradeError::TradeNotFound { .. })));
}

#[tokio::test]
async fn user_cannot_close_other_users_trade() {
    let (pool, alice, bob) = setup_two_users().await;
    let trades = TradeService::new(pool);

    let trade_b = trades
        .open(bob, open_request("ETH/USDT", "3000", "5.0", TradeSide::Long))
        .await
        .unwrap();

    let result = trades.close(trade_b.id, alice, dec!(3500)).await;
    assert!(matches!(result, Err(TradeError::TradeNotFound { .. })));

    // Bob's trade is untouched and still closable by Bob.
    let still_open = trades.get_owned(trade_b.id, bob).await.unwrap();
    assert_eq!(still_open.status, TradeStatus::Open);

    let closed = trades.close(trade_b.id, bob, dec!(3500)).await.unwrap();
    assert_eq!(closed.realized_pnl, Some(dec!(2500)));
}

#[tokio::test]
async fn portfolio_summary_excludes_other_users() {
    let (pool, alice, bob) = setup_two_users().await;
    let trades = TradeService::new(pool.clone());

    let trade_a = trades
        .open(alice, open_request("BTC/USDT", "50000", "0.1", TradeSide::Long))
        .await
        .unwrap();
    trades.close(trade_a.id, alice, dec!(55000)).await.unwrap();

    let trade_b = trades
        .open(bob, open_request("ETH/USDT", "3000", "2", TradeSide::Short))
        .await
        .unwrap();
    trades.close(trade_b.id, bob, dec!(2500)).await.unwrap();

    let portfolio = PortfolioService::new(pool);

    let summary_a = portfolio.summarize(alice).await.unwrap();
    assert_eq!(summary_a.total_realized_pnl, dec!(500));
    assert_eq!(summary_a.closed_positions, 1);
    assert_eq!(summary_a.win_rate, 100.0);

    let summary_b = portfolio.summarize(bob).await.unwrap();
    assert_eq!(summary_b.total_realized_pnl, dec!(1000));
    assert_eq!(summary_b.closed_positions, 1);
}

#[tokio::test]
async fn status_filter_stays_scoped_to_owner() {
    let (pool, alice, bob) = setup_two_users().await;
    let trades = TradeService::new(pool);

    let trade_a = trades
        .open(alice, open_request("BTC/USDT", "50000", "0.1", TradeSide::Long))
        .await
        .unwrap();
    trades.close(trade_a.id, alice, dec!(51000)).await.unwrap();
    trades
        .open(bob, open_request("BTC/USDT", "50000", "0.2", TradeSide::Long))
        .await
        .unwrap();

    let closed = trades
        .list_for_user(alice, Some(TradeStatus::Closed))
        .await
        .unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].id, trade_a.id);

    let open = trades
        .list_for_user(alice, Some(TradeStatus::Open))
        .await
        .unwrap();
    assert!(open.is_empty());
}
