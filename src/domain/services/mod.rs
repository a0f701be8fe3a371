pub mod portfolio_service;
pub mod trade_service;
