pub mod symbol;
pub mod trade;
pub mod user;
