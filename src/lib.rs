//! Crypto trade logger backend.
//!
//! This library provides the core components for the trade logging service:
//! user accounts with JWT authentication, an open/close trade lifecycle with
//! exact-decimal P&L, and per-user portfolio statistics.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod persistence;
