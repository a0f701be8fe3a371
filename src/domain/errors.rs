use thiserror::Error;

use crate::persistence::DatabaseError;

/// Domain error taxonomy.
///
/// `TradeNotFound` deliberately covers both "no such trade" and "trade owned
/// by someone else" so that probing another user's trade ids reveals nothing.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Trade with ID {trade_id} not found")]
    TradeNotFound { trade_id: i64 },

    #[error("Trade {trade_id} is already closed")]
    AlreadyClosed { trade_id: i64 },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl TradeError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        TradeError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Machine-readable error code for the API envelope.
    pub fn code(&self) -> &'static str {
        match self {
            TradeError::Validation { .. } => "VALIDATION_ERROR",
            TradeError::TradeNotFound { .. } => "TRADE_NOT_FOUND",
            TradeError::AlreadyClosed { .. } => "TRADE_ALREADY_CLOSED",
            TradeError::InvalidCredentials => "INVALID_CREDENTIALS",
            TradeError::UsernameTaken(_) => "USERNAME_EXISTS",
            TradeError::Forbidden => "FORBIDDEN",
            TradeError::Internal(_) | TradeError::Database(_) => "INTERNAL_ERROR",
        }
    }

    /// Structured context attached to the API envelope, when any exists.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            TradeError::TradeNotFound { trade_id } | TradeError::AlreadyClosed { trade_id } => {
                Some(serde_json::json!({ "trade_id": trade_id }))
            }
            TradeError::Validation { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}
