use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account. The password hash never leaves the persistence
/// layer; this entity carries only the fields safe to expose.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
