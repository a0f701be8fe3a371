use std::net::SocketAddr;

/// Development fallback only. `main` warns loudly when this is still in use.
pub const DEFAULT_JWT_SECRET: &str = "dev-secret-key-change-in-production";

/// Application configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx SQLite URL, e.g. "sqlite://data/tradelog.db"
    pub database_url: String,

    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// HMAC secret for signing JWT access tokens
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub token_expiry_minutes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/tradelog.db".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_expiry_minutes: 30,
        }
    }
}

impl AppConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bind_addr);

        let jwt_secret = std::env::var("JWT_SECRET_KEY").unwrap_or(defaults.jwt_secret);

        let token_expiry_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.token_expiry_minutes);

        Self {
            database_url,
            bind_addr,
            jwt_secret,
            token_expiry_minutes,
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
