//! Server configuration loaded from environment variables.

/// Token lifetime and key-material configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Filesystem path of the PEM-encoded RSA private key (signing).
    pub private_key_path: String,
    /// Filesystem path of the PEM-encoded RSA public key (verification).
    pub public_key_path: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `JWT_PRIVATE_KEY_PATH`      | **yes**  | --      |
    /// | `JWT_PUBLIC_KEY_PATH`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`    | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`   | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric one is invalid.
    /// Key misconfiguration must fail startup, never a request.
    pub fn from_env() -> Self {
        let private_key_path = std::env::var("JWT_PRIVATE_KEY_PATH")
            .expect("JWT_PRIVATE_KEY_PATH must be set in the environment");
        let public_key_path = std::env::var("JWT_PUBLIC_KEY_PATH")
            .expect("JWT_PUBLIC_KEY_PATH must be set in the environment");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            private_key_path,
            public_key_path,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except key paths have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token configuration (key paths, expiry durations).
    pub tokens: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let tokens = TokenConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tokens,
        }
    }
}
