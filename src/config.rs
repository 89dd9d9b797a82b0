use anyhow::{Context, Result};
use std::env;
use uuid::Uuid;

use crate::session::{Role, Session};

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub socket: SocketConfig,
    pub session: Option<Session>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub rate_limit_per_second: u32,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub stale_after_seconds: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_seconds: 300,
            max_entries: 1000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SocketConfig {
    pub url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("API_BASE_URL").context("API_BASE_URL must be set")?,
                timeout_ms: env::var("API_TIMEOUT_MS")
                    .unwrap_or_else(|_| "10000".to_string())
                    .parse()
                    .context("API_TIMEOUT_MS must be a valid number")?,
                rate_limit_per_second: env::var("API_RATE_LIMIT_PER_SECOND")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .context("API_RATE_LIMIT_PER_SECOND must be a valid number")?,
                user_agent: env::var("API_USER_AGENT").unwrap_or_else(|_| {
                    format!("placement-client/{}", env!("CARGO_PKG_VERSION"))
                }),
            },
            cache: CacheConfig {
                stale_after_seconds: env::var("QUERY_CACHE_STALE_SECONDS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .context("QUERY_CACHE_STALE_SECONDS must be a valid number")?,
                max_entries: env::var("QUERY_CACHE_MAX_ENTRIES")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .context("QUERY_CACHE_MAX_ENTRIES must be a valid number")?,
            },
            socket: SocketConfig {
                url: env::var("SOCKET_URL").ok(),
            },
            session: Self::session_from_env()?,
        })
    }

    /// WebSocket endpoint: `SOCKET_URL`, or the API base URL with a ws scheme and `/ws`
    pub fn socket_url(&self) -> String {
        if let Some(url) = &self.socket.url {
            return url.clone();
        }

        let base = self.api.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };

        format!("{}/ws", ws_base)
    }

    fn session_from_env() -> Result<Option<Session>> {
        // A session is only bootstrapped when a token is present
        let token = match env::var("API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ => return Ok(None),
        };

        let user_id = env::var("API_USER_ID")
            .context("API_USER_ID must be set when API_TOKEN is set")?;
        let user_id =
            Uuid::parse_str(&user_id).context("API_USER_ID must be a valid UUID")?;
        let role = env::var("API_USER_ROLE")
            .unwrap_or_else(|_| "candidate".to_string())
            .parse::<Role>()
            .context("API_USER_ROLE must be one of candidate, unit, admin")?;

        Ok(Some(Session {
            user_id,
            role,
            token,
        }))
    }
}
