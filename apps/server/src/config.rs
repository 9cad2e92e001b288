use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

use paragliding_core::constants::DEFAULT_TICKER_CAP;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Timeout for outbound calls: IGC downloads and webhook deliveries.
    pub http_timeout: Duration,
    pub ticker_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/paragliding.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            http_timeout: Duration::from_millis(10_000),
            ticker_cap: DEFAULT_TICKER_CAP,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("PARAGLIDING_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PARAGLIDING_LISTEN_ADDR '{}'", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("PARAGLIDING_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("PARAGLIDING_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = env_millis("PARAGLIDING_REQUEST_TIMEOUT_MS", defaults.request_timeout);
        let http_timeout = env_millis("PARAGLIDING_HTTP_TIMEOUT_MS", defaults.http_timeout);
        let ticker_cap = std::env::var("PARAGLIDING_TICKER_CAP")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|cap| *cap > 0)
            .unwrap_or(defaults.ticker_cap);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
            http_timeout,
            ticker_cap,
        })
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
