use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use backend_domain::{DbConfig, RuntimeConfig, StorageKind, UpstreamConfig, WatchIntervals};

pub const CONFIG_PATH_ENV: &str = "STATWATCH_CONFIG";

/// Where the loaded values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// The config file was missing.
    Defaults(String),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("loaded config from {}", path),
            ConfigSource::Defaults(path) => warn!("{} not found, using defaults", path),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub api_base_url: String,
    pub upstream_timeout_seconds: u64,
    pub storage: String,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub request_timeout_seconds: u64,
    pub feed_poll_seconds: u64,
    pub schedule_poll_seconds: u64,
    pub off_season_poll_seconds: u64,
    pub player_pause_millis: u64,
    pub write_retry_backoff_seconds: u64,
    pub write_retry_attempts: u32,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            api_token: None,
            api_base_url: "https://statsapi.web.nhl.com".to_string(),
            upstream_timeout_seconds: 10,
            storage: "clickhouse".to_string(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "statwatch".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            request_timeout_seconds: 15,
            feed_poll_seconds: 20,
            schedule_poll_seconds: 60,
            off_season_poll_seconds: 3600,
            player_pause_millis: 200,
            write_retry_backoff_seconds: 3,
            write_retry_attempts: 3,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads from `STATWATCH_CONFIG` (default `./config.toml`). Runs before the
    /// subscriber exists, so the caller logs the returned `ConfigSource`.
    pub async fn load() -> Result<(Self, ConfigSource)> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<(Self, ConfigSource)> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let (mut config, source) = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            (Self::from_toml(&content)?, ConfigSource::File(path.to_string()))
        } else {
            (AppConfig::default(), ConfigSource::Defaults(path.to_string()))
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok((config, source))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        self.api_token = non_blank(self.api_token.take());
        self.clickhouse_user = non_blank(self.clickhouse_user.take());
        self.clickhouse_password = non_blank(self.clickhouse_password.take());
        self.log_dir = non_blank(self.log_dir.take());
        self.storage = self.storage.trim().to_lowercase();
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if StorageKind::parse(&self.storage).is_none() {
            return Err(anyhow!(
                "unknown storage '{}', expected 'clickhouse' or 'memory'",
                self.storage
            ));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(anyhow!("api_base_url must be an http(s) url"));
        }
        if self.feed_poll_seconds == 0
            || self.schedule_poll_seconds == 0
            || self.off_season_poll_seconds == 0
        {
            return Err(anyhow!("poll intervals must be greater than 0"));
        }
        if self.write_retry_attempts == 0 {
            return Err(anyhow!("write_retry_attempts must be greater than 0"));
        }
        Ok(())
    }

    pub fn intervals(&self) -> WatchIntervals {
        WatchIntervals {
            feed_poll: Duration::from_secs(self.feed_poll_seconds),
            schedule_poll: Duration::from_secs(self.schedule_poll_seconds),
            off_season_poll: Duration::from_secs(self.off_season_poll_seconds),
            player_pause: Duration::from_millis(self.player_pause_millis),
            write_retry_backoff: Duration::from_secs(self.write_retry_backoff_seconds),
            write_retry_attempts: self.write_retry_attempts,
        }
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            intervals: self.intervals(),
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            storage: StorageKind::parse(&self.storage).unwrap_or(StorageKind::Clickhouse),
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    pub fn to_upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            api_base_url: self.api_base_url.clone(),
            timeout_seconds: self.upstream_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("STATWATCH_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("STATWATCH_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("STATWATCH_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Ok(value) = env::var("STATWATCH_UPSTREAM_TIMEOUT_SECONDS") {
            self.upstream_timeout_seconds = value.parse().unwrap_or(self.upstream_timeout_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_STORAGE") {
            self.storage = value;
        }
        if let Ok(value) = env::var("STATWATCH_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("STATWATCH_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("STATWATCH_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("STATWATCH_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("STATWATCH_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_FEED_POLL_SECONDS") {
            self.feed_poll_seconds = value.parse().unwrap_or(self.feed_poll_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_SCHEDULE_POLL_SECONDS") {
            self.schedule_poll_seconds = value.parse().unwrap_or(self.schedule_poll_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_OFF_SEASON_POLL_SECONDS") {
            self.off_season_poll_seconds = value.parse().unwrap_or(self.off_season_poll_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_PLAYER_PAUSE_MILLIS") {
            self.player_pause_millis = value.parse().unwrap_or(self.player_pause_millis);
        }
        if let Ok(value) = env::var("STATWATCH_WRITE_RETRY_BACKOFF_SECONDS") {
            self.write_retry_backoff_seconds =
                value.parse().unwrap_or(self.write_retry_backoff_seconds);
        }
        if let Ok(value) = env::var("STATWATCH_WRITE_RETRY_ATTEMPTS") {
            self.write_retry_attempts = value.parse().unwrap_or(self.write_retry_attempts);
        }
        if let Ok(value) = env::var("STATWATCH_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
