use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub request_timeout_seconds: u64,
    pub intervals: WatchIntervals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    Clickhouse,
    Memory,
}

impl StorageKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "clickhouse" => Some(StorageKind::Clickhouse),
            "memory" => Some(StorageKind::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub storage: StorageKind,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Fixed cadences of the watch subsystem. Never adapted at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchIntervals {
    pub feed_poll: Duration,
    pub schedule_poll: Duration,
    pub off_season_poll: Duration,
    pub player_pause: Duration,
    pub write_retry_backoff: Duration,
    pub write_retry_attempts: u32,
}

impl Default for WatchIntervals {
    fn default() -> Self {
        Self {
            feed_poll: Duration::from_secs(20),
            schedule_poll: Duration::from_secs(60),
            off_season_poll: Duration::from_secs(3600),
            player_pause: Duration::from_millis(200),
            write_retry_backoff: Duration::from_secs(3),
            write_retry_attempts: 3,
        }
    }
}
