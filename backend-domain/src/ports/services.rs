use async_trait::async_trait;

use crate::entities::{LiveFeed, ScheduledGame, Season, SeasonStatLine};
use crate::value_objects::PlayerId;

/// Upstream schedule/feed/stats endpoints.
///
/// Every call yields `None` on any transport, status or decode failure; callers
/// treat that as "no data this cycle". Implementations never retry.
#[async_trait]
pub trait SportsApi: Send + Sync {
    async fn current_season(&self) -> Option<Season>;
    /// `None` only when the request itself failed. An empty schedule is `Some(vec![])`.
    async fn today_schedule(&self) -> Option<Vec<ScheduledGame>>;
    async fn game_feed(&self, feed_link: &str) -> Option<LiveFeed>;
    async fn player_season_stats(&self, player_id: PlayerId, season_id: &str)
        -> Option<SeasonStatLine>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_database(&self) -> anyhow::Result<bool>;
}
