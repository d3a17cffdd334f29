use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use backend_domain::ports::SportsApi;
use backend_domain::{
    select_current_season, LiveFeed, PlayerId, Schedule, ScheduledGame, Season, SeasonList,
    SeasonStatLine, UpstreamConfig,
};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin GET wrapper over the NHL stats API. Failures are logged and surface as `None`.
#[derive(Clone)]
pub struct NhlApiClient {
    client: Client,
    base_url: String,
}

impl NhlApiClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.get_json(path).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("upstream {} failed: {}", path, err);
                None
            }
        }
    }
}

#[async_trait]
impl SportsApi for NhlApiClient {
    async fn current_season(&self) -> Option<Season> {
        let list: SeasonList = self.fetch("/api/v1/seasons").await?;
        select_current_season(list.seasons, Utc::now().date_naive())
    }

    async fn today_schedule(&self) -> Option<Vec<ScheduledGame>> {
        let schedule: Schedule = self.fetch("/api/v1/schedule").await?;
        Some(schedule.into_games_today())
    }

    async fn game_feed(&self, feed_link: &str) -> Option<LiveFeed> {
        self.fetch(feed_link).await
    }

    async fn player_season_stats(
        &self,
        player_id: PlayerId,
        season_id: &str,
    ) -> Option<SeasonStatLine> {
        let path = season_stats_path(player_id, season_id);
        let response: StatsResponse = self.fetch(&path).await?;
        response.into_first_line()
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatsGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct StatsGroup {
    #[serde(default)]
    splits: Vec<StatsSplit>,
}

#[derive(Debug, Deserialize)]
struct StatsSplit {
    stat: SeasonStatLine,
}

impl StatsResponse {
    fn into_first_line(self) -> Option<SeasonStatLine> {
        self.stats
            .into_iter()
            .next()?
            .splits
            .into_iter()
            .next()
            .map(|split| split.stat)
    }
}

fn season_stats_path(player_id: PlayerId, season_id: &str) -> String {
    format!(
        "/api/v1/people/{}/stats?stats=statsSingleSeason&season={}",
        player_id, season_id
    )
}

/// Feed links arrive as absolute paths; anything already carrying a scheme is used as is.
fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_links_join_onto_base_url() {
        let base = "https://statsapi.web.nhl.com";
        assert_eq!(
            resolve_url(base, "/api/v1/game/2019020001/feed/live"),
            "https://statsapi.web.nhl.com/api/v1/game/2019020001/feed/live"
        );
        assert_eq!(
            resolve_url(base, "api/v1/schedule"),
            "https://statsapi.web.nhl.com/api/v1/schedule"
        );
        assert_eq!(
            resolve_url(base, "http://127.0.0.1:9000/feed"),
            "http://127.0.0.1:9000/feed"
        );
    }

    #[test]
    fn season_stats_take_first_split() {
        let response: StatsResponse = serde_json::from_str(
            r#"{"copyright":"NHL","stats":[{"type":{"displayName":"statsSingleSeason"},
                "splits":[{"season":"20192020","stat":{"assists":12,"goals":5,"points":17}}]}]}"#,
        )
        .expect("decode");
        assert_eq!(response.into_first_line(), Some(SeasonStatLine { points: 17 }));
        assert_eq!(
            season_stats_path(8476792, "20192020"),
            "/api/v1/people/8476792/stats?stats=statsSingleSeason&season=20192020"
        );
    }

    #[test]
    fn stats_without_splits_are_absent() {
        let response: StatsResponse =
            serde_json::from_str(r#"{"stats":[{"splits":[]}]}"#).expect("decode");
        assert_eq!(response.into_first_line(), None);

        let response: StatsResponse = serde_json::from_str(r#"{}"#).expect("decode");
        assert_eq!(response.into_first_line(), None);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = NhlApiClient::new(&UpstreamConfig {
            api_base_url: "http://localhost:9000/".to_string(),
            timeout_seconds: 10,
        })
        .expect("client");
        assert_eq!(client.url("/api/v1/seasons"), "http://localhost:9000/api/v1/seasons");
    }
}
