use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info};

use backend_domain::ports::SportsApi;
use backend_domain::{normalize_player, with_season_points, GameState, PendingWrite, WatchIntervals};

use crate::watch::WriteQueue;
use crate::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Feed request failed or the payload had no `gameData` block.
    InvalidFeed,
    /// The game left the `Live` state.
    NotLive(GameState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Polling { players: usize },
    Stopped(StopReason),
}

/// Polls one game's live feed until the game ends or the feed goes bad.
/// `Stopped` is terminal; a stopped poller is never restarted.
pub struct FeedPoller {
    api: Arc<dyn SportsApi>,
    writes: WriteQueue,
    feed_link: String,
    intervals: WatchIntervals,
    metrics: Arc<Metrics>,
}

impl FeedPoller {
    pub fn new(
        api: Arc<dyn SportsApi>,
        writes: WriteQueue,
        feed_link: impl Into<String>,
        intervals: WatchIntervals,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            api,
            writes,
            feed_link: feed_link.into(),
            intervals,
            metrics,
        }
    }

    pub async fn run(self) -> StopReason {
        info!("start game feed poller: {}", self.feed_link);
        loop {
            match self.poll_once().await {
                PollOutcome::Polling { players } => {
                    debug!("queued {} player updates from {}", players, self.feed_link);
                    sleep(self.intervals.feed_poll).await;
                }
                PollOutcome::Stopped(reason) => {
                    match reason {
                        StopReason::InvalidFeed => {
                            info!("invalid game feed response, stopping poller: {}", self.feed_link)
                        }
                        StopReason::NotLive(state) => {
                            info!("game is {}, stopping poller: {}", state, self.feed_link)
                        }
                    }
                    return reason;
                }
            }
        }
    }

    /// One polling cycle: fetch, check state, normalize and enqueue every rostered player.
    pub async fn poll_once(&self) -> PollOutcome {
        let Some(feed) = self.api.game_feed(&self.feed_link).await else {
            self.metrics.record_feed_poll_failure();
            return PollOutcome::Stopped(StopReason::InvalidFeed);
        };
        self.metrics.record_feed_poll();

        let state = feed.state();
        if !state.is_live() {
            return PollOutcome::Stopped(StopReason::NotLive(state));
        }

        let season_id = feed.season_id();
        let teams = &feed.game_data.teams;
        let boxscore = &feed.live_data.boxscore;
        let mut players = 0;
        for player in feed.game_data.players.values() {
            let update = normalize_player(player, teams, boxscore);
            let season_line = self.api.player_season_stats(player.id, season_id).await;
            let update = with_season_points(update, season_line.as_ref());
            self.writes.enqueue(PendingWrite::new(player.id, update));
            players += 1;
            sleep(self.intervals.player_pause).await;
        }
        PollOutcome::Polling { players }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch::testing::{fast_intervals, live_feed, FakePlayerRepo, FakeSportsApi};
    use crate::watch::write_queue;

    const LINK: &str = "/api/v1/game/2019020001/feed/live";

    fn setup() -> (Arc<FakeSportsApi>, Arc<FakePlayerRepo>, Arc<Metrics>) {
        (
            Arc::new(FakeSportsApi::default()),
            Arc::new(FakePlayerRepo::default()),
            Arc::new(Metrics::default()),
        )
    }

    #[tokio::test]
    async fn live_feed_enqueues_every_player() {
        let (api, repo, metrics) = setup();
        api.push_feed(LINK, Some(live_feed(GameState::Live)));
        api.set_season_points(100, 42);
        let (queue, serializer) = write_queue(repo.clone(), metrics.clone(), fast_intervals());
        let poller = FeedPoller::new(api.clone(), queue, LINK, fast_intervals(), metrics.clone());

        assert_eq!(poller.poll_once().await, PollOutcome::Polling { players: 2 });
        drop(poller);
        serializer.run().await;

        let home = repo.get(100).expect("home player");
        assert_eq!(home.full_name.as_deref(), Some("Home Skater"));
        assert_eq!(home.team_id, Some(10));
        assert_eq!(home.current_opponent_team, Some(8));
        assert_eq!(home.stats.hits, Some(2));
        assert_eq!(home.stats.points, Some(42));

        let away = repo.get(200).expect("away player");
        assert_eq!(away.current_opponent_team, Some(10));
        assert_eq!(away.stats.hits, None);
        assert_eq!(away.stats.points, Some(0));
    }

    #[tokio::test]
    async fn feed_without_game_data_stops_with_no_writes() {
        let (api, repo, metrics) = setup();
        api.push_feed(LINK, None);
        let (queue, serializer) = write_queue(repo.clone(), metrics.clone(), fast_intervals());
        let poller = FeedPoller::new(api.clone(), queue, LINK, fast_intervals(), metrics.clone());

        assert_eq!(poller.run().await, StopReason::InvalidFeed);
        serializer.run().await;

        assert_eq!(api.feed_calls(LINK), 1);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn poller_runs_until_game_is_final() {
        let (api, repo, metrics) = setup();
        api.push_feed(LINK, Some(live_feed(GameState::Live)));
        api.push_feed(LINK, Some(live_feed(GameState::Live)));
        api.push_feed(LINK, Some(live_feed(GameState::Final)));
        api.push_feed(LINK, Some(live_feed(GameState::Live)));
        let (queue, serializer) = write_queue(repo.clone(), metrics.clone(), fast_intervals());
        let poller = FeedPoller::new(api.clone(), queue, LINK, fast_intervals(), metrics.clone());

        assert_eq!(
            poller.run().await,
            StopReason::NotLive(GameState::Final)
        );
        serializer.run().await;

        assert_eq!(api.feed_calls(LINK), 3);
        assert_eq!(metrics.writes_applied(), 4);
    }
}
