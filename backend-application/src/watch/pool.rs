use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use backend_domain::ports::SportsApi;
use backend_domain::{GamePk, ScheduledGame, WatchIntervals};

use crate::watch::{FeedPoller, StopReason, WriteQueue};
use crate::Metrics;

/// Feed pollers keyed by game. The key set doubles as the started-set: it only
/// grows, so a game is never given a second poller within a process lifetime.
pub struct PollerPool {
    api: Arc<dyn SportsApi>,
    writes: WriteQueue,
    intervals: WatchIntervals,
    metrics: Arc<Metrics>,
    workers: HashMap<GamePk, JoinHandle<StopReason>>,
}

impl PollerPool {
    pub fn new(
        api: Arc<dyn SportsApi>,
        writes: WriteQueue,
        intervals: WatchIntervals,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            api,
            writes,
            intervals,
            metrics,
            workers: HashMap::new(),
        }
    }

    /// Spawns a poller for `game` if it is live and not already started.
    pub fn try_start(&mut self, game: &ScheduledGame) -> bool {
        if !game.state().is_live() || self.workers.contains_key(&game.game_pk) {
            return false;
        }

        let poller = FeedPoller::new(
            self.api.clone(),
            self.writes.clone(),
            game.link.clone(),
            self.intervals,
            self.metrics.clone(),
        );
        let metrics = self.metrics.clone();
        let handle = tokio::spawn(async move {
            let reason = poller.run().await;
            metrics.record_poller_stopped();
            reason
        });

        info!("started feed poller for game {}: {}", game.game_pk, game.link);
        self.metrics.record_poller_started();
        self.workers.insert(game.game_pk, handle);
        true
    }

    pub fn is_started(&self, game_pk: GamePk) -> bool {
        self.workers.contains_key(&game_pk)
    }

    pub fn started_count(&self) -> usize {
        self.workers.len()
    }

    pub fn running_count(&self) -> usize {
        self.workers
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::watch::testing::{fast_intervals, scheduled_game, FakePlayerRepo, FakeSportsApi};
    use crate::watch::write_queue;

    fn pool(api: Arc<FakeSportsApi>) -> PollerPool {
        let metrics = Arc::new(Metrics::default());
        let (queue, _serializer) =
            write_queue(Arc::new(FakePlayerRepo::default()), metrics.clone(), fast_intervals());
        PollerPool::new(api, queue, fast_intervals(), metrics)
    }

    #[tokio::test]
    async fn live_game_is_started_once() {
        let api = Arc::new(FakeSportsApi::default());
        let mut pool = pool(api.clone());
        let game = scheduled_game(2019020001, "Live");

        assert!(pool.try_start(&game));
        assert!(!pool.try_start(&game));
        assert!(pool.is_started(2019020001));
        assert_eq!(pool.started_count(), 1);
    }

    #[tokio::test]
    async fn non_live_games_are_ignored() {
        let api = Arc::new(FakeSportsApi::default());
        let mut pool = pool(api);

        assert!(!pool.try_start(&scheduled_game(1, "Preview")));
        assert!(!pool.try_start(&scheduled_game(2, "Final")));
        assert_eq!(pool.started_count(), 0);
    }

    #[tokio::test]
    async fn stopped_game_stays_in_started_set() {
        let api = Arc::new(FakeSportsApi::default());
        let mut pool = pool(api.clone());
        let game = scheduled_game(3, "Live");

        assert!(pool.try_start(&game));
        while pool.running_count() > 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(api.feed_calls(&game.link), 1);
        assert!(!pool.try_start(&game));
        assert_eq!(pool.started_count(), 1);
    }
}
