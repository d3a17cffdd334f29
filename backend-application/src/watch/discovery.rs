use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use backend_domain::ports::SportsApi;
use backend_domain::{GamePk, ScheduledGame, Season, WatchIntervals};

use crate::watch::PollerPool;
use crate::Metrics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCycle {
    /// No current season, or the season lookup failed. Nothing else was fetched.
    OffSeason,
    InSeason {
        season_id: String,
        games_today: usize,
        started: Vec<GamePk>,
    },
}

/// Season/schedule watch loop. Owns all watch state; nothing else reads or writes it.
pub struct GameWatcher {
    api: Arc<dyn SportsApi>,
    pool: PollerPool,
    intervals: WatchIntervals,
    metrics: Arc<Metrics>,
    current_season: Option<Season>,
    games_today: Vec<ScheduledGame>,
}

impl GameWatcher {
    pub fn new(
        api: Arc<dyn SportsApi>,
        pool: PollerPool,
        intervals: WatchIntervals,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            api,
            pool,
            intervals,
            metrics,
            current_season: None,
            games_today: Vec::new(),
        }
    }

    pub async fn run(mut self) {
        info!("starting game watch");
        loop {
            let cycle = self.run_cycle().await;
            sleep(self.delay_after(&cycle)).await;
        }
    }

    pub async fn run_cycle(&mut self) -> WatchCycle {
        self.current_season = self.api.current_season().await;
        let Some(season) = &self.current_season else {
            info!("current season received: off season");
            self.metrics.record_off_season_cycle();
            return WatchCycle::OffSeason;
        };
        let season_id = season.season_id.clone();
        info!("current season received: {}", season_id);

        self.refresh_games_today().await;

        let mut started = Vec::new();
        for game in &self.games_today {
            if self.pool.try_start(game) {
                started.push(game.game_pk);
            }
        }

        WatchCycle::InSeason {
            season_id,
            games_today: self.games_today.len(),
            started,
        }
    }

    pub fn delay_after(&self, cycle: &WatchCycle) -> Duration {
        match cycle {
            WatchCycle::OffSeason => self.intervals.off_season_poll,
            WatchCycle::InSeason { .. } => self.intervals.schedule_poll,
        }
    }

    pub fn pool(&self) -> &PollerPool {
        &self.pool
    }

    pub fn games_today(&self) -> &[ScheduledGame] {
        &self.games_today
    }

    async fn refresh_games_today(&mut self) {
        self.metrics.record_schedule_refresh();
        self.games_today = self.api.today_schedule().await.unwrap_or_default();
        if self.games_today.is_empty() {
            info!("refreshed today's schedule. no games today.");
        } else {
            info!(
                "refreshed today's schedule. games received: {}",
                self.games_today.len()
            );
        }
    }
}
