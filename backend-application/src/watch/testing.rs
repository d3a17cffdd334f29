// Fakes for the SportsApi and PlayerRepository ports

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;

use backend_domain::ports::{PlayerRepository, SportsApi};
use backend_domain::{
    GameState, LiveFeed, PlayerId, PlayerRecord, PlayerUpdate, ScheduledGame, Season,
    SeasonStatLine, TeamId, WatchIntervals,
};

pub fn fast_intervals() -> WatchIntervals {
    WatchIntervals {
        feed_poll: Duration::from_millis(1),
        schedule_poll: Duration::from_millis(1),
        off_season_poll: Duration::from_millis(5),
        player_pause: Duration::ZERO,
        write_retry_backoff: Duration::from_millis(1),
        write_retry_attempts: 3,
    }
}

pub fn season() -> Season {
    Season {
        season_id: "20192020".to_string(),
        regular_season_start_date: NaiveDate::from_ymd_opt(2019, 10, 2).expect("start"),
        regular_season_end_date: NaiveDate::from_ymd_opt(2020, 4, 4).expect("end"),
    }
}

pub fn scheduled_game(game_pk: i64, state: &str) -> ScheduledGame {
    serde_json::from_value(serde_json::json!({
        "gamePk": game_pk,
        "link": format!("/api/v1/game/{}/feed/live", game_pk),
        "status": {"abstractGameState": state},
        "teams": {"home": {"team": {"id": 10, "name": "Toronto Maple Leafs"}},
                  "away": {"team": {"id": 8, "name": "Montréal Canadiens"}}}
    }))
    .expect("scheduled game")
}

/// A two-player feed: one home skater with a boxscore line, one away skater without.
pub fn live_feed(state: GameState) -> LiveFeed {
    serde_json::from_value(serde_json::json!({
        "gameData": {
            "game": {"pk": 2019020001, "season": "20192020"},
            "status": {"abstractGameState": state.as_str()},
            "teams": {"home": {"id": 10, "name": "Toronto Maple Leafs"},
                      "away": {"id": 8, "name": "Montréal Canadiens"}},
            "players": {
                "ID100": {"id": 100, "fullName": "Home Skater", "currentAge": 25,
                          "primaryNumber": "91", "primaryPosition": {"name": "Center"},
                          "currentTeam": {"id": 10, "name": "Toronto Maple Leafs"}},
                "ID200": {"id": 200, "fullName": "Away Skater", "currentAge": 31,
                          "primaryNumber": "6", "primaryPosition": {"name": "Defenseman"},
                          "currentTeam": {"id": 8, "name": "Montréal Canadiens"}}
            }
        },
        "liveData": {"boxscore": {"teams": {
            "home": {"players": {"ID100": {"stats": {"skaterStats":
                {"hits": 2, "goals": 1, "assists": 0, "penaltyMinutes": 2}}}}},
            "away": {"players": {}}
        }}}
    }))
    .expect("live feed")
}

#[derive(Default)]
pub struct FakeSportsApi {
    season: Mutex<Option<Season>>,
    schedule: Mutex<Option<Vec<ScheduledGame>>>,
    feeds: Mutex<HashMap<String, VecDeque<Option<LiveFeed>>>>,
    season_points: Mutex<HashMap<PlayerId, i64>>,
    season_calls: AtomicUsize,
    schedule_calls: AtomicUsize,
    feed_calls: Mutex<HashMap<String, usize>>,
}

impl FakeSportsApi {
    pub fn set_season(&self, season: Option<Season>) {
        *self.season.lock().expect("lock") = season;
    }

    pub fn set_schedule(&self, games: Option<Vec<ScheduledGame>>) {
        *self.schedule.lock().expect("lock") = games;
    }

    /// Queues feed responses for a link; once drained the link returns `None`.
    pub fn push_feed(&self, link: &str, feed: Option<LiveFeed>) {
        self.feeds
            .lock()
            .expect("lock")
            .entry(link.to_string())
            .or_default()
            .push_back(feed);
    }

    pub fn set_season_points(&self, player_id: PlayerId, points: i64) {
        self.season_points
            .lock()
            .expect("lock")
            .insert(player_id, points);
    }

    pub fn season_calls(&self) -> usize {
        self.season_calls.load(Ordering::SeqCst)
    }

    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn feed_calls(&self, link: &str) -> usize {
        self.feed_calls
            .lock()
            .expect("lock")
            .get(link)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SportsApi for FakeSportsApi {
    async fn current_season(&self) -> Option<Season> {
        self.season_calls.fetch_add(1, Ordering::SeqCst);
        self.season.lock().expect("lock").clone()
    }

    async fn today_schedule(&self) -> Option<Vec<ScheduledGame>> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        self.schedule.lock().expect("lock").clone()
    }

    async fn game_feed(&self, feed_link: &str) -> Option<LiveFeed> {
        *self
            .feed_calls
            .lock()
            .expect("lock")
            .entry(feed_link.to_string())
            .or_default() += 1;
        self.feeds
            .lock()
            .expect("lock")
            .get_mut(feed_link)
            .and_then(|queue| queue.pop_front())
            .flatten()
    }

    async fn player_season_stats(
        &self,
        player_id: PlayerId,
        _season_id: &str,
    ) -> Option<SeasonStatLine> {
        self.season_points
            .lock()
            .expect("lock")
            .get(&player_id)
            .map(|points| SeasonStatLine { points: *points })
    }
}

#[derive(Default)]
pub struct FakePlayerRepo {
    records: Mutex<HashMap<PlayerId, PlayerRecord>>,
    failures_left: AtomicUsize,
    upsert_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakePlayerRepo {
    pub fn fail_next(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub fn get(&self, id: PlayerId) -> Option<PlayerRecord> {
        self.records.lock().expect("lock").get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_upserts(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerRepository for FakePlayerRepo {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn upsert(&self, id: PlayerId, update: &PlayerUpdate) -> anyhow::Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let result = if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
        {
            Err(anyhow!("store unavailable"))
        } else {
            let mut records = self.records.lock().expect("lock");
            let stamp = records.len() as i64 + 1;
            records
                .entry(id)
                .or_insert_with(|| PlayerRecord::new(id))
                .apply(update, stamp);
            Ok(())
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn find_by_id(&self, id: PlayerId) -> anyhow::Result<Option<PlayerRecord>> {
        Ok(self.get(id))
    }

    async fn find_by_team_id(&self, team_id: TeamId) -> anyhow::Result<Vec<PlayerRecord>> {
        let mut rows: Vec<PlayerRecord> = self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|record| record.team_id == Some(team_id))
            .cloned()
            .collect();
        rows.sort_by_key(|record| record.id);
        Ok(rows)
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.records.lock().expect("lock").clear();
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
