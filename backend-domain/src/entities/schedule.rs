// Schedule entities
// Transient discovery metadata, rebuilt on every schedule poll

use serde::{Deserialize, Serialize};

use crate::value_objects::{GamePk, GameState, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub abstract_game_state: GameState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSide {
    #[serde(default)]
    pub team: TeamRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTeams {
    #[serde(default)]
    pub home: ScheduleSide,
    #[serde(default)]
    pub away: ScheduleSide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_pk: GamePk,
    /// Path of the game's live feed, relative to the API base url.
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub teams: ScheduleTeams,
}

impl ScheduledGame {
    pub fn state(&self) -> GameState {
        self.status.abstract_game_state
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

impl Schedule {
    /// Games in the first date bucket. A schedule without buckets means no games today.
    pub fn into_games_today(self) -> Vec<ScheduledGame> {
        self.dates
            .into_iter()
            .next()
            .map(|bucket| bucket.games)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_today_come_from_first_bucket() {
        let schedule: Schedule = serde_json::from_str(
            r#"{
                "dates": [
                    {"date": "2019-10-05", "games": [
                        {"gamePk": 2019020001, "link": "/api/v1/game/2019020001/feed/live",
                         "status": {"abstractGameState": "Live"},
                         "teams": {"home": {"team": {"id": 10, "name": "Toronto Maple Leafs"}},
                                   "away": {"team": {"id": 8, "name": "Montréal Canadiens"}}}}
                    ]},
                    {"date": "2019-10-06", "games": [{"gamePk": 2019020020}]}
                ]
            }"#,
        )
        .expect("schedule");
        let games = schedule.into_games_today();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_pk, 2019020001);
        assert_eq!(games[0].state(), GameState::Live);
        assert_eq!(games[0].teams.away.team.id, 8);
    }

    #[test]
    fn missing_or_empty_buckets_mean_no_games() {
        let empty: Schedule = serde_json::from_str("{}").expect("schedule");
        assert!(empty.into_games_today().is_empty());
        let no_games: Schedule =
            serde_json::from_str(r#"{"dates":[{"date":"2019-10-05"}]}"#).expect("schedule");
        assert!(no_games.into_games_today().is_empty());
    }
}
