// Live feed entities
// One polling instant of a game's feed; consumed by normalization and dropped

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::schedule::{GameStatus, TeamRef};
use crate::value_objects::{player_key, GamePk, GameState, PlayerId, TeamId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub pk: GamePk,
    #[serde(default)]
    pub season: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedTeams {
    #[serde(default)]
    pub home: TeamRef,
    #[serde(default)]
    pub away: TeamRef,
}

impl FeedTeams {
    /// The team in this game that is not `own_team`.
    pub fn opponent_of(&self, own_team: TeamId) -> TeamId {
        if own_team == self.home.id {
            self.away.id
        } else {
            self.home.id
        }
    }

    pub fn side_of(&self, side: TeamSide) -> &TeamRef {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub current_age: Option<i64>,
    #[serde(default)]
    pub primary_number: Option<String>,
    #[serde(default)]
    pub primary_position: Option<Position>,
    #[serde(default)]
    pub current_team: Option<TeamRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub game: GameInfo,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub teams: FeedTeams,
    #[serde(default)]
    pub players: HashMap<String, FeedPlayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkaterStats {
    #[serde(default)]
    pub hits: i64,
    #[serde(default)]
    pub goals: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub penalty_minutes: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalieStats {
    #[serde(default)]
    pub goals: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub pim: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscorePlayerStats {
    #[serde(default)]
    pub skater_stats: Option<SkaterStats>,
    #[serde(default)]
    pub goalie_stats: Option<GoalieStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxscorePlayer {
    #[serde(default)]
    pub stats: BoxscorePlayerStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxscoreTeam {
    #[serde(default)]
    pub players: HashMap<String, BoxscorePlayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxscoreTeams {
    #[serde(default)]
    pub home: BoxscoreTeam,
    #[serde(default)]
    pub away: BoxscoreTeam,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boxscore {
    #[serde(default)]
    pub teams: BoxscoreTeams,
}

impl Boxscore {
    /// Looks the player up in the home roster first, then the away roster.
    pub fn find_player(&self, player_id: PlayerId) -> Option<(TeamSide, &BoxscorePlayer)> {
        let key = player_key(player_id);
        if let Some(entry) = self.teams.home.players.get(&key) {
            return Some((TeamSide::Home, entry));
        }
        self.teams
            .away
            .players
            .get(&key)
            .map(|entry| (TeamSide::Away, entry))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveData {
    #[serde(default)]
    pub boxscore: Boxscore,
}

/// A live feed that carried the `gameData` block. Feeds without it never get this far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeed {
    pub game_data: GameData,
    #[serde(default)]
    pub live_data: LiveData,
}

impl LiveFeed {
    pub fn state(&self) -> GameState {
        self.game_data.status.abstract_game_state
    }

    pub fn season_id(&self) -> &str {
        &self.game_data.game.season
    }
}

/// Season aggregate line from the per-player stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStatLine {
    #[serde(default)]
    pub points: i64,
}
