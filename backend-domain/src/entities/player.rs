// Player entity
// The persisted unit, keyed by player id and written via upsert

use serde::{Deserialize, Serialize};

use crate::value_objects::{PlayerId, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub hits: Option<i64>,
    #[serde(default)]
    pub goals: Option<i64>,
    /// Season total; the live feed does not carry it.
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub assists: Option<i64>,
    #[serde(default)]
    pub penalty_minutes: Option<i64>,
}

impl PlayerStats {
    fn merge(&mut self, incoming: &PlayerStats) {
        merge_field(&mut self.hits, &incoming.hits);
        merge_field(&mut self.goals, &incoming.goals);
        merge_field(&mut self.points, &incoming.points);
        merge_field(&mut self.assists, &incoming.assists);
        merge_field(&mut self.penalty_minutes, &incoming.penalty_minutes);
    }
}

/// Partial record produced by a feed poller. `None` leaves stored values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub current_age: Option<i64>,
    #[serde(default)]
    pub primary_number: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub current_opponent_team: Option<TeamId>,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub full_name: Option<String>,
    pub current_age: Option<i64>,
    pub primary_number: Option<String>,
    pub position: Option<String>,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
    pub current_opponent_team: Option<TeamId>,
    #[serde(flatten)]
    pub stats: PlayerStats,
    /// Epoch millis of the last applied write.
    pub updated_at: i64,
}

impl PlayerRecord {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Field-level update: only fields present in `update` are overwritten.
    pub fn apply(&mut self, update: &PlayerUpdate, updated_at: i64) {
        merge_field(&mut self.full_name, &update.full_name);
        merge_field(&mut self.current_age, &update.current_age);
        merge_field(&mut self.primary_number, &update.primary_number);
        merge_field(&mut self.position, &update.position);
        merge_field(&mut self.team_id, &update.team_id);
        merge_field(&mut self.team_name, &update.team_name);
        merge_field(&mut self.current_opponent_team, &update.current_opponent_team);
        self.stats.merge(&update.stats);
        self.updated_at = updated_at;
    }
}

fn merge_field<T: Clone>(target: &mut Option<T>, incoming: &Option<T>) {
    if let Some(value) = incoming {
        *target = Some(value.clone());
    }
}

/// An upsert waiting in the write queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub player_id: PlayerId,
    pub update: PlayerUpdate,
}

impl PendingWrite {
    pub fn new(player_id: PlayerId, update: PlayerUpdate) -> Self {
        Self { player_id, update }
    }
}
