use anyhow::Result;
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use backend_domain::{PlayerId, PlayerRecord, PlayerRepository, PlayerStats, PlayerUpdate, TeamId};

use crate::utils::{current_millis, millis_to_utc, utc_to_millis};

const PLAYERS_TABLE: &str = "players";

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
struct PlayerRow {
    id: i64,
    full_name: Option<String>,
    current_age: Option<i64>,
    primary_number: Option<String>,
    position: Option<String>,
    team_id: Option<i64>,
    team_name: Option<String>,
    current_opponent_team: Option<i64>,
    hits: Option<i64>,
    goals: Option<i64>,
    points: Option<i64>,
    assists: Option<i64>,
    penalty_minutes: Option<i64>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    updated_at: OffsetDateTime,
}

impl From<&PlayerRecord> for PlayerRow {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name.clone(),
            current_age: record.current_age,
            primary_number: record.primary_number.clone(),
            position: record.position.clone(),
            team_id: record.team_id,
            team_name: record.team_name.clone(),
            current_opponent_team: record.current_opponent_team,
            hits: record.stats.hits,
            goals: record.stats.goals,
            points: record.stats.points,
            assists: record.stats.assists,
            penalty_minutes: record.stats.penalty_minutes,
            updated_at: millis_to_utc(record.updated_at),
        }
    }
}

impl From<PlayerRow> for PlayerRecord {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            current_age: row.current_age,
            primary_number: row.primary_number,
            position: row.position,
            team_id: row.team_id,
            team_name: row.team_name,
            current_opponent_team: row.current_opponent_team,
            stats: PlayerStats {
                hits: row.hits,
                goals: row.goals,
                points: row.points,
                assists: row.assists,
                penalty_minutes: row.penalty_minutes,
            },
            updated_at: utc_to_millis(row.updated_at),
        }
    }
}

/// Players stored in a ReplacingMergeTree keyed by id and versioned by `updated_at`.
///
/// Upserts read the current version and insert a merged one. That is only sound
/// while a single writer drains the write queue.
#[derive(Clone)]
pub struct ClickhousePlayerRepo {
    client: Client,
    database: String,
}

impl ClickhousePlayerRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    async fn insert_row(&self, row: &PlayerRow) -> Result<()> {
        let mut insert = self.client.insert(PLAYERS_TABLE)?;
        insert.write(row).await?;
        insert.end().await?;
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for ClickhousePlayerRepo {
    async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client
            .clone()
            .with_database("default")
            .query(&create_db)
            .execute()
            .await?;

        let create_players = r#"
CREATE TABLE IF NOT EXISTS players (
    id Int64,
    full_name Nullable(String),
    current_age Nullable(Int64),
    primary_number Nullable(String),
    position Nullable(String),
    team_id Nullable(Int64),
    team_name Nullable(String),
    current_opponent_team Nullable(Int64),
    hits Nullable(Int64),
    goals Nullable(Int64),
    points Nullable(Int64),
    assists Nullable(Int64),
    penalty_minutes Nullable(Int64),
    updated_at DateTime64(3)
) ENGINE = ReplacingMergeTree(updated_at)
ORDER BY id
"#;
        self.client.query(create_players).execute().await?;
        Ok(())
    }

    async fn upsert(&self, id: PlayerId, update: &PlayerUpdate) -> Result<()> {
        let mut record = self
            .find_by_id(id)
            .await?
            .unwrap_or_else(|| PlayerRecord::new(id));
        // Versions must strictly increase for the merge to keep the newest row.
        let updated_at = current_millis().max(record.updated_at + 1);
        record.apply(update, updated_at);
        debug!("upserting player {} at {}", id, updated_at);
        self.insert_row(&PlayerRow::from(&record)).await
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>> {
        let rows = self
            .client
            .query("SELECT ?fields FROM players FINAL WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_all::<PlayerRow>()
            .await?;
        Ok(rows.into_iter().next().map(PlayerRecord::from))
    }

    async fn find_by_team_id(&self, team_id: TeamId) -> Result<Vec<PlayerRecord>> {
        let rows = self
            .client
            .query("SELECT ?fields FROM players FINAL WHERE team_id = ? ORDER BY id")
            .bind(team_id)
            .fetch_all::<PlayerRow>()
            .await?;
        Ok(rows.into_iter().map(PlayerRecord::from).collect())
    }

    async fn delete_all(&self) -> Result<()> {
        self.client
            .query("TRUNCATE TABLE IF EXISTS players")
            .execute()
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}
