use async_trait::async_trait;

use crate::entities::{PlayerRecord, PlayerUpdate};
use crate::value_objects::{PlayerId, TeamId};

/// Durable store for player records.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    /// Create-if-absent, then field-level update with the `Some` fields of `update`.
    async fn upsert(&self, id: PlayerId, update: &PlayerUpdate) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: PlayerId) -> anyhow::Result<Option<PlayerRecord>>;
    async fn find_by_team_id(&self, team_id: TeamId) -> anyhow::Result<Vec<PlayerRecord>>;
    async fn delete_all(&self) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}
