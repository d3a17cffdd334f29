use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::{PlayerId, PlayerRecord, PlayerRepository, PlayerUpdate, TeamId};

use crate::utils::current_millis;

/// Process-local store for `storage = "memory"`. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepo {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, id: PlayerId, update: &PlayerUpdate) -> Result<()> {
        let mut players = self.players.write().await;
        players
            .entry(id)
            .or_insert_with(|| PlayerRecord::new(id))
            .apply(update, current_millis());
        Ok(())
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn find_by_team_id(&self, team_id: TeamId) -> Result<Vec<PlayerRecord>> {
        let players = self.players.read().await;
        let mut matched = players
            .values()
            .filter(|record| record.team_id == Some(team_id))
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by_key(|record| record.id);
        Ok(matched)
    }

    async fn delete_all(&self) -> Result<()> {
        self.players.write().await.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::PlayerStats;

    fn update(team_id: TeamId, goals: i64) -> PlayerUpdate {
        PlayerUpdate {
            team_id: Some(team_id),
            stats: PlayerStats {
                goals: Some(goals),
                ..PlayerStats::default()
            },
            ..PlayerUpdate::default()
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_fields() {
        let repo = InMemoryPlayerRepo::new();
        repo.upsert(7, &update(10, 1)).await.expect("create");
        repo.upsert(
            7,
            &PlayerUpdate {
                full_name: Some("Mitch Marner".to_string()),
                ..PlayerUpdate::default()
            },
        )
        .await
        .expect("update");

        let record = repo.find_by_id(7).await.expect("find").expect("present");
        assert_eq!(record.team_id, Some(10));
        assert_eq!(record.stats.goals, Some(1));
        assert_eq!(record.full_name.as_deref(), Some("Mitch Marner"));
        assert!(record.updated_at > 0);
    }

    #[tokio::test]
    async fn team_lookup_follows_latest_team() {
        let repo = InMemoryPlayerRepo::new();
        repo.upsert(3, &update(10, 0)).await.expect("upsert");
        repo.upsert(1, &update(10, 0)).await.expect("upsert");
        repo.upsert(2, &update(8, 0)).await.expect("upsert");
        repo.upsert(3, &update(8, 0)).await.expect("traded");

        let leafs = repo.find_by_team_id(10).await.expect("query");
        assert_eq!(leafs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
        let habs = repo.find_by_team_id(8).await.expect("query");
        assert_eq!(habs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[tokio::test]
    async fn delete_all_empties_store() {
        let repo = InMemoryPlayerRepo::new();
        for id in 0..50 {
            repo.upsert(id, &update(10, id)).await.expect("upsert");
        }
        repo.delete_all().await.expect("clear");
        assert!(repo.find_by_team_id(10).await.expect("query").is_empty());
        assert!(repo.find_by_id(0).await.expect("query").is_none());
    }
}
