use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::HealthCheckService;
use backend_domain::PlayerRepository;

pub struct DefaultHealthService {
    player_repo: Arc<dyn PlayerRepository>,
}

impl DefaultHealthService {
    pub fn new(player_repo: Arc<dyn PlayerRepository>) -> Self {
        Self { player_repo }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.player_repo.ping().await.map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryPlayerRepo;

    #[tokio::test]
    async fn memory_store_is_always_ready() {
        let service = DefaultHealthService::new(Arc::new(InMemoryPlayerRepo::new()));
        assert!(service.check_database().await.expect("ping"));
    }
}
