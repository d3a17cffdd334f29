use std::sync::Arc;

use anyhow::Result;
use clickhouse::Client;
use tracing::info;

use backend_application::{AppState, Metrics};
use backend_domain::ports::{PlayerRepository, SportsApi};
use backend_domain::{DbConfig, StorageKind};
use backend_infrastructure::{
    AppConfig, ClickhousePlayerRepo, DefaultHealthService, InMemoryPlayerRepo, NhlApiClient,
};

pub struct AppContext {
    pub state: AppState,
    pub sports_api: Arc<dyn SportsApi>,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let player_repo = build_player_repo(&db_config);
        player_repo.ensure_schema().await?;

        let sports_api: Arc<dyn SportsApi> =
            Arc::new(NhlApiClient::new(&config.to_upstream_config())?);

        let state = AppState {
            config: runtime_config,
            player_repo: player_repo.clone(),
            health_service: Arc::new(DefaultHealthService::new(player_repo)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state, sports_api })
    }
}

fn build_player_repo(db_config: &DbConfig) -> Arc<dyn PlayerRepository> {
    match db_config.storage {
        StorageKind::Memory => {
            info!("using in-memory player store");
            Arc::new(InMemoryPlayerRepo::new())
        }
        StorageKind::Clickhouse => {
            let mut clickhouse = Client::default()
                .with_url(&db_config.clickhouse_url)
                .with_database(&db_config.clickhouse_database);
            if let Some(user) = &db_config.clickhouse_user {
                clickhouse = clickhouse.with_user(user);
            }
            if let Some(password) = &db_config.clickhouse_password {
                clickhouse = clickhouse.with_password(password);
            }
            info!(
                "using clickhouse player store at {}/{}",
                db_config.clickhouse_url, db_config.clickhouse_database
            );
            Arc::new(ClickhousePlayerRepo::new(
                clickhouse,
                db_config.clickhouse_database.clone(),
            ))
        }
    }
}
