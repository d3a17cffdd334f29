use std::sync::Arc;

use backend_domain::ports::{HealthCheckService, PlayerRepository};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub player_repo: Arc<dyn PlayerRepository>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
