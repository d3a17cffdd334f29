use axum::routing::{delete, get};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, player_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops_handlers::api_info))
        .route("/team/:team_id", get(player_handlers::list_team_players))
        .route("/player/:player_id", get(player_handlers::get_player))
        .route("/ops/players", delete(player_handlers::clear_players))
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .fallback(ops_handlers::api_info)
        .with_state(state)
}
