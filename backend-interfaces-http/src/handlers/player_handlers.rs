use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::player_commands;
use backend_application::queries::player_queries;
use backend_application::AppState;
use backend_domain::PlayerRecord;

use crate::error::HttpError;
use crate::middleware::{authorize, authorize_admin};

pub async fn list_team_players(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<PlayerRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let players = player_queries::list_team_players(&state, &team_id).await?;
    Ok(Json(players))
}

pub async fn get_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(player_id): Path<String>,
) -> Result<Json<Vec<PlayerRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let players = player_queries::list_player(&state, &player_id).await?;
    Ok(Json(players))
}

pub async fn clear_players(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    if !authorize_admin(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    player_commands::clear_players(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}
