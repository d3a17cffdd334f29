use tracing::error;

use backend_domain::{parse_numeric_id, PlayerRecord};

use crate::{AppError, AppState};

pub async fn list_team_players(state: &AppState, team_id: &str) -> Result<Vec<PlayerRecord>, AppError> {
    let team_id = parse_id(team_id, "team id")?;
    state
        .player_repo
        .find_by_team_id(team_id)
        .await
        .map_err(|err| {
            error!("failed to fetch players for team {}: {}", team_id, err);
            AppError::Internal(err)
        })
}

/// Zero or one record, returned as a list to match the team route's shape.
pub async fn list_player(state: &AppState, player_id: &str) -> Result<Vec<PlayerRecord>, AppError> {
    let player_id = parse_id(player_id, "player id")?;
    let record = state
        .player_repo
        .find_by_id(player_id)
        .await
        .map_err(|err| {
            error!("failed to fetch player {}: {}", player_id, err);
            AppError::Internal(err)
        })?;
    Ok(record.into_iter().collect())
}

fn parse_id(raw: &str, label: &str) -> Result<i64, AppError> {
    parse_numeric_id(raw).ok_or_else(|| AppError::BadRequest(format!("invalid {} '{}'", label, raw.trim())))
}
