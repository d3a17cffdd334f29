use tracing::{error, info};

use crate::{AppError, AppState};

/// Bulk clear of every stored player. Reset/test use only.
pub async fn clear_players(state: &AppState) -> Result<(), AppError> {
    state.player_repo.delete_all().await.map_err(|err| {
        error!("failed to clear players: {}", err);
        AppError::Internal(err)
    })?;
    info!("cleared all stored players");
    Ok(())
}
