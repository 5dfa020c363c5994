use async_trait::async_trait;

use crate::database::{Database, NewPlayer, PlayerRecord};
use crate::error::{ServiceError, ServiceResult};

/// Storage operations the player service depends on.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Persists a new player and returns it with its generated id.
    async fn insert(&self, player: NewPlayer) -> ServiceResult<PlayerRecord>;

    /// Fails with `ServiceError::NotFound` when no player has this id.
    async fn get_by_id(&self, id: i64) -> ServiceResult<PlayerRecord>;

    async fn get_by_username(&self, username: &str) -> ServiceResult<Option<PlayerRecord>>;

    /// Up to `limit` players, highest score first, ties by ascending id.
    async fn top_by_score(&self, limit: i64) -> ServiceResult<Vec<PlayerRecord>>;
}

#[async_trait]
impl PlayerRepository for Database {
    async fn insert(&self, player: NewPlayer) -> ServiceResult<PlayerRecord> {
        log::debug!("REPO: Creating player: username='{}'", player.username);
        let record = self.insert_player(&player).await.map_err(|e| {
            log::warn!("REPO: Failed to create player: {e}");
            e
        })?;
        log::debug!("REPO: Player created successfully with ID: {}", record.id);
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> ServiceResult<PlayerRecord> {
        match self.get_player_by_id(id).await? {
            Some(record) => Ok(record),
            None => ServiceError::not_found(format!("player {id} does not exist")),
        }
    }

    async fn get_by_username(&self, username: &str) -> ServiceResult<Option<PlayerRecord>> {
        Ok(self.get_player_by_username(username).await?)
    }

    async fn top_by_score(&self, limit: i64) -> ServiceResult<Vec<PlayerRecord>> {
        Ok(self.get_top_players(limit).await?)
    }
}
