use std::sync::Arc;

use wordgame_common::{PlayerSummaryView, PlayerView};

use crate::database::{NewPlayer, PlayerRecord};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::PlayerRepository;

pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// Stores a new player with a zero score. `username` must already be validated.
    pub async fn create(&self, username: &str) -> ServiceResult<PlayerView> {
        let player = NewPlayer {
            username: username.to_string(),
            score: 0,
        };
        let record = self.repository.insert(player).await?;
        log::info!("Created player {} ('{}')", record.id, record.username);
        Ok(record.to_view())
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<PlayerView> {
        let record = self.repository.get_by_id(id).await?;
        Ok(record.to_view())
    }

    pub async fn find_by_username(&self, username: &str) -> ServiceResult<PlayerView> {
        match self.repository.get_by_username(username).await? {
            Some(record) => Ok(record.to_view()),
            None => ServiceError::not_found(format!("player '{username}' does not exist")),
        }
    }

    pub async fn top_players(&self, limit: i64) -> ServiceResult<Vec<PlayerSummaryView>> {
        let records = self.repository.top_by_score(limit).await?;
        Ok(records.iter().map(PlayerRecord::to_summary).collect())
    }
}

impl PlayerRecord {
    fn to_view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            username: self.username.clone(),
            score: self.score,
        }
    }

    fn to_summary(&self) -> PlayerSummaryView {
        PlayerSummaryView {
            username: self.username.clone(),
            score: self.score,
        }
    }
}
