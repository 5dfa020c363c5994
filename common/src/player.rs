use serde::{Deserialize, Serialize};

/// Full view of a stored player, returned after create and lookups.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub id: i64,
    pub username: String,
    pub score: i64,
}

/// Reduced view used by the top-scorer listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerSummaryView {
    pub username: String,
    pub score: i64,
}
