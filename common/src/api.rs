use serde::{Deserialize, Serialize};

/// Body of `POST /api/players`. Any other field sent by the client,
/// `score` included, is dropped during deserialization.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreatePlayerRequest {
    pub username: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PlayerLookupQuery {
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
