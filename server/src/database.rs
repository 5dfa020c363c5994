use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::FromRow;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// A row of the `players` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PlayerRecord {
    pub id: i64,
    pub username: String,
    pub score: i64,
}

/// A player that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub username: String,
    pub score: i64,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        Ok(Database { pool })
    }

    pub async fn initialize(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_player(&self, player: &NewPlayer) -> Result<PlayerRecord, sqlx::Error> {
        log::debug!("DB: Inserting player username='{}'", player.username);

        let record = sqlx::query_as::<_, PlayerRecord>(
            "INSERT INTO players (username, score) VALUES (?, ?) RETURNING id, username, score",
        )
        .bind(&player.username)
        .bind(player.score)
        .fetch_one(&self.pool)
        .await?;

        log::debug!("DB: Player inserted with ID: {}", record.id);
        Ok(record)
    }

    pub async fn get_player_by_id(&self, id: i64) -> Result<Option<PlayerRecord>, sqlx::Error> {
        log::debug!("DB: Querying player by ID: {id}");

        sqlx::query_as::<_, PlayerRecord>("SELECT id, username, score FROM players WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_player_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PlayerRecord>, sqlx::Error> {
        sqlx::query_as::<_, PlayerRecord>(
            "SELECT id, username, score FROM players WHERE username = ? ORDER BY id ASC LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_top_players(&self, limit: i64) -> Result<Vec<PlayerRecord>, sqlx::Error> {
        sqlx::query_as::<_, PlayerRecord>(
            r#"
            SELECT id, username, score
            FROM players
            ORDER BY score DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_players(&self) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
pub async fn create_test_db() -> Database {
    use sqlx::sqlite::SqlitePoolOptions;

    // A second connection to `sqlite::memory:` would open a different, empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = Database { pool };
    db.initialize().await.unwrap();
    db
}

#[cfg(test)]
pub async fn set_score(db: &Database, id: i64, score: i64) {
    sqlx::query("UPDATE players SET score = ? WHERE id = ?")
        .bind(score)
        .bind(id)
        .execute(&db.pool)
        .await
        .unwrap();
}
