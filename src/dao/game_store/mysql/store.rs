use futures::future::BoxFuture;
use sqlx::{Connection, MySqlPool, mysql::MySqlPoolOptions};
use time::UtcOffset;
use tracing::debug;

use super::{
    config::MySqlConfig,
    error::{MySqlDaoError, MySqlResult},
    row::row_to_record,
};
use crate::dao::{
    game_store::GameDetailsStore,
    models::{GameId, GameRecord},
    storage::StorageResult,
};

const SQL_FIND_GAME: &str = "SELECT * FROM game WHERE gid = ? LIMIT 1";

/// MySQL-backed [`GameDetailsStore`] implementation.
#[derive(Clone)]
pub struct MySqlGameStore {
    pool: MySqlPool,
    timezone: UtcOffset,
}

impl MySqlGameStore {
    /// Build the bounded pool and verify one pooled connection answers a ping.
    pub async fn connect(config: MySqlConfig) -> MySqlResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        let store = Self::from_pool(pool, config.timezone);
        store.ping().await?;
        Ok(store)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool, timezone: UtcOffset) -> Self {
        Self { pool, timezone }
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn ping(&self) -> MySqlResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|source| MySqlDaoError::Acquire { source })?;
        conn.ping()
            .await
            .map_err(|source| MySqlDaoError::Ping { source })?;
        // Dropping the guard hands the connection back to the pool.
        drop(conn);
        Ok(())
    }

    async fn find(&self, id: GameId) -> MySqlResult<Option<GameRecord>> {
        let game_id = id.as_i64();
        let row = sqlx::query(SQL_FIND_GAME)
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| MySqlDaoError::LoadGame { game_id, source })?;

        debug!(%id, found = row.is_some(), "queried game details");
        Ok(row.map(|row| row_to_record(&row, self.timezone)))
    }
}

impl GameDetailsStore for MySqlGameStore {
    fn find_game(&self, id: GameId) -> BoxFuture<'static, StorageResult<Option<GameRecord>>> {
        let store = self.clone();
        Box::pin(async move { store.find(id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
