use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`MySqlDaoError`] failures.
pub type MySqlResult<T> = Result<T, MySqlDaoError>;

/// Failures that can occur while talking to the relational catalogue.
#[derive(Debug, Error)]
pub enum MySqlDaoError {
    #[error("failed to acquire a MySQL connection from the pool")]
    Acquire {
        #[source]
        source: sqlx::Error,
    },
    #[error("MySQL liveness ping failed")]
    Ping {
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to load game `{game_id}`")]
    LoadGame {
        game_id: i64,
        #[source]
        source: sqlx::Error,
    },
}

impl MySqlDaoError {
    fn driver_error(&self) -> &sqlx::Error {
        match self {
            MySqlDaoError::Acquire { source }
            | MySqlDaoError::Ping { source }
            | MySqlDaoError::LoadGame { source, .. } => source,
        }
    }

    /// Whether the pool or network failed before the server could answer.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self.driver_error(),
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::WorkerCrashed
        )
    }
}

impl From<MySqlDaoError> for StorageError {
    fn from(err: MySqlDaoError) -> Self {
        if err.is_connectivity() {
            StorageError::unavailable(err.to_string(), err)
        } else {
            StorageError::query(err.to_string(), err)
        }
    }
}
