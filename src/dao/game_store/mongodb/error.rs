use mongodb::error::{Error as MongoError, ErrorKind};
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`MongoDaoError`] failures.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures that can occur while talking to the review database.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection")]
    InitialPing {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to aggregate reviews of game `{game_id}` in `{collection}`")]
    AggregateReviews {
        game_id: i64,
        collection: String,
        #[source]
        source: MongoError,
    },
}

impl MongoDaoError {
    fn driver_error(&self) -> &MongoError {
        match self {
            MongoDaoError::InvalidUri { source, .. }
            | MongoDaoError::ClientConstruction { source }
            | MongoDaoError::InitialPing { source }
            | MongoDaoError::HealthPing { source }
            | MongoDaoError::AggregateReviews { source, .. } => source,
        }
    }

    /// Whether the driver failed to reach a server at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self.driver_error().kind.as_ref(),
            ErrorKind::ServerSelection { .. }
                | ErrorKind::Io(_)
                | ErrorKind::ConnectionPoolCleared { .. }
                | ErrorKind::DnsResolve { .. }
        )
    }
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        if err.is_connectivity() {
            StorageError::unavailable(err.to_string(), err)
        } else {
            StorageError::query(err.to_string(), err)
        }
    }
}
