//! Startup connectivity checks for both stores.

use std::future::Future;

use thiserror::Error;
use tracing::info;

use crate::{
    config::AppConfig,
    dao::game_store::{
        mongodb::{MongoDaoError, MongoReviewStore},
        mysql::{MySqlDaoError, MySqlGameStore},
    },
};

/// Failure to bring up one of the stores; the server must not start.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("unable to establish connection to the relational store")]
    Relational(#[from] MySqlDaoError),
    #[error("unable to establish connection to the document store")]
    Document(#[from] MongoDaoError),
}

/// Store handles that passed their startup check.
pub struct Stores {
    pub game_details: MySqlGameStore,
    pub reviews: MongoReviewStore,
}

/// Ping MySQL and connect to MongoDB concurrently; both must succeed.
pub async fn connect_stores(config: &AppConfig) -> Result<Stores, BootstrapError> {
    info!(
        mysql_host = %config.mysql.host,
        mongo_database = %config.mongo.database_name,
        "pinging MySQL and connecting to MongoDB"
    );
    let (game_details, reviews) = join_startup(
        MySqlGameStore::connect(config.mysql.clone()),
        MongoReviewStore::connect(config.mongo.clone()),
    )
    .await?;
    info!("both stores reachable");

    Ok(Stores {
        game_details,
        reviews,
    })
}

/// Drive both startup checks together, stopping at the first failure.
pub async fn join_startup<R, D>(
    relational: impl Future<Output = Result<R, MySqlDaoError>>,
    document: impl Future<Output = Result<D, MongoDaoError>>,
) -> Result<(R, D), BootstrapError> {
    tokio::try_join!(
        async { relational.await.map_err(BootstrapError::from) },
        async { document.await.map_err(BootstrapError::from) }
    )
}
