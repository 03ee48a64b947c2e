use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::Document, bson::doc};
use tracing::debug;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoReviewAggregate, review_pipeline},
};
use crate::dao::{
    game_store::ReviewStore,
    models::{GameId, ReviewAggregateEntity},
    storage::StorageResult,
};

/// MongoDB-backed [`ReviewStore`] implementation.
///
/// Cloning is cheap: the driver client is internally pooled and shared by every clone.
#[derive(Clone)]
pub struct MongoReviewStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    // Held so the driver's connection pool lives as long as the store.
    _client: Client,
    database: Database,
    collection_name: String,
}

impl MongoReviewStore {
    /// Connect to MongoDB and confirm the server answers a ping.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = establish_connection(&config).await?;

        Ok(Self {
            inner: Arc::new(MongoInner {
                _client: client,
                database,
                collection_name: config.collection_name,
            }),
        })
    }

    fn collection(&self) -> Collection<Document> {
        self.inner
            .database
            .collection::<Document>(&self.inner.collection_name)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.inner
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn aggregate(&self, id: GameId) -> MongoResult<Vec<ReviewAggregateEntity>> {
        let game_id = id.as_i64();
        let map_err = |source: mongodb::error::Error| MongoDaoError::AggregateReviews {
            game_id,
            collection: self.inner.collection_name.clone(),
            source,
        };

        let aggregates: Vec<MongoReviewAggregate> = self
            .collection()
            .aggregate(review_pipeline(game_id))
            .with_type::<MongoReviewAggregate>()
            .await
            .map_err(map_err)?
            .try_collect()
            .await
            .map_err(map_err)?;

        debug!(%id, groups = aggregates.len(), "aggregated game reviews");
        Ok(aggregates.into_iter().map(Into::into).collect())
    }
}

impl ReviewStore for MongoReviewStore {
    fn aggregate_reviews(
        &self,
        id: GameId,
    ) -> BoxFuture<'static, StorageResult<Vec<ReviewAggregateEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.aggregate(id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
