#[cfg(test)]
pub mod memory;
pub mod mongodb;
pub mod mysql;

use crate::dao::models::{GameId, GameRecord, ReviewAggregateEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Read access to the relational game catalogue.
pub trait GameDetailsStore: Send + Sync {
    fn find_game(&self, id: GameId) -> BoxFuture<'static, StorageResult<Option<GameRecord>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Read access to the review documents and their aggregation.
pub trait ReviewStore: Send + Sync {
    /// Group at most [`REVIEW_LIMIT`] reviews of `id`; yields zero or one aggregate.
    fn aggregate_reviews(
        &self,
        id: GameId,
    ) -> BoxFuture<'static, StorageResult<Vec<ReviewAggregateEntity>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Maximum number of review documents folded into one aggregate.
pub const REVIEW_LIMIT: i64 = 50;
