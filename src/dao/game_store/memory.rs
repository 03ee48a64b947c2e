//! In-memory stores used by unit tests in place of MySQL and MongoDB.

use std::{
    collections::HashMap,
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::Barrier;

use super::{GameDetailsStore, REVIEW_LIMIT, ReviewStore};
use crate::dao::{
    models::{GameId, GameRecord, ReviewAggregateEntity},
    storage::{StorageError, StorageResult},
};

/// Failure injected into a fake store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Unavailable,
    Query,
}

impl Failure {
    fn into_error(self) -> StorageError {
        match self {
            Failure::Unavailable => StorageError::unavailable(
                "connection refused".into(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            ),
            Failure::Query => StorageError::query(
                "query rejected".into(),
                io::Error::new(io::ErrorKind::InvalidData, "query rejected"),
            ),
        }
    }
}

/// Fake relational catalogue keyed by game identifier.
#[derive(Default)]
pub struct MemoryGameStore {
    games: HashMap<GameId, GameRecord>,
    failure: Option<Failure>,
    gate: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl MemoryGameStore {
    pub fn with_game(mut self, id: GameId, record: GameRecord) -> Self {
        self.games.insert(id, record);
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Block each lookup on `gate` before answering.
    pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GameDetailsStore for MemoryGameStore {
    fn find_game(&self, id: GameId) -> BoxFuture<'static, StorageResult<Option<GameRecord>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.games.get(&id).cloned()),
        };
        let gate = self.gate.clone();
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.wait().await;
            }
            result
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let result = self.failure.map_or(Ok(()), |failure| Err(failure.into_error()));
        Box::pin(async move { result })
    }
}

/// One raw review document.
#[derive(Debug, Clone)]
pub struct ReviewDocument {
    pub comment: Option<String>,
    pub rating: Option<f64>,
}

impl ReviewDocument {
    pub fn new(comment: &str, rating: f64) -> Self {
        Self {
            comment: Some(comment.to_owned()),
            rating: Some(rating),
        }
    }
}

/// Fake review collection that folds documents the way the aggregation pipeline does.
///
/// Like `$push`, documents without a comment add nothing to `reviews` but still count
/// towards the limit and the average.
#[derive(Default)]
pub struct MemoryReviewStore {
    documents: Vec<(GameId, ReviewDocument)>,
    failure: Option<Failure>,
    gate: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl MemoryReviewStore {
    pub fn with_review(mut self, id: GameId, document: ReviewDocument) -> Self {
        self.documents.push((id, document));
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn aggregate(&self, id: GameId) -> Vec<ReviewAggregateEntity> {
        let matched: Vec<&ReviewDocument> = self
            .documents
            .iter()
            .filter(|(game_id, _)| *game_id == id)
            .map(|(_, document)| document)
            .take(REVIEW_LIMIT as usize)
            .collect();
        if matched.is_empty() {
            return Vec::new();
        }

        let ratings: Vec<f64> = matched.iter().filter_map(|doc| doc.rating).collect();
        let average_rating =
            (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

        vec![ReviewAggregateEntity {
            game_id: id.as_i64(),
            reviews: matched
                .iter()
                .filter_map(|doc| doc.comment.clone().map(Value::String))
                .collect(),
            average_rating,
        }]
    }
}

impl ReviewStore for MemoryReviewStore {
    fn aggregate_reviews(
        &self,
        id: GameId,
    ) -> BoxFuture<'static, StorageResult<Vec<ReviewAggregateEntity>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.aggregate(id)),
        };
        let gate = self.gate.clone();
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.wait().await;
            }
            result
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let result = self.failure.map_or(Ok(()), |failure| Err(failure.into_error()));
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_aggregation_caps_documents_and_averages() {
        let id = GameId::new(5);
        let mut store = MemoryReviewStore::default();
        for i in 0..75 {
            store = store.with_review(id, ReviewDocument::new(&format!("c{i}"), (i % 5) as f64));
        }
        store = store.with_review(GameId::new(6), ReviewDocument::new("other", 1.0));

        let aggregates = store.aggregate_reviews(id).await.unwrap();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].reviews.len(), 50);
        assert_eq!(aggregates[0].reviews[0], Value::from("c0"));
        assert_eq!(aggregates[0].reviews[49], Value::from("c49"));
        // ratings 0..=4 repeat ten times over the first fifty documents
        assert!((aggregates[0].average_rating.unwrap() - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn documents_without_comment_are_not_pushed() {
        let id = GameId::new(9);
        let store = MemoryReviewStore::default()
            .with_review(id, ReviewDocument::new("kept", 4.0))
            .with_review(
                id,
                ReviewDocument {
                    comment: None,
                    rating: Some(2.0),
                },
            );

        let aggregates = store.aggregate_reviews(id).await.unwrap();
        assert_eq!(aggregates[0].reviews, vec![Value::from("kept")]);
        assert!((aggregates[0].average_rating.unwrap() - 3.0).abs() < 1e-9);
    }
}
