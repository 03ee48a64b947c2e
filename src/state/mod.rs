use std::{sync::Arc, time::Duration};

use crate::dao::game_store::{GameDetailsStore, ReviewStore};

pub type SharedState = Arc<AppState>;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Central application state holding the store handles injected at startup.
///
/// Everything here is fixed once the server starts; requests only read it.
pub struct AppState {
    game_details: Arc<dyn GameDetailsStore>,
    reviews: Arc<dyn ReviewStore>,
    request_timeout: Duration,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        game_details: Arc<dyn GameDetailsStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> SharedState {
        Self::with_timeout(game_details, reviews, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Same as [`AppState::new`] with an explicit bound on each request's backend calls.
    pub fn with_timeout(
        game_details: Arc<dyn GameDetailsStore>,
        reviews: Arc<dyn ReviewStore>,
        request_timeout: Duration,
    ) -> SharedState {
        Arc::new(Self {
            game_details,
            reviews,
            request_timeout,
        })
    }

    /// Relational catalogue of games.
    pub fn game_details(&self) -> Arc<dyn GameDetailsStore> {
        Arc::clone(&self.game_details)
    }

    /// Review document store.
    pub fn reviews(&self) -> Arc<dyn ReviewStore> {
        Arc::clone(&self.reviews)
    }

    /// Upper bound on the joined backend calls of one request.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
