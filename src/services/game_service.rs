//! Read path of `GET /game/{id}`: join catalogue details with review aggregates.

use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::{
    dao::models::GameId,
    dto::game::{GameResponse, ReviewSummary},
    error::ServiceError,
    state::SharedState,
};

/// Fetch the catalogue row and the review aggregate of `id` concurrently.
///
/// Both lookups must succeed; the first failure cancels the other. A missing row or an
/// absence of reviews is not an error and yields an empty field instead.
pub async fn get_game(state: &SharedState, id: GameId) -> Result<GameResponse, ServiceError> {
    let details = state.game_details();
    let reviews = state.reviews();

    info!(%id, "fetching game details and reviews");
    let joined = async {
        tokio::try_join!(details.find_game(id), reviews.aggregate_reviews(id))
    };

    let (game_details, aggregates) = timeout(state.request_timeout(), joined)
        .await
        .map_err(|_| {
            warn!(%id, timeout_ms = state.request_timeout().as_millis() as u64, "game lookup timed out");
            ServiceError::Timeout
        })?
        .map_err(|err| {
            error!(%id, error = %err, "game lookup failed");
            ServiceError::from(err)
        })?;

    Ok(GameResponse {
        game_details,
        game_reviews: aggregates.into_iter().map(ReviewSummary::from).collect(),
    })
}
