use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping both stores and report `degraded` when either one fails to answer.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let details = state.game_details();
    let reviews = state.reviews();
    let (details_health, reviews_health) =
        tokio::join!(details.health_check(), reviews.health_check());

    let mut healthy = true;
    if let Err(err) = details_health {
        warn!(error = %err, "relational store health check failed");
        healthy = false;
    }
    if let Err(err) = reviews_health {
        warn!(error = %err, "document store health check failed");
        healthy = false;
    }

    if healthy {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}
