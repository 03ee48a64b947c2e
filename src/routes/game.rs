use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use validator::Validate;

use crate::{
    dto::game::{GamePath, GameResponse},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes exposing game details joined with their reviews.
pub fn router() -> Router<SharedState> {
    Router::new().route("/game/{id}", get(get_game))
}

/// Return the catalogue row of a game together with its review aggregate.
#[utoipa::path(
    get,
    path = "/game/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Numeric game identifier")),
    responses(
        (status = 200, description = "Game details and reviews; either part may be empty", body = GameResponse),
        (status = 400, description = "Identifier is not a plain unsigned integer"),
        (status = 500, description = "A store failed the lookup"),
        (status = 503, description = "A store is unreachable or the lookup timed out")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(path): Path<GamePath>,
) -> Result<Json<GameResponse>, AppError> {
    path.validate()?;
    let id = path.game_id()?;
    let payload = game_service::get_game(&state, id).await?;
    Ok(Json(payload))
}
