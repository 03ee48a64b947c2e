use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the game reviews backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::get_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GameResponse,
            crate::dto::game::ReviewSummary,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game details joined with review aggregates"),
    )
)]
pub struct ApiDoc;
