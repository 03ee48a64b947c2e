/// Startup connectivity checks.
pub mod bootstrap;
/// OpenAPI documentation generation.
pub mod documentation;
/// Game details and review join.
pub mod game_service;
/// Health check service.
pub mod health_service;
