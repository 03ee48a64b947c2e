use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{GameId, GameRecord, ReviewAggregateEntity},
    dto::validation::validate_game_id,
    error::ServiceError,
};

/// Path parameters of `GET /game/{id}`.
#[derive(Debug, Deserialize)]
pub struct GamePath {
    pub id: String,
}

impl Validate for GamePath {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_game_id(&self.id) {
            errors.add("id", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl GamePath {
    /// Convert the validated path segment into the canonical identifier.
    pub fn game_id(&self) -> Result<GameId, ServiceError> {
        self.id
            .parse()
            .map_err(|_| ServiceError::InvalidInput(format!("invalid game id `{}`", self.id)))
    }
}

/// Review summary for one game.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewSummary {
    /// Identifier the reviews were grouped by.
    #[serde(rename = "_id")]
    pub id: i64,
    /// Up to 50 review comments in storage order, passed through as stored.
    /// Reviews without a comment field contribute no entry.
    pub reviews: Vec<Value>,
    /// Mean rating over the same reviews, `null` if none carried a rating.
    pub average_rating: Option<f64>,
}

impl From<ReviewAggregateEntity> for ReviewSummary {
    fn from(entity: ReviewAggregateEntity) -> Self {
        Self {
            id: entity.game_id,
            reviews: entity.reviews,
            average_rating: entity.average_rating,
        }
    }
}

/// Combined payload returned by `GET /game/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    /// Catalogue row of the game, `null` when no row matches.
    #[schema(value_type = Option<Object>)]
    pub game_details: Option<GameRecord>,
    /// Zero or one review summary.
    pub game_reviews: Vec<ReviewSummary>,
}
