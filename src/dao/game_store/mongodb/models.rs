use mongodb::bson::{Document, doc};
use serde::Deserialize;
use serde_json::Value;

use crate::dao::{game_store::REVIEW_LIMIT, models::ReviewAggregateEntity};

/// Shape of one `$group` output document of [`review_pipeline`].
///
/// Comments are kept as whatever BSON value the document held, so numeric comments from
/// CSV imports pass through instead of failing the whole cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoReviewAggregate {
    #[serde(rename = "_id")]
    game_id: i64,
    #[serde(default)]
    reviews: Vec<Value>,
    #[serde(default)]
    average_rating: Option<f64>,
}

impl From<MongoReviewAggregate> for ReviewAggregateEntity {
    fn from(value: MongoReviewAggregate) -> Self {
        Self {
            game_id: value.game_id,
            reviews: value.reviews,
            average_rating: value.average_rating,
        }
    }
}

/// Match the reviews of one game, keep the first [`REVIEW_LIMIT`] in natural order, and fold
/// them into a single group holding every comment and the mean rating. The group key is
/// normalised to a 64-bit integer since `ID` may be stored as Int32, Int64 or Double.
pub fn review_pipeline(game_id: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "ID": game_id } },
        doc! { "$limit": REVIEW_LIMIT },
        doc! {
            "$group": {
                "_id": { "$toLong": "$ID" },
                "reviews": { "$push": "$comment" },
                "average_rating": { "$avg": "$rating" },
            }
        },
    ]
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{Bson, deserialize_from_document};

    use super::*;

    #[test]
    fn pipeline_matches_limits_then_groups() {
        let pipeline = review_pipeline(13);
        assert_eq!(pipeline.len(), 3);

        let stages: Vec<&str> = pipeline
            .iter()
            .map(|stage| stage.keys().next().unwrap().as_str())
            .collect();
        assert_eq!(stages, ["$match", "$limit", "$group"]);

        let matcher = pipeline[0].get_document("$match").unwrap();
        assert_eq!(matcher.get("ID"), Some(&Bson::Int64(13)));
        assert_eq!(pipeline[1].get("$limit"), Some(&Bson::Int64(50)));
    }

    #[test]
    fn group_stage_collects_comments_and_averages_ratings() {
        let pipeline = review_pipeline(7);
        let group = pipeline[2].get_document("$group").unwrap();

        assert_eq!(
            group.get_document("_id").unwrap(),
            &doc! { "$toLong": "$ID" }
        );
        assert_eq!(
            group.get_document("reviews").unwrap(),
            &doc! { "$push": "$comment" }
        );
        assert_eq!(
            group.get_document("average_rating").unwrap(),
            &doc! { "$avg": "$rating" }
        );
    }

    #[test]
    fn aggregate_document_converts_into_entity() {
        let aggregate: MongoReviewAggregate = serde_json::from_value(serde_json::json!({
            "_id": 13,
            "reviews": ["great", null, "fine"],
            "average_rating": 4.0,
        }))
        .unwrap();

        let entity: ReviewAggregateEntity = aggregate.into();
        assert_eq!(entity.game_id, 13);
        assert_eq!(
            entity.reviews,
            vec![Value::from("great"), Value::Null, Value::from("fine")]
        );
        assert_eq!(entity.average_rating, Some(4.0));
    }

    #[test]
    fn mixed_type_comments_pass_through_the_decode() {
        let group = doc! {
            "_id": 13_i64,
            "reviews": ["great", 10_i32, 7.5, "fine"],
            "average_rating": 4.0,
        };

        let aggregate: MongoReviewAggregate = deserialize_from_document(group).unwrap();
        let entity: ReviewAggregateEntity = aggregate.into();
        assert_eq!(
            entity.reviews,
            vec![
                Value::from("great"),
                Value::from(10),
                Value::from(7.5),
                Value::from("fine"),
            ]
        );
        assert_eq!(entity.average_rating, Some(4.0));
    }

    #[test]
    fn missing_ratings_leave_average_empty() {
        let aggregate: MongoReviewAggregate = serde_json::from_value(serde_json::json!({
            "_id": 13,
            "reviews": ["only a comment"],
            "average_rating": null,
        }))
        .unwrap();

        let entity: ReviewAggregateEntity = aggregate.into();
        assert_eq!(entity.average_rating, None);
    }
}
