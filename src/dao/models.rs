use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical game identifier shared by the relational and document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u32);

impl GameId {
    /// Wrap a raw identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Identifier widened to the integer type both stores bind against.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

/// One row of the relational `game` table, keyed by column name.
///
/// The service does not own this schema, so columns are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecord(Map<String, Value>);

impl GameRecord {
    /// Build a record from already converted column values.
    pub fn new(columns: Map<String, Value>) -> Self {
        Self(columns)
    }

    /// Look up a single column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Number of columns carried by the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row had no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for GameRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Grouped review summary for a single game, as produced by the review pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewAggregateEntity {
    /// Identifier the reviews were grouped by.
    pub game_id: i64,
    /// Review comments in the store's natural order, as stored; documents without one are skipped.
    pub reviews: Vec<Value>,
    /// Mean of the ratings over the same documents, if any carried a rating.
    pub average_rating: Option<f64>,
}
