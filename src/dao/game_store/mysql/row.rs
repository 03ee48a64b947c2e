//! Conversion of untyped MySQL rows into JSON game records.

use serde_json::{Map, Value};
use sqlx::{
    Column, Row, TypeInfo, ValueRef,
    mysql::MySqlRow,
};
use time::{Date, PrimitiveDateTime, Time, UtcOffset, format_description::well_known::Rfc3339};
use tracing::warn;

use crate::dao::models::GameRecord;

/// Convert every column of `row` into a JSON value keyed by column name.
///
/// Columns that fail to decode are logged and emitted as `null` so one odd column
/// does not hide the rest of the row.
pub fn row_to_record(row: &MySqlRow, timezone: UtcOffset) -> GameRecord {
    let mut columns = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let type_name = column.type_info().name();
        let value = match column_value(row, column.ordinal(), type_name, timezone) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    column = column.name(),
                    sql_type = type_name,
                    error = %err,
                    "failed to decode column; emitting null"
                );
                Value::Null
            }
        };
        columns.insert(column.name().to_owned(), value);
    }
    GameRecord::new(columns)
}

fn column_value(
    row: &MySqlRow,
    index: usize,
    type_name: &str,
    timezone: UtcOffset,
) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::from(row.try_get::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::from(row.try_get::<u64, _>(index)?),
        "YEAR" => Value::from(row.try_get_unchecked::<u16, _>(index)?),
        "FLOAT" => Value::from(f64::from(row.try_get::<f32, _>(index)?)),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(index)?),
        "DATETIME" | "TIMESTAMP" => {
            datetime_value(row.try_get::<PrimitiveDateTime, _>(index)?, timezone)
        }
        "DATE" => date_value(row.try_get::<Date, _>(index)?),
        "TIME" => time_value(row.try_get::<Time, _>(index)?),
        "JSON" => json_value(row.try_get_unchecked::<String, _>(index)?),
        // DECIMAL and the character types arrive as text in the binary protocol.
        _ => Value::from(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

/// Read a wall-clock value at the session offset and render it as a UTC RFC 3339 timestamp.
fn datetime_value(value: PrimitiveDateTime, timezone: UtcOffset) -> Value {
    value
        .assume_offset(timezone)
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map(Value::String)
        .unwrap_or(Value::Null)
}

fn date_value(value: Date) -> Value {
    Value::String(format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        u8::from(value.month()),
        value.day()
    ))
}

fn time_value(value: Time) -> Value {
    Value::String(format!(
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    ))
}

fn json_value(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
