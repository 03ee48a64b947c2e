//! Application-level configuration loaded from the environment and the optional port argument.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use time::UtcOffset;
use tracing::{info, warn};

use crate::dao::game_store::{
    mongodb::MongoConfig,
    mysql::{MySqlConfig, format_offset, parse_offset},
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_NAME: &str = "bgg";
const DEFAULT_DB_CONN_LIMIT: u32 = 4;
const DEFAULT_DB_TIMEZONE: &str = "+08:00";
const DEFAULT_DB_ACQUIRE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "bgg";
const DEFAULT_MONGO_COLLECTION: &str = "games";
const DEFAULT_MONGO_SELECTION_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pub port: u16,
    pub mysql: MySqlConfig,
    pub mongo: MongoConfig,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load the configuration from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::from_sources(env::args().nth(1), |key| env::var(key).ok())
    }

    /// Build the configuration from an optional port argument and a variable lookup.
    ///
    /// Values that are set but cannot be parsed fall back to their default with a warning.
    pub fn from_sources(port_arg: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = port_arg
            .as_deref()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .or_else(|| parsed(&lookup, "PORT"))
            .unwrap_or(DEFAULT_PORT);

        let timezone = lookup("DB_TIMEZONE")
            .and_then(|value| {
                let offset = parse_offset(value.trim());
                if offset.is_none() {
                    warn!(
                        var = "DB_TIMEZONE",
                        value = %value,
                        default = DEFAULT_DB_TIMEZONE,
                        "invalid timezone offset; using default"
                    );
                }
                offset
            })
            .or_else(|| parse_offset(DEFAULT_DB_TIMEZONE))
            .unwrap_or(UtcOffset::UTC);

        let mut mysql = MySqlConfig::new(
            lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_owned()),
            parsed(&lookup, "DB_PORT").unwrap_or(DEFAULT_DB_PORT),
            lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_owned()),
        )
        .with_credentials(lookup("DB_USER"), lookup("DB_PW"));
        mysql.max_connections = parsed(&lookup, "DB_CONN_LIMIT")
            .filter(|limit: &u32| *limit > 0)
            .unwrap_or(DEFAULT_DB_CONN_LIMIT);
        mysql.acquire_timeout = millis(&lookup, "DB_ACQUIRE_TIMEOUT_MS")
            .unwrap_or(Duration::from_millis(DEFAULT_DB_ACQUIRE_TIMEOUT_MS));
        mysql.timezone = timezone;

        let mongo = MongoConfig::new(
            lookup("MG_HOST").unwrap_or_else(|| DEFAULT_MONGO_URL.to_owned()),
            lookup("MG_NAME").unwrap_or_else(|| DEFAULT_MONGO_DB.to_owned()),
            lookup("MG_COLLECTION").unwrap_or_else(|| DEFAULT_MONGO_COLLECTION.to_owned()),
        )
        .with_server_selection_timeout(
            millis(&lookup, "MG_SELECTION_TIMEOUT_MS")
                .unwrap_or(Duration::from_millis(DEFAULT_MONGO_SELECTION_TIMEOUT_MS)),
        );

        let request_timeout = millis(&lookup, "REQUEST_TIMEOUT_MS")
            .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));

        let config = Self {
            port,
            mysql,
            mongo,
            request_timeout,
        };
        config.log_summary();
        config
    }

    fn log_summary(&self) {
        info!(
            port = self.port,
            mysql_host = %self.mysql.host,
            mysql_port = self.mysql.port,
            mysql_database = %self.mysql.database,
            pool_size = self.mysql.max_connections,
            timezone = %format_offset(self.mysql.timezone),
            mongo_database = %self.mongo.database_name,
            mongo_collection = %self.mongo.collection_name,
            request_timeout_ms = self.request_timeout.as_millis() as u64,
            "loaded configuration"
        );
    }
}

/// Parse a variable if it is set, warning and yielding `None` when it is malformed.
fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(var)?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(var, value = %value, error = %err, "invalid value; using default");
            None
        }
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Option<Duration> {
    parsed::<u64>(lookup, var)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}
