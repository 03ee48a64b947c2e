use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use time::UtcOffset;

/// Runtime configuration describing how to reach the relational game catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Session timezone; `DATETIME` values are read as wall-clock time at this offset.
    pub timezone: UtcOffset,
}

impl MySqlConfig {
    /// Construct a configuration for `database` on `host:port` with default pool settings.
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
            database: database.into(),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(5),
            timezone: UtcOffset::UTC,
        }
    }

    /// Attach credentials; either part may be absent.
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Driver connect options for a single connection.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .timezone(Some(format_offset(self.timezone)));
        if let Some(username) = &self.username {
            options = options.username(username);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }
}

/// Parse a `+HH:MM` / `-HH:MM` offset as accepted by MySQL's `time_zone` variable.
pub fn parse_offset(value: &str) -> Option<UtcOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1i8, &value[1..]),
        b'-' => (-1i8, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i8 = hours.parse().ok()?;
    let minutes: i8 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).ok()
}

/// Render an offset the way MySQL expects it in `SET time_zone`.
pub fn format_offset(offset: UtcOffset) -> String {
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    format!("{sign}{:02}:{:02}", hours.unsigned_abs(), minutes.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(
            parse_offset("+08:00"),
            Some(UtcOffset::from_hms(8, 0, 0).unwrap())
        );
        assert_eq!(
            parse_offset("-05:30"),
            Some(UtcOffset::from_hms(-5, -30, 0).unwrap())
        );
        assert_eq!(parse_offset("+00:00"), Some(UtcOffset::UTC));
    }

    #[test]
    fn rejects_malformed_offsets() {
        assert_eq!(parse_offset(""), None);
        assert_eq!(parse_offset("08:00"), None);
        assert_eq!(parse_offset("+8:00"), None);
        assert_eq!(parse_offset("+08:75"), None);
        assert_eq!(parse_offset("+30:00"), None);
        assert_eq!(parse_offset("Asia/Singapore"), None);
    }

    #[test]
    fn formats_offsets_for_the_session() {
        assert_eq!(format_offset(UtcOffset::from_hms(8, 0, 0).unwrap()), "+08:00");
        assert_eq!(
            format_offset(UtcOffset::from_hms(-5, -30, 0).unwrap()),
            "-05:30"
        );
        assert_eq!(format_offset(UtcOffset::UTC), "+00:00");
    }

    #[test]
    fn defaults_match_a_small_pool() {
        let config = MySqlConfig::new("localhost", 3306, "bgg");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.username, None);
        assert_eq!(config.timezone, UtcOffset::UTC);
    }
}
