use std::time::Duration;

/// Runtime configuration describing where the review documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database_name: String,
    pub collection_name: String,
    pub server_selection_timeout: Duration,
}

impl MongoConfig {
    /// Construct a configuration from explicit URI, database and collection names.
    pub fn new(
        uri: impl Into<String>,
        database_name: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            collection_name: collection_name.into(),
            server_selection_timeout: Duration::from_secs(5),
        }
    }

    /// Bound how long the driver waits for a reachable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }
}
