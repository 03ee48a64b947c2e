use mongodb::{Client, Database, bson::doc, options::ClientOptions};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// Build a client and confirm with a single `ping` that the server answers.
///
/// No retry: an unreachable server fails startup.
pub async fn establish_connection(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let mut options =
        ClientOptions::parse(&config.uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri {
                uri: config.uri.clone(),
                source,
            })?;
    options.server_selection_timeout = Some(config.server_selection_timeout);

    let client = Client::with_options(options)
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|source| MongoDaoError::InitialPing { source })?;

    Ok((client, database))
}
