//! Connection to the document database.
//!
//! The client is opened once at startup and handed to the repository; the
//! driver pools and multiplexes it across requests.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::MongoConfig;

pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Connects and pings the server, so an unreachable database fails here
    /// rather than on the first request.
    pub async fn open(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        if let Err(err) = database.run_command(doc! { "ping": 1 }, None).await {
            tracing::error!(error = %err, database = %config.database, "database unreachable");
            return Err(err);
        }

        tracing::info!(database = %config.database, "connected to database");

        Ok(Self { client, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Waits for in-flight operations and closes the pool.
    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::info!("database connection closed");
    }
}
