use mongodb::bson::Document;
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;

use crate::shared::config::DatabaseConfig;
use crate::shared::error::AnalyticsError;

/// Handle to the backing MongoDB deployment.
///
/// One instance is constructed by the composition root and shared for the
/// process lifetime. The first call to [`MongoStore::database`] performs the
/// actual connection; racing first callers are collapsed into a single
/// initialization by the cell, and every later call returns the cached
/// handle.
pub struct MongoStore {
    uri: String,
    db_name: String,
    inner: OnceCell<(Client, Database)>,
}

impl MongoStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            uri: config.uri.clone(),
            db_name: config.name.clone(),
            inner: OnceCell::new(),
        }
    }

    pub async fn database(&self) -> Result<&Database, AnalyticsError> {
        if self.uri.trim().is_empty() {
            return Err(AnalyticsError::Configuration(
                "database.uri is empty; set MONGODB_URI or [database].uri in config.toml"
                    .to_string(),
            ));
        }
        let (_, db) = self
            .inner
            .get_or_try_init(|| async {
                tracing::info!("connecting to document store, database '{}'", self.db_name);
                let client = Client::with_uri_str(&self.uri)
                    .await
                    .map_err(AnalyticsError::Connection)?;
                let db = client.database(&self.db_name);
                Ok::<_, AnalyticsError>((client, db))
            })
            .await?;
        Ok(db)
    }

    pub async fn collection(&self, name: &str) -> Result<Collection<Document>, AnalyticsError> {
        Ok(self.database().await?.collection(name))
    }

    /// Tear down the underlying client. Steady-state operation never calls
    /// this; it exists for clean shutdown and tests.
    pub async fn close(self) {
        if let Some((client, _)) = self.inner.into_inner() {
            client.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;

    fn store_with_uri(uri: &str) -> MongoStore {
        let config: Config = toml::from_str(&format!("[database]\nuri = \"{uri}\"\n")).unwrap();
        MongoStore::new(&config.database)
    }

    #[tokio::test]
    async fn empty_uri_is_a_configuration_error() {
        let store = store_with_uri("");
        let err = store.database().await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration(_)));
    }

    #[tokio::test]
    async fn malformed_uri_is_a_connection_error() {
        let store = store_with_uri("not-a-connection-string");
        let err = store.database().await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Connection(_)));
    }
}
