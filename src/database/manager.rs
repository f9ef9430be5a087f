use std::sync::Arc;

use mongodb::error::ErrorKind;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryStore;
use crate::database::mongo::MongoStore;
use crate::database::store::DocumentStore;

/// Errors from the data-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// No server could be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Mongo(mongodb::error::Error),
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } => DatabaseError::Unavailable(err.to_string()),
            _ => DatabaseError::Mongo(err),
        }
    }
}

/// Process-wide store handle shared by every request
pub type SharedStore = Arc<dyn DocumentStore>;

/// Builds the configured document store once at startup
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the store selected by configuration. The MongoDB handle itself is
    /// created lazily on the first operation and reused afterwards.
    pub fn open(config: &DatabaseConfig) -> Result<SharedStore, DatabaseError> {
        match config.backend {
            StoreBackend::Mongo => {
                let uri = config
                    .uri
                    .clone()
                    .ok_or(DatabaseError::ConfigMissing("MONGODB_URI"))?;
                info!("Using MongoDB store for database: {}", config.name);
                Ok(Arc::new(MongoStore::new(uri, &config.name)))
            }
            StoreBackend::Memory => {
                warn!("Using in-memory store; data is lost on shutdown");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    /// Round trip to the store to confirm connectivity
    pub async fn health_check(store: &dyn DocumentStore) -> Result<(), DatabaseError> {
        store.ping().await
    }
}
