//! Idempotent collection bootstrap

use std::sync::Arc;

use crate::providers::VectorStoreProvider;
use crate::types::{CollectionSpec, DocumentHealth, StatusResponse};

/// Result of ensuring the collection exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    /// The collection was missing and has been created
    Created,
    /// The collection was already present; nothing changed
    AlreadyExists,
    /// Listing or creating failed
    Error(String),
}

impl CollectionStatus {
    /// Render as the `{status, message}` body for a named collection
    pub fn to_response(&self, collection: &str) -> StatusResponse {
        match self {
            CollectionStatus::Created => {
                StatusResponse::success(format!("Collection '{}' created successfully!", collection))
            }
            CollectionStatus::AlreadyExists => {
                StatusResponse::info(format!("Collection '{}' already exists.", collection))
            }
            CollectionStatus::Error(message) => StatusResponse::error(message.clone()),
        }
    }
}

/// Creates the target collection on demand
pub struct CollectionManager {
    store: Arc<dyn VectorStoreProvider>,
    name: String,
    spec: CollectionSpec,
}

impl CollectionManager {
    pub fn new(store: Arc<dyn VectorStoreProvider>, name: impl Into<String>, spec: CollectionSpec) -> Self {
        Self {
            store,
            name: name.into(),
            spec,
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create the collection unless one with the same name exists
    ///
    /// Never fails; errors are reported as `CollectionStatus::Error`.
    pub async fn ensure_collection(&self) -> CollectionStatus {
        let existing = match self.store.list_collections().await {
            Ok(names) => names,
            Err(e) => {
                tracing::error!("Failed to list collections: {}", e);
                return CollectionStatus::Error(e.to_string());
            }
        };
        tracing::debug!("Existing collections: {:?}", existing);

        if existing.iter().any(|n| n == &self.name) {
            tracing::info!("Collection '{}' already exists", self.name);
            return CollectionStatus::AlreadyExists;
        }

        match self.store.create_collection(&self.name, self.spec).await {
            Ok(()) => {
                tracing::info!(
                    "Created collection '{}' ({} dimensions, {:?})",
                    self.name,
                    self.spec.dimensions,
                    self.spec.distance
                );
                CollectionStatus::Created
            }
            Err(e) => {
                tracing::error!("Failed to create collection '{}': {}", self.name, e);
                CollectionStatus::Error(e.to_string())
            }
        }
    }

    /// Health probe: the store is reachable and the collection can be read
    pub async fn health(&self) -> DocumentHealth {
        match self.store.get_collection(&self.name).await {
            Ok(_) => DocumentHealth::connected(),
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                DocumentHealth::disconnected(e.to_string())
            }
        }
    }
}
