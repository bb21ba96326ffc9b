//! Process-local vector store
//!
//! Brute-force search over points held in memory. Used when no Qdrant
//! instance is configured and as the store behind the service tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::providers::vector_store::{CollectionInfo, ScoredPoint, VectorStoreProvider};
use crate::types::{CollectionSpec, Distance, VectorPoint};

struct MemoryCollection {
    spec: CollectionSpec,
    points: Vec<VectorPoint>,
}

/// In-memory vector store
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, MemoryCollection>>,
}

impl InMemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points in a collection (0 if it does not exist)
    pub fn point_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |c| c.points.len())
    }

    /// Snapshot of the points in a collection
    pub fn points(&self, collection: &str) -> Vec<VectorPoint> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.points.clone())
            .unwrap_or_default()
    }
}

fn score(distance: Distance, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match distance {
        Distance::Dot => dot,
        Distance::Cosine => {
            let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot / (norm_a * norm_b)
            }
        }
        // Negated so that higher is still closer
        Distance::Euclid => -a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

fn payload_map(point: &VectorPoint) -> Map<String, Value> {
    match serde_json::to_value(&point.payload) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.read().keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(Error::vector_db(format!(
                "Collection `{}` already exists",
                name
            )));
        }
        collections.insert(
            name.to_string(),
            MemoryCollection {
                spec,
                points: Vec::new(),
            },
        );
        Ok(())
    }

    async fn get_collection(&self, name: &str) -> Result<CollectionInfo> {
        let collections = self.collections.read();
        let collection = collections
            .get(name)
            .ok_or_else(|| Error::vector_db(format!("Collection `{}` doesn't exist", name)))?;
        Ok(CollectionInfo {
            name: name.to_string(),
            dimensions: Some(collection.spec.dimensions),
            points_count: Some(collection.points.len() as u64),
        })
    }

    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<()> {
        let mut collections = self.collections.write();
        let target = collections.get_mut(collection).ok_or_else(|| {
            Error::vector_db(format!("Collection `{}` doesn't exist", collection))
        })?;

        // Reject the whole batch before touching stored points
        if let Some(bad) = points
            .iter()
            .find(|p| p.vector.len() != target.spec.dimensions)
        {
            return Err(Error::vector_db(format!(
                "Wrong vector dimension for point {}: expected {}, got {}",
                bad.id,
                target.spec.dimensions,
                bad.vector.len()
            )));
        }

        for point in points {
            match target.points.iter_mut().find(|p| p.id == point.id) {
                Some(existing) => *existing = point,
                None => target.points.push(point),
            }
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let collections = self.collections.read();
        let target = collections.get(collection).ok_or_else(|| {
            Error::vector_db(format!("Collection `{}` doesn't exist", collection))
        })?;

        if vector.len() != target.spec.dimensions {
            return Err(Error::vector_db(format!(
                "Wrong query vector dimension: expected {}, got {}",
                target.spec.dimensions,
                vector.len()
            )));
        }

        let mut scored: Vec<ScoredPoint> = target
            .points
            .iter()
            .map(|p| ScoredPoint {
                id: p.id.to_string(),
                score: score(target.spec.distance, vector, &p.vector),
                payload: payload_map(p),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
