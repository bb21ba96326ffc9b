//! Qdrant vector store over its REST API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::QdrantConfig;
use crate::error::{Error, Result};
use crate::providers::vector_store::{CollectionInfo, ScoredPoint, VectorStoreProvider};
use crate::types::{CollectionSpec, Distance, VectorPoint};

/// Qdrant REST client
pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl QdrantStore {
    /// Create a new client
    pub fn new(client: reqwest::Client, config: &QdrantConfig) -> Self {
        Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    /// Send a request and decode the `result` field of Qdrant's envelope
    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        what: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| Error::VectorDb(format!("Qdrant {} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::VectorDb(format!(
                "Qdrant {} failed ({}): {}",
                what, status, body
            )));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            Error::VectorDb(format!("Failed to parse Qdrant {} response: {}", what, e))
        })?;
        Ok(envelope.result)
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct CollectionsList {
    collections: Vec<CollectionName>,
}

#[derive(Deserialize)]
struct CollectionName {
    name: String,
}

#[derive(Deserialize)]
struct CollectionDetails {
    #[serde(default)]
    points_count: Option<u64>,
    #[serde(default)]
    config: Option<CollectionConfig>,
}

#[derive(Deserialize)]
struct CollectionConfig {
    params: CollectionParams,
}

#[derive(Deserialize)]
struct CollectionParams {
    #[serde(default)]
    vectors: Option<Value>,
}

#[derive(Serialize)]
struct CreateCollection {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Serialize)]
struct UpsertPoints<'a> {
    points: &'a [VectorPoint],
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct Hit {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Option<Map<String, Value>>,
}

fn distance_name(distance: Distance) -> &'static str {
    match distance {
        Distance::Cosine => "Cosine",
        Distance::Dot => "Dot",
        Distance::Euclid => "Euclid",
    }
}

fn id_to_string(id: Value) -> String {
    match id {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        let list: CollectionsList = self
            .call("list collections", self.request(reqwest::Method::GET, "/collections"))
            .await?;
        Ok(list.collections.into_iter().map(|c| c.name).collect())
    }

    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> Result<()> {
        let body = CreateCollection {
            vectors: VectorParams {
                size: spec.dimensions,
                distance: distance_name(spec.distance),
            },
        };
        let _: Value = self
            .call(
                "create collection",
                self.request(reqwest::Method::PUT, &format!("/collections/{}", name))
                    .json(&body),
            )
            .await?;
        Ok(())
    }

    async fn get_collection(&self, name: &str) -> Result<CollectionInfo> {
        let details: CollectionDetails = self
            .call(
                "get collection",
                self.request(reqwest::Method::GET, &format!("/collections/{}", name)),
            )
            .await?;

        let dimensions = details
            .config
            .and_then(|c| c.params.vectors)
            .and_then(|v| v.get("size").and_then(Value::as_u64))
            .map(|size| size as usize);

        Ok(CollectionInfo {
            name: name.to_string(),
            dimensions,
            points_count: details.points_count,
        })
    }

    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<()> {
        let _: Value = self
            .call(
                "upsert",
                self.request(
                    reqwest::Method::PUT,
                    &format!("/collections/{}/points?wait=true", collection),
                )
                .json(&UpsertPoints { points: &points }),
            )
            .await?;
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let hits: Vec<Hit> = self
            .call(
                "search",
                self.request(
                    reqwest::Method::POST,
                    &format!("/collections/{}/points/search", collection),
                )
                .json(&SearchRequest {
                    vector,
                    limit,
                    with_payload: true,
                }),
            )
            .await?;

        Ok(hits
            .into_iter()
            .map(|hit| ScoredPoint {
                id: id_to_string(hit.id),
                score: hit.score,
                payload: hit.payload.unwrap_or_default(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_uuid_ids() {
        assert_eq!(id_to_string(json!(42)), "42");
        assert_eq!(
            id_to_string(json!("5c56c793-69f3-4fbf-87e6-c4bf54c28c26")),
            "5c56c793-69f3-4fbf-87e6-c4bf54c28c26"
        );
    }

    #[test]
    fn test_create_body_shape() {
        let body = serde_json::to_value(CreateCollection {
            vectors: VectorParams {
                size: 768,
                distance: distance_name(Distance::Cosine),
            },
        })
        .unwrap();
        assert_eq!(body, json!({"vectors": {"size": 768, "distance": "Cosine"}}));
    }
}
