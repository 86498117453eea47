//! Milvus-backed VectorStore over the HTTP v2 API.
//!
//! Owns the embedding step: chunk and query texts are embedded through the
//! configured `LlmProvider` before they ever reach Milvus, so callers only
//! deal in raw text.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::store::{RetrievedItem, VectorStore};
use crate::core::errors::RagError;
use crate::llm::LlmProvider;

const VARCHAR_MAX_LENGTH: usize = 5000;

pub struct MilvusStore {
    base_url: String,
    client: Client,
    collection: String,
    embedding_dim: usize,
    embed_model: String,
    llm: Arc<dyn LlmProvider>,
}

impl MilvusStore {
    pub fn new(
        base_url: String,
        collection: String,
        embedding_dim: usize,
        embed_model: String,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            collection,
            embedding_dim,
            embed_model,
            llm,
        }
    }

    /// POST a vectordb request and unwrap the Milvus response envelope.
    async fn post(&self, path: &str, body: Value) -> Result<Value, RagError> {
        let url = format!("{}/v2/vectordb/{}", self.base_url, path);

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RagError::Unavailable(format!("Milvus request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(RagError::Store(format!(
                "Milvus returned {}: {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(RagError::store)?;

        // Milvus wraps every response in {code, message?, data?}; a non-zero
        // code is an application-level failure even on HTTP 200.
        let code = payload["code"].as_i64().unwrap_or(0);
        if code != 0 {
            let message = payload["message"].as_str().unwrap_or("unknown error");
            return Err(RagError::Store(format!(
                "Milvus error {}: {}",
                code, message
            )));
        }

        Ok(payload)
    }

    async fn has_collection(&self) -> Result<bool, RagError> {
        let payload = self
            .post("collections/has", json!({ "collectionName": self.collection }))
            .await?;
        Ok(payload["data"]["has"].as_bool().unwrap_or(false))
    }

    async fn create_collection(&self) -> Result<(), RagError> {
        let body = json!({
            "collectionName": self.collection,
            "schema": {
                "autoID": true,
                "enableDynamicField": false,
                "fields": [
                    {
                        "fieldName": "id",
                        "dataType": "Int64",
                        "isPrimary": true
                    },
                    {
                        "fieldName": "text",
                        "dataType": "VarChar",
                        "elementTypeParams": { "max_length": VARCHAR_MAX_LENGTH.to_string() }
                    },
                    {
                        "fieldName": "embedding",
                        "dataType": "FloatVector",
                        "elementTypeParams": { "dim": self.embedding_dim.to_string() }
                    }
                ]
            }
        });

        self.post("collections/create", body).await?;
        tracing::info!("Created Milvus collection '{}'", self.collection);
        Ok(())
    }

    async fn create_index(&self) -> Result<(), RagError> {
        let body = json!({
            "collectionName": self.collection,
            "indexParams": [
                {
                    "fieldName": "embedding",
                    "indexName": "embedding",
                    "metricType": "L2",
                    "indexType": "IVF_FLAT",
                    "params": { "nlist": 128 }
                }
            ]
        });

        self.post("indexes/create", body).await?;
        tracing::info!("Created vector index on '{}'", self.collection);
        Ok(())
    }

    async fn load_collection(&self) -> Result<(), RagError> {
        self.post("collections/load", json!({ "collectionName": self.collection }))
            .await?;
        Ok(())
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
        self.llm.embed(inputs, &self.embed_model).await
    }
}

#[async_trait]
impl VectorStore for MilvusStore {
    async fn ensure_ready(&self) -> Result<(), RagError> {
        if self.has_collection().await? {
            tracing::info!("Milvus collection '{}' already exists", self.collection);
        } else {
            self.create_collection().await?;
        }
        self.create_index().await?;
        Ok(())
    }

    async fn insert(&self, chunks: Vec<String>) -> Result<(), RagError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let embeddings = self.embed(&chunks).await?;

        let data: Vec<Value> = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(text, embedding)| json!({ "text": text, "embedding": embedding }))
            .collect();

        let inserted = data.len();
        self.post(
            "entities/insert",
            json!({ "collectionName": self.collection, "data": data }),
        )
        .await?;

        tracing::info!("Inserted {} chunks into '{}'", inserted, self.collection);
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedItem>, RagError> {
        // Milvus requires the collection to be loaded before the first search.
        self.load_collection().await?;

        let query_embedding = self.embed(std::slice::from_ref(&query.to_string())).await?;
        let query_embedding = query_embedding
            .into_iter()
            .next()
            .ok_or_else(|| RagError::Llm("embedding provider returned no vector".to_string()))?;

        let body = json!({
            "collectionName": self.collection,
            "data": [query_embedding],
            "annsField": "embedding",
            "limit": top_k,
            "outputFields": ["text"],
            "searchParams": {
                "metricType": "L2",
                "params": { "nprobe": 10 }
            }
        });

        let payload = self.post("entities/search", body).await?;

        let mut items = Vec::new();
        if let Some(hits) = payload["data"].as_array() {
            for hit in hits {
                items.push(RetrievedItem {
                    id: hit["id"].as_i64().unwrap_or_default(),
                    text: hit["text"].as_str().unwrap_or_default().to_string(),
                    score: hit["distance"].as_f64().unwrap_or_default() as f32,
                });
            }
        }

        Ok(items)
    }

    async fn drop_collection(&self) -> Result<(), RagError> {
        if !self.has_collection().await? {
            return Ok(());
        }
        self.post("collections/drop", json!({ "collectionName": self.collection }))
            .await?;
        tracing::info!("Dropped Milvus collection '{}'", self.collection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::OllamaProvider;

    fn test_store() -> MilvusStore {
        let llm = Arc::new(OllamaProvider::new("http://localhost:11434".to_string()));
        MilvusStore::new(
            "http://localhost:19530/".to_string(),
            "documents".to_string(),
            384,
            "all-minilm".to_string(),
            llm,
        )
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let store = test_store();
        assert_eq!(store.base_url, "http://localhost:19530");
    }

    #[tokio::test]
    #[ignore]
    async fn live_milvus_roundtrip() {
        let store = test_store();

        store.ensure_ready().await.expect("setup failed");
        store
            .insert(vec!["the sky is blue".to_string()])
            .await
            .expect("insert failed");

        let items = store.search("sky color", 3).await.expect("search failed");
        assert!(!items.is_empty());
        println!("top hit: {} (score {})", items[0].text, items[0].score);
    }
}
