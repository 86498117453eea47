//! VectorStore trait — abstract interface for the retrieval backend.
//!
//! Provides a clean abstraction over vector databases for the RAG pipeline.
//! The primary implementation is `MilvusStore` in the `milvus` module; tests
//! substitute in-memory mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::RagError;

/// A chunk returned by a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedItem {
    /// Backend-assigned identifier of the stored chunk.
    pub id: i64,
    /// The text content of the chunk.
    pub text: String,
    /// Ranking signal as reported by the backend (L2 distance for Milvus,
    /// lower = more similar). Passed through unmodified.
    pub score: f32,
}

/// Abstract trait for the vector storage backend.
///
/// The embedding step is internal to implementations; callers only ever see
/// raw text in and ranked text out.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Idempotent setup: create the collection and its index if missing.
    async fn ensure_ready(&self) -> Result<(), RagError>;

    /// Bulk-insert chunks. All-or-nothing from the caller's perspective.
    async fn insert(&self, chunks: Vec<String>) -> Result<(), RagError>;

    /// Return the `top_k` chunks most similar to `query`.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedItem>, RagError>;

    /// Drop the collection and everything in it. Safe when nothing exists.
    async fn drop_collection(&self) -> Result<(), RagError>;
}
