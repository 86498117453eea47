//! RAG (Retrieval-Augmented Generation) module.
//!
//! This module provides:
//! - `chunker`: boundary-aware overlapping text splitter
//! - `RagPipeline`: orchestrates retrieve -> assemble context -> generate
//! - `VectorStore`: abstract retrieval backend, implemented by `MilvusStore`

pub mod chunker;
pub mod milvus;
pub mod pipeline;
pub mod store;

pub use milvus::MilvusStore;
pub use pipeline::{QueryResult, RagPipeline, SourceRef};
pub use store::{RetrievedItem, VectorStore};
