//! Retrieval-Augmented Generation pipeline over Milvus and Ollama.
//!
//! Documents are split into overlapping chunks, embedded and stored in a
//! Milvus collection; questions are answered by retrieving the most similar
//! chunks and grounding an Ollama chat completion on them.

pub mod config;
pub mod core;
pub mod llm;
pub mod rag;

pub use crate::config::Config;
pub use crate::core::errors::RagError;
pub use crate::llm::{LlmProvider, OllamaProvider};
pub use crate::rag::{MilvusStore, QueryResult, RagPipeline, VectorStore};
