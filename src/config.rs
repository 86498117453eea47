//! Environment-driven configuration.
//!
//! Every knob can be overridden through environment variables; defaults
//! match a local Milvus standalone + Ollama setup.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Milvus HTTP v2 endpoint (proxy port).
    pub milvus_url: String,
    /// Base URL of the Ollama server.
    pub ollama_url: String,
    /// Chat model used to generate answers.
    pub chat_model: String,
    /// Embedding model used when inserting and searching chunks.
    pub embed_model: String,
    /// Output dimension of the embedding model.
    pub embedding_dim: usize,
    /// Milvus collection holding the document chunks.
    pub collection: String,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Sampling temperature for answer generation.
    pub temperature: f64,
    /// Maximum number of generated tokens per answer.
    pub max_tokens: i32,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            milvus_url: "http://localhost:19530".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            chat_model: "qwen3:4b".to_string(),
            embed_model: "all-minilm".to_string(),
            embedding_dim: 384,
            collection: "documents".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            temperature: 0.7,
            max_tokens: 500,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let milvus_host = env_or("MILVUS_HOST", "localhost");
        let milvus_port = env_or("MILVUS_PORT", "19530");
        let ollama_host = env_or("OLLAMA_HOST", "localhost");
        let ollama_port = env_or("OLLAMA_PORT", "11434");

        Self {
            milvus_url: format!("http://{}:{}", milvus_host, milvus_port),
            ollama_url: format!("http://{}:{}", ollama_host, ollama_port),
            chat_model: env_or("OLLAMA_MODEL", &defaults.chat_model),
            embed_model: env_or("OLLAMA_EMBED_MODEL", &defaults.embed_model),
            embedding_dim: env_parsed("EMBEDDING_DIM", defaults.embedding_dim),
            collection: env_or("MILVUS_COLLECTION", &defaults.collection),
            chunk_size: env_parsed("CHUNK_SIZE", defaults.chunk_size),
            chunk_overlap: env_parsed("CHUNK_OVERLAP", defaults.chunk_overlap),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            log_dir: PathBuf::from(env_or("LOG_DIR", "logs")),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
