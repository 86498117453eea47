//! RAG pipeline orchestrator.
//!
//! Owns the end-to-end flow: `add_documents` chunks raw text and forwards it
//! to the vector store; `ask` retrieves the most similar chunks, grounds a
//! prompt on them and packages the generated answer together with its
//! sources. `ask` never returns an error — failures come back as a
//! well-formed `QueryResult` with the detail in the `answer` field.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::chunker;
use super::store::{RetrievedItem, VectorStore};
use crate::config::Config;
use crate::core::errors::RagError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

const SYSTEM_PROMPT: &str = "Eres un asistente útil que responde preguntas basándose en el contexto proporcionado. Si la información no está en el contexto, indícalo claramente.";

const NO_CONTEXT_ANSWER: &str =
    "No se encontró información relevante para responder tu pregunta.";

/// Source previews in query results are capped at this many characters.
const SOURCE_PREVIEW_CHARS: usize = 200;

/// A retrieved chunk as surfaced to the caller: preview text plus the raw
/// ranking score from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub text: String,
    pub score: f32,
}

/// Result of a single `ask` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

pub struct RagPipeline {
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
    config: Config,
}

impl RagPipeline {
    pub fn new(store: Arc<dyn VectorStore>, llm: Arc<dyn LlmProvider>, config: Config) -> Self {
        Self { store, llm, config }
    }

    /// Idempotent storage setup: collection plus vector index.
    pub async fn setup(&self) -> Result<(), RagError> {
        self.store.ensure_ready().await?;
        tracing::info!("Vector store ready");
        Ok(())
    }

    /// Chunk each document and bulk-insert the flattened sequence.
    ///
    /// Returns the number of chunks forwarded to the store. Storage failures
    /// propagate unchanged; there is no partial-insert bookkeeping here.
    pub async fn add_documents(&self, documents: &[String]) -> Result<usize, RagError> {
        let mut chunks = Vec::new();
        for doc in documents {
            chunks.extend(chunker::split(
                doc,
                self.config.chunk_size,
                self.config.chunk_overlap,
            ));
        }

        let count = chunks.len();
        self.store.insert(chunks).await?;

        tracing::info!("Added {} document chunks", count);
        Ok(count)
    }

    /// Answer a question from the stored documents.
    ///
    /// Never returns an error: retrieval or generation failures produce a
    /// degraded result whose `answer` carries the failure text.
    pub async fn ask(&self, question: &str, top_k: usize) -> QueryResult {
        if let Err(err) = validate_query(question, top_k) {
            tracing::warn!("Rejected query: {}", err);
            return error_result(question, &err);
        }

        match self.retrieve_and_generate(question, top_k).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("RAG query failed: {}", err);
                error_result(question, &err)
            }
        }
    }

    async fn retrieve_and_generate(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<QueryResult, RagError> {
        let items = self.store.search(question, top_k).await?;
        tracing::info!("Retrieved {} relevant chunks", items.len());

        if items.is_empty() {
            return Ok(QueryResult {
                question: question.to_string(),
                answer: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let answer = self.generate_answer(question, &items).await?;

        let sources = items
            .iter()
            .map(|item| SourceRef {
                text: truncate_preview(&item.text),
                score: item.score,
            })
            .collect();

        Ok(QueryResult {
            question: question.to_string(),
            answer,
            sources,
        })
    }

    async fn generate_answer(
        &self,
        question: &str,
        items: &[RetrievedItem],
    ) -> Result<String, RagError> {
        let context = build_context(items);
        let prompt = build_prompt(&context, question);

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_sampling(self.config.temperature, self.config.max_tokens);

        let answer = self.llm.chat(request, &self.config.chat_model).await?;
        Ok(answer.trim().to_string())
    }

    /// Drop all stored chunks and re-run the storage setup.
    pub async fn reset(&self) -> Result<(), RagError> {
        self.store.drop_collection().await?;
        self.store.ensure_ready().await?;
        tracing::info!("Vector store reset");
        Ok(())
    }
}

fn validate_query(question: &str, top_k: usize) -> Result<(), RagError> {
    if question.trim().is_empty() {
        return Err(RagError::BadRequest("la pregunta está vacía".to_string()));
    }
    if top_k == 0 {
        return Err(RagError::BadRequest("top_k debe ser mayor que cero".to_string()));
    }
    Ok(())
}

fn error_result(question: &str, err: &RagError) -> QueryResult {
    QueryResult {
        question: question.to_string(),
        answer: format!("Error procesando la consulta: {}", err),
        sources: Vec::new(),
    }
}

/// Join retrieved texts in rank order, blank line between chunks.
fn build_context(items: &[RetrievedItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Basándote en el siguiente contexto, responde a la pregunta de manera precisa y detallada.\n\n\
         Contexto:\n{}\n\n\
         Pregunta: {}\n\n\
         Respuesta:",
        context, question
    )
}

/// Cap a source preview at `SOURCE_PREVIEW_CHARS` characters, appending an
/// ellipsis marker when something was cut off.
fn truncate_preview(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(SOURCE_PREVIEW_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
