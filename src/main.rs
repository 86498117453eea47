use std::sync::Arc;

use milvus_rag::core::logging;
use milvus_rag::{Config, MilvusStore, OllamaProvider, RagPipeline};

const SAMPLE_DOCUMENTS: [&str; 3] = [
    "Python es un lenguaje de programación interpretado cuya filosofía hace \
     hincapié en la legibilidad de su código. Es un lenguaje multiparadigma, \
     dinámico y multiplataforma.",
    "Milvus es una base de datos vectorial de código abierto construida para \
     alimentar aplicaciones de inteligencia artificial. Ofrece almacenamiento, \
     indexación y gestión de embeddings vectoriales.",
    "RAG (Retrieval-Augmented Generation) combina la recuperación de \
     información con la generación de texto: recupera documentos relevantes y \
     los usa como contexto para generar respuestas fundamentadas.",
];

const SAMPLE_QUESTIONS: [&str; 3] = [
    "¿Qué es Python?",
    "¿Cómo funciona RAG?",
    "¿Para qué sirve Milvus?",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(&config.log_dir);

    let llm = Arc::new(OllamaProvider::new(config.ollama_url.clone()));
    let store = Arc::new(MilvusStore::new(
        config.milvus_url.clone(),
        config.collection.clone(),
        config.embedding_dim,
        config.embed_model.clone(),
        llm.clone(),
    ));
    let pipeline = RagPipeline::new(store, llm, config);

    pipeline.setup().await?;

    let documents: Vec<String> = SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()).collect();
    let count = pipeline.add_documents(&documents).await?;
    tracing::info!("Seeded {} chunks from {} sample documents", count, documents.len());

    for question in SAMPLE_QUESTIONS {
        let result = pipeline.ask(question, 5).await;

        println!("\nPregunta: {}", result.question);
        println!("Respuesta: {}", result.answer);
        for (i, source) in result.sources.iter().enumerate() {
            println!("  [{}] (score {:.4}) {}", i + 1, source.score, source.text);
        }
    }

    Ok(())
}
