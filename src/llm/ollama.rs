use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::RagError;

#[derive(Clone)]
pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn health_check(&self) -> Result<bool, RagError> {
        let url = format!("{}/api/tags", self.base_url);
        let res = self.client.get(&url).send().await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, RagError> {
        let url = format!("{}/api/chat", self.base_url);

        let mut body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": false,
        });

        let mut options = serde_json::Map::new();
        if let Some(t) = request.temperature {
            options.insert("temperature".to_string(), json!(t));
        }
        if let Some(n) = request.max_tokens {
            options.insert("num_predict".to_string(), json!(n));
        }
        if !options.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("options".to_string(), Value::Object(options));
            }
        }

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(RagError::llm)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(RagError::Llm(format!("Ollama chat error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(RagError::llm)?;

        let content = payload["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        Ok(content)
    }

    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, RagError> {
        let url = format!("{}/api/embed", self.base_url);

        let body = json!({
            "model": model_id,
            "input": inputs,
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(RagError::llm)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(RagError::Llm(format!("Ollama embed error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(RagError::llm)?;

        let mut embeddings = Vec::new();
        if let Some(data) = payload["embeddings"].as_array() {
            for item in data {
                if let Some(vals) = item.as_array() {
                    let vec: Vec<f32> = vals
                        .iter()
                        .filter_map(|v| v.as_f64().map(|f| f as f32))
                        .collect();
                    embeddings.push(vec);
                }
            }
        }

        if embeddings.len() != inputs.len() {
            return Err(RagError::Llm(format!(
                "Ollama returned {} embeddings for {} inputs",
                embeddings.len(),
                inputs.len()
            )));
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let provider = OllamaProvider::new("http://localhost:11434/".to_string());
        assert_eq!(provider.base_url(), "http://localhost:11434");
    }

    #[tokio::test]
    #[ignore]
    async fn live_ollama_chat() {
        use crate::llm::types::ChatMessage;

        let provider = OllamaProvider::new("http://localhost:11434".to_string());
        let req = ChatRequest::new(vec![ChatMessage::user("Hello")]).with_sampling(0.7, 10);

        match provider.chat(req, "qwen3:4b").await {
            Ok(response) => println!("Ollama chat response: {}", response),
            Err(e) => panic!("Failed to chat with Ollama: {}", e),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn live_ollama_embed() {
        let provider = OllamaProvider::new("http://localhost:11434".to_string());
        let inputs = vec!["hello world".to_string()];

        match provider.embed(&inputs, "all-minilm").await {
            Ok(embeddings) => {
                assert_eq!(embeddings.len(), 1);
                println!("Embedding dim: {}", embeddings[0].len());
            }
            Err(e) => panic!("Failed to embed with Ollama: {}", e),
        }
    }
}
