// Path: crates/api/src/rewrite/http_adapter.rs

use async_trait::async_trait;
use poi_types::app::{RewriteCandidate, RewriteRequest, RewriteStyle};
use poi_types::error::RewriteError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::RewriteBackend;

/// A generic HTTP adapter for OpenAI-compatible chat-completion APIs.
///
/// This lets the kernel drive external models (GPT-4, Claude, vLLM, Ollama)
/// as the rewrite backend without depending on any one provider.
pub struct HttpRewriteBackend {
    client: Client,
    api_url: String,
    api_key: String,
    model_name: String,
    num_candidates: usize,
}

impl HttpRewriteBackend {
    /// Builds an adapter against the given endpoint.
    pub fn new(
        api_url: String,
        api_key: String,
        model_name: String,
        num_candidates: usize,
    ) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| RewriteError::Backend(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model_name,
            num_candidates: num_candidates.max(1),
        })
    }

    fn style_instruction(style: RewriteStyle) -> &'static str {
        match style {
            RewriteStyle::Formal => "formal business language",
            RewriteStyle::Diplomatic => "diplomatic, de-escalating language",
            RewriteStyle::Technical => "precise technical language",
            RewriteStyle::Marketing => "persuasive marketing language",
            RewriteStyle::DaoProposal => "the register of a DAO governance proposal",
        }
    }

    fn build_prompt(&self, request: &RewriteRequest) -> String {
        format!(
            "Rewrite the following message in {style}, for this audience: {audience}.\n\
             Produce exactly {n} alternatives.\n\
             Respond with ONLY a JSON array of objects, each with a \"text\" string \
             and a \"confidence\" number between 0 and 1.\n\n\
             Message:\n{message}",
            style = Self::style_instruction(request.style),
            audience = request.audience,
            n = self.num_candidates,
            message = request.message,
        )
    }
}

// --- OpenAI API Request/Response Structures ---

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// The shape each array element of the model's reply must parse into.
#[derive(Deserialize)]
struct RawCandidate {
    text: String,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

fn default_confidence() -> f32 {
    0.5
}

#[async_trait]
impl RewriteBackend for HttpRewriteBackend {
    async fn generate(
        &self,
        request: &RewriteRequest,
    ) -> Result<Vec<RewriteCandidate>, RewriteError> {
        let request_body = ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: self.build_prompt(request),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RewriteError::Backend(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(RewriteError::Backend(format!("API error: {}", error_text)));
        }

        let response_body: ChatCompletionResponse = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| RewriteError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

        let content = response_body
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| RewriteError::MalformedResponse("No choices returned".into()))?;

        // Models occasionally wrap the array in a markdown fence; strip it
        // before parsing.
        let trimmed = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        let raw: Vec<RawCandidate> = serde_json::from_str(trimmed).map_err(|e| {
            RewriteError::MalformedResponse(format!("Reply was not a candidate array: {}", e))
        })?;

        if raw.is_empty() {
            return Err(RewriteError::EmptyCandidateSet);
        }

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(i, c)| RewriteCandidate {
                index: i as u32,
                text: c.text,
                confidence: c.confidence.clamp(0.0, 1.0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_style_audience_and_count() {
        let backend = HttpRewriteBackend::new(
            "http://localhost:11434/v1/chat/completions".into(),
            "unused".into(),
            "test-model".into(),
            3,
        )
        .unwrap();
        let prompt = backend.build_prompt(&RewriteRequest {
            message: "hello".into(),
            style: RewriteStyle::Diplomatic,
            audience: "the board".into(),
        });
        assert!(prompt.contains("diplomatic"));
        assert!(prompt.contains("the board"));
        assert!(prompt.contains("exactly 3"));
    }
}
