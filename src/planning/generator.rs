//! SubtaskGenerator - LLM-driven decomposition of a task into sub-steps
//!
//! One fixed instruction, one structured-output call, and a hard
//! fail-safe boundary: any failure (network, auth, quota, malformed body)
//! degrades to an empty list. Nothing here retries and nothing here
//! raises; the generator also holds no state between calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, Message, ResponseSchema};

const SYSTEM_PROMPT: &str = "You are a task planning assistant. Break tasks into small, \
     concrete steps a person can act on right away. Respond only with the requested structure.";

const MAX_OUTPUT_TOKENS: u32 = 1024;

/// LLM output schema for a breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubtaskOutput {
    /// A list of actionable steps for the main task
    subtasks: Vec<String>,
}

/// Turns one task's text into a short list of suggested sub-steps
pub struct SubtaskGenerator {
    llm: Arc<dyn LlmClient>,
}

impl SubtaskGenerator {
    /// Create a new generator over an LLM client
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Ask for 3-5 concise, actionable sub-tasks.
    ///
    /// Issues exactly one request; every failure path returns an empty
    /// list rather than an error.
    pub async fn generate(&self, task_text: &str) -> Vec<String> {
        debug!(%task_text, "generate: called");
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(format!(
                "Break down the following task into 3-5 concise, actionable sub-tasks: \"{}\"",
                task_text
            ))],
            response_schema: Some(subtask_schema()),
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        match self.llm.complete(request).await {
            Ok(response) => self.parse_response(response),
            Err(e) => {
                warn!(error = %e, "Subtask generation failed");
                Vec::new()
            }
        }
    }

    /// Extract the sub-task list: structured value first, then the text
    /// body parsed as JSON.
    fn parse_response(&self, response: CompletionResponse) -> Vec<String> {
        if let Some(value) = response.structured
            && let Ok(output) = serde_json::from_value::<SubtaskOutput>(value)
        {
            debug!(count = output.subtasks.len(), "generate: structured output");
            return output.subtasks;
        }

        if let Some(content) = response.content
            && let Ok(output) = serde_json::from_str::<SubtaskOutput>(&content)
        {
            debug!(count = output.subtasks.len(), "generate: parsed from content");
            return output.subtasks;
        }

        warn!("LLM did not produce a valid sub-task list");
        Vec::new()
    }
}

fn subtask_schema() -> ResponseSchema {
    ResponseSchema::new(
        "submit_subtasks",
        "Submit the sub-task breakdown. Call this once with all sub-tasks.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "subtasks": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "A list of actionable steps for the main task."
                }
            },
            "required": ["subtasks"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TokenUsage;
    use crate::llm::client::mock::MockLlmClient;

    fn structured_response(value: serde_json::Value) -> CompletionResponse {
        CompletionResponse {
            content: None,
            structured: Some(value),
            usage: TokenUsage::default(),
        }
    }

    fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            content: Some(text.to_string()),
            structured: None,
            usage: TokenUsage::default(),
        }
    }

    #[tokio::test]
    async fn test_generate_from_structured_output() {
        let llm = Arc::new(MockLlmClient::new(vec![structured_response(serde_json::json!({
            "subtasks": ["Book venue", "Send invites", "Order cake"]
        }))]));
        let generator = SubtaskGenerator::new(llm.clone());

        let subtasks = generator.generate("Plan a birthday party").await;
        assert_eq!(subtasks, vec!["Book venue", "Send invites", "Order cake"]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_parses_content_json() {
        let llm = Arc::new(MockLlmClient::new(vec![text_response(
            "{\"subtasks\": [\"Draft outline\", \"Write intro\"]}",
        )]));
        let generator = SubtaskGenerator::new(llm);

        let subtasks = generator.generate("Write a blog post").await;
        assert_eq!(subtasks, vec!["Draft outline", "Write intro"]);
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_empty() {
        let llm = Arc::new(MockLlmClient::new(vec![text_response("I cannot help with that")]));
        let generator = SubtaskGenerator::new(llm);

        assert!(generator.generate("Do a thing").await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_wrong_shape_is_empty() {
        // Well-formed JSON that violates the schema is treated as malformed
        let llm = Arc::new(MockLlmClient::new(vec![structured_response(serde_json::json!({
            "subtasks": [1, 2, 3]
        }))]));
        let generator = SubtaskGenerator::new(llm);

        assert!(generator.generate("Do a thing").await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_call_failure_is_empty() {
        // An exhausted mock fails the call outright
        let llm = Arc::new(MockLlmClient::new(vec![]));
        let generator = SubtaskGenerator::new(llm);

        assert!(generator.generate("Do a thing").await.is_empty());
    }
}
