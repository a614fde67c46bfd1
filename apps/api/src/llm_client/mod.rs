/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All LLM interactions MUST go through this module.
///
/// One request per call. Failures are returned to the caller as-is; there is no
/// retry loop and no backoff.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls. Hardcoded to prevent drift.
pub const MODEL: &str = "gpt-4o";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM response did not contain a call to function '{0}'")]
    MissingFunctionCall(String),
}

/// A function the model is forced to call; its JSON-schema `parameters`
/// describe the structured output.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<ToolSpec<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolSpec<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a FunctionSpec<'a>,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolChoiceFunction<'a>,
}

#[derive(Debug, Serialize)]
struct ToolChoiceFunction<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, as produced by the model.
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Arguments of the first call to `name` in the first choice.
    pub fn function_arguments(&self, name: &str) -> Option<&str> {
        self.choices
            .first()?
            .message
            .tool_calls
            .iter()
            .find(|call| call.function.name == name)
            .map(|call| call.function.arguments.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_api_url(api_key, OPENAI_API_URL.to_string())
    }

    /// Points the client at a different chat-completions endpoint.
    pub fn with_api_url(api_key: String, api_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            api_url,
        })
    }

    /// Sends one chat-completion request that forces a call to `function`.
    pub async fn call_function(
        &self,
        system: &str,
        prompt: &str,
        function: &FunctionSpec<'_>,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            tools: vec![ToolSpec {
                kind: "function",
                function,
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: function.name,
                },
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Calls the model with a forced function call and deserializes its arguments.
    pub async fn call_structured<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
        function: &FunctionSpec<'_>,
    ) -> Result<T, LlmError> {
        let response = self.call_function(system, prompt, function).await?;
        let arguments = response
            .function_arguments(function.name)
            .ok_or_else(|| LlmError::MissingFunctionCall(function.name.to_string()))?;
        serde_json::from_str(arguments).map_err(LlmError::Parse)
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<OpenAiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_from_openai_error_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(upstream_message(body), "Incorrect API key provided");
    }

    #[test]
    fn test_upstream_message_falls_back_to_raw_body() {
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_function_arguments_picks_named_call() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": null, "tool_calls": [
                {"id": "call_1", "type": "function", "function": {"name": "other", "arguments": "{}"}},
                {"id": "call_2", "type": "function", "function": {"name": "extract_details", "arguments": "{\"name\":\"Ada\"}"}}
            ]}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.function_arguments("extract_details"),
            Some("{\"name\":\"Ada\"}")
        );
    }

    #[test]
    fn test_function_arguments_missing_when_model_answers_in_text() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "hi"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.function_arguments("extract_details"), None);
    }

    #[test]
    fn test_request_forces_named_function() {
        let function = FunctionSpec {
            name: "extract_details",
            description: "d",
            parameters: serde_json::json!({"type": "object"}),
        };
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "x",
            }],
            tools: vec![ToolSpec {
                kind: "function",
                function: &function,
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: function.name,
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["tools"][0]["function"]["name"], "extract_details");
        assert_eq!(value["tool_choice"]["function"]["name"], "extract_details");
    }
}
