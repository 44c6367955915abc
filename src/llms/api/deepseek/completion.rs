use crate::classify::ClassifyError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Debug)]
pub struct DeepSeekCompletionRequest {
    /// ID of the model to use.
    pub model: String,

    /// Input messages. The classifier always sends a single `user` message.
    pub messages: Vec<CompletionRequestMessage>,

    /// Sampling temperature. Zero requests the least random output the service offers.
    pub temperature: f32,
}

impl DeepSeekCompletionRequest {
    pub fn new<S: Into<String>>(model: S, prompt: String, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages: vec![CompletionRequestMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct CompletionRequestMessage {
    pub role: String,
    pub content: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct DeepSeekCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct CompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: CompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct CompletionResponseMessage {
    #[serde(default)]
    pub role: String,
    pub content: Option<String>,
    /// Chain of thought returned by reasoning models. Logged, never parsed.
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl DeepSeekCompletionResponse {
    /// The trimmed content of the first choice.
    pub fn first_content(&self) -> Result<String, ClassifyError> {
        let choice = self.choices.first().ok_or(ClassifyError::NoChoices)?;
        if let Some(reasoning) = &choice.message.reasoning_content {
            crate::debug!("Model reasoning: {}", reasoning);
        }
        match choice.message.content.as_deref() {
            Some(content) => Ok(content.trim().to_string()),
            None => Err(ClassifyError::ResponseContentEmpty),
        }
    }
}
