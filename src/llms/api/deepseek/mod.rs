pub mod completion;

use super::{
    client::ApiClient,
    config::{ApiConfig, ApiConfigTrait, LlmApiConfigTrait},
};
use crate::classify::{prompt::classification_prompt, ClassifyError, KeywordClassifier};
use completion::{DeepSeekCompletionRequest, DeepSeekCompletionResponse};
use reqwest::header::HeaderMap;

/// Default API base url
pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com";
pub const DEEPSEEK_API_KEY_ENV_VAR: &str = "DEEPSEEK_API_KEY";
/// DeepSeek-R1
pub const DEEPSEEK_REASONER: &str = "deepseek-reasoner";

pub struct DeepSeekBackend {
    pub(crate) client: ApiClient<DeepSeekConfig>,
}

impl DeepSeekBackend {
    /// Fails if no api key is given and none can be loaded from the environment.
    pub fn new(mut config: DeepSeekConfig) -> crate::Result<Self> {
        config.api_config.api_key = Some(config.api_config.load_api_key()?);
        crate::info!(
            "Using model {} at {}",
            config.model_id,
            config.api_config.base_url
        );
        Ok(Self {
            client: ApiClient::new(config),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.client.config.model_id
    }

    pub(crate) async fn completion_request(
        &self,
        prompt: String,
    ) -> crate::Result<DeepSeekCompletionResponse, ClassifyError> {
        let config = &self.client.config;
        let request = DeepSeekCompletionRequest::new(&config.model_id, prompt, config.temperature);
        Ok(self
            .client
            .post(&config.completion_path, request)
            .await?)
    }
}

impl KeywordClassifier for DeepSeekBackend {
    async fn classify(&self, batch: &[String]) -> Result<String, ClassifyError> {
        let res = self.completion_request(classification_prompt(batch)).await?;
        if let Some(usage) = &res.usage {
            crate::debug!(
                "Token usage: prompt {} completion {} total {}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        res.first_content()
    }
}

#[derive(Clone, Debug)]
pub struct DeepSeekConfig {
    pub api_config: ApiConfig,
    pub model_id: String,
    pub temperature: f32,
    pub completion_path: String,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_config: ApiConfig {
                base_url: DEEPSEEK_API_BASE.to_string(),
                api_key: None,
                api_key_env_var: DEEPSEEK_API_KEY_ENV_VAR.to_string(),
            },
            model_id: DEEPSEEK_REASONER.to_string(),
            temperature: 0.0,
            completion_path: "/chat/completions".to_string(),
        }
    }
}

impl DeepSeekConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model<S: Into<String>>(mut self, model_id: S) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_completion_path<S: Into<String>>(mut self, path: S) -> Self {
        self.completion_path = path.into();
        self
    }
}

impl ApiConfigTrait for DeepSeekConfig {
    fn headers(&self) -> HeaderMap {
        self.api_config.bearer_headers()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_config.base_url, path)
    }
}

impl LlmApiConfigTrait for DeepSeekConfig {
    fn api_base_config_mut(&mut self) -> &mut ApiConfig {
        &mut self.api_config
    }

    fn api_config(&self) -> &ApiConfig {
        &self.api_config
    }
}
