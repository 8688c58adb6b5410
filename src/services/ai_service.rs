use anyhow::{anyhow, Result};
use std::future::Future;

use crate::models::ai::*;
use crate::utils::http::build_ai_client;
use crate::utils::json::truncate_chars;

/// AI 文本生成边界：prompt 进，自由文本出
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, options: GenerateOptions) -> impl Future<Output = Result<String>> + Send;
}

pub struct AIService {
    config: AIConfig,
    client: reqwest::Client,
}

impl AIService {
    pub fn new(config: AIConfig) -> Result<Self> {
        let client = build_ai_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    pub fn status(&self) -> ApiStatus {
        ApiStatus {
            connected: self.is_configured(),
            provider: self.config.provider,
            model: self.config.model_name.clone(),
        }
    }

    async fn generate_gemini(&self, prompt: &str, options: GenerateOptions) -> Result<String> {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(prompt.to_string()) }],
            }],
            tools: options
                .search_enabled
                .then(|| vec![serde_json::json!({ "google_search": {} })]),
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: Some(self.config.max_tokens),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.model_name)
        );
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow!("AI API error ({}): {}", status, truncate_chars(&body, 300)));
        }

        let response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow!("AI response parse error: {} body: {}", e, truncate_chars(&body, 200)))?;
        Ok(response.text())
    }

    async fn generate_chat(&self, prompt: &str, options: GenerateOptions) -> Result<String> {
        let req = ChatCompletionRequest {
            model: self.config.model_name.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: Some(self.config.max_tokens),
            temperature: options.temperature,
            stream: Some(false),
            enable_search: options.search_enabled.then_some(true),
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow!("AI API error ({}): {}", status, truncate_chars(&body, 300)));
        }

        let response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow!("AI response parse error: {} body: {}", e, truncate_chars(&body, 200)))?;

        if let Some(usage) = &response.usage {
            log::debug!(
                "AI token usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(response
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone())
            .unwrap_or_default())
    }
}

impl TextGenerator for AIService {
    /// 未配置密钥时直接返回空文本，不发起网络请求
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> Result<String> {
        if !self.is_configured() {
            return Ok(String::new());
        }
        match self.config.provider {
            AiProvider::Gemini => self.generate_gemini(prompt, options).await,
            AiProvider::OpenAiCompatible => self.generate_chat(prompt, options).await,
        }
    }
}
