use serde::{Deserialize, Serialize};

/// AI 服务商
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AiProvider {
    /// Google Gemini generateContent，联网检索走 google_search 工具
    #[default]
    #[serde(rename = "gemini")]
    Gemini,
    /// OpenAI 兼容的 chat/completions，联网检索走 enable_search 参数
    #[serde(rename = "openai")]
    OpenAiCompatible,
}

impl AiProvider {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai-compatible" | "openai_compatible" => AiProvider::OpenAiCompatible,
            _ => AiProvider::Gemini,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            AiProvider::OpenAiCompatible => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini-2.5-flash",
            AiProvider::OpenAiCompatible => "gpt-4o-mini",
        }
    }
}

/// AI 连接配置，启动时构建一次后注入到 AIService 与各个数据抓取器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub provider: AiProvider,
    pub base_url: String,
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub model_name: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AIConfig {
    fn default() -> Self {
        let provider = AiProvider::default();
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            api_key: String::new(),
            model_name: provider.default_model().to_string(),
            max_tokens: 8192,
            timeout_secs: 60,
        }
    }
}

impl AIConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 变量：API_KEY（或 GEMINI_API_KEY）、AI_PROVIDER、AI_BASE_URL、AI_MODEL、AI_TIMEOUT_SECS、AI_MAX_TOKENS
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = non_empty("AI_PROVIDER").map(|p| AiProvider::parse(&p)).unwrap_or_default();
        let defaults = Self::default();
        Self {
            provider,
            base_url: non_empty("AI_BASE_URL").unwrap_or_else(|| provider.default_base_url().to_string()),
            api_key: non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")).unwrap_or_default(),
            model_name: non_empty("AI_MODEL").unwrap_or_else(|| provider.default_model().to_string()),
            max_tokens: non_empty("AI_MAX_TOKENS").and_then(|v| v.parse().ok()).unwrap_or(defaults.max_tokens),
            timeout_secs: non_empty("AI_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// 单次生成请求参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    /// 是否开启联网检索
    pub search_enabled: bool,
    /// None = 使用服务端默认 temperature
    pub temperature: Option<f64>,
}

impl GenerateOptions {
    pub fn grounded(temperature: f64) -> Self {
        Self {
            search_enabled: true,
            temperature: Some(temperature),
        }
    }

    pub fn grounded_default() -> Self {
        Self {
            search_enabled: true,
            temperature: None,
        }
    }
}

/// 前端连接状态指示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub connected: bool,
    pub provider: AiProvider,
    pub model: String,
}

// ========== OpenAI 兼容 Chat Completion 数据结构 ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// 通义/DeepSeek 等兼容接口的联网检索开关
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_search: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: Option<ChatChoiceMessage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoiceMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ========== Gemini generateContent 数据结构 ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// 首个候选的全部文本片段拼接
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
