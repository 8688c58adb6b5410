//! 模型输出 -> JSON
//!
//! 模型被要求只输出 JSON，但经常在前面加说明文字或包一层 markdown 代码块。
//! 这里做宽松处理：去掉代码块标记后，从第一个 `{` 或 `[` 开始截到文本末尾再解析。
//! 不做括号配对，完整 JSON 之后若还跟着说明文字，解析会失败并返回 None。

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::utils::json::truncate_chars;

const LOG_PREVIEW_CHARS: usize = 500;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("fence pattern is valid"))
}

/// 去掉 ``` / ```json 等代码块标记及首尾空白
pub fn strip_code_fences(text: &str) -> String {
    fence_pattern().replace_all(text, "").trim().to_string()
}

/// 解析模型输出；任何解析错误都只记日志并返回 None
pub fn parse_ai_json(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text);
    let candidate = match cleaned.find(|c: char| c == '{' || c == '[') {
        Some(start) => &cleaned[start..],
        None => cleaned.as_str(),
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!(
                "AI 返回内容无法解析为 JSON: {} 原文: {}",
                e,
                truncate_chars(text, LOG_PREVIEW_CHARS)
            );
            None
        }
    }
}

/// 期望顶层为数组
pub fn into_array(value: Option<Value>) -> Option<Vec<Value>> {
    match value? {
        Value::Array(items) => Some(items),
        other => {
            log::warn!("AI 返回结构不符：期望数组，实际为 {}", kind_of(&other));
            None
        }
    }
}

/// 期望顶层为对象
pub fn into_object(value: Option<Value>) -> Option<Map<String, Value>> {
    match value? {
        Value::Object(map) => Some(map),
        other => {
            log::warn!("AI 返回结构不符：期望对象，实际为 {}", kind_of(&other));
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
