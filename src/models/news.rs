use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json::{string_list, string_or_empty};

/// 情绪倾向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sentiment {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "negative")]
    Negative,
    #[default]
    #[serde(rename = "neutral")]
    Neutral,
}

impl Sentiment {
    /// 无法识别的取值一律按中性处理
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" | "利好" => Sentiment::Positive,
            "negative" | "利空" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// AI 检索整理的快讯条目，每次拉取整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// 关联股票名称
    pub related_stocks: Vec<String>,
    pub sentiment: Sentiment,
    /// 发布时间，模型按 "HH:MM" 给出
    pub timestamp: String,
}

impl NewsItem {
    pub fn from_record(item: &Value) -> Self {
        let id = string_or_empty(item, "id");
        Self {
            id: if id.is_empty() { uuid::Uuid::new_v4().to_string() } else { id },
            title: string_or_empty(item, "title"),
            summary: string_or_empty(item, "summary"),
            related_stocks: string_list(item, "relatedStocks"),
            sentiment: Sentiment::parse(&string_or_empty(item, "sentiment")),
            timestamp: string_or_empty(item, "timestamp"),
        }
    }
}
