use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json::{f64_or_zero, string_list, string_or_empty};

/// 明日机会类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityCategory {
    /// 短线：热点题材、连板、资金活跃
    #[serde(rename = "short")]
    Short,
    /// 形态：技术突破
    #[serde(rename = "pattern")]
    Pattern,
    /// 长线：低估值、高股息、政策支持
    #[serde(rename = "long")]
    Long,
}

impl OpportunityCategory {
    pub const ALL: [OpportunityCategory; 3] = [
        OpportunityCategory::Short,
        OpportunityCategory::Pattern,
        OpportunityCategory::Long,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "short" => Some(OpportunityCategory::Short),
            "pattern" => Some(OpportunityCategory::Pattern),
            "long" => Some(OpportunityCategory::Long),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    #[serde(rename = "type")]
    pub category: OpportunityCategory,
    pub stock_name: String,
    pub stock_code: String,
    pub description: String,
    /// 0-100 置信度，不做强制截断
    pub score: f64,
    pub tags: Vec<String>,
}

impl Opportunity {
    /// 类别无法识别的记录无法归入任何面板，直接丢弃
    pub fn from_record(item: &Value) -> Option<Self> {
        let category = OpportunityCategory::parse(&string_or_empty(item, "type"))?;
        Some(Self {
            id: String::new(),
            category,
            stock_name: string_or_empty(item, "stockName"),
            stock_code: string_or_empty(item, "stockCode"),
            description: string_or_empty(item, "description"),
            score: f64_or_zero(item, "score"),
            tags: string_list(item, "tags"),
        })
    }
}
