use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json::{bool_or_false, f64_or_zero, record_list, string_or_empty, u32_or_zero};

/// 板块表现（涨幅榜/跌幅榜/资金流向榜）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPerformance {
    pub name: String,
    pub change: f64,
    pub net_inflow: f64, // 百万
}

impl SectorPerformance {
    pub fn from_record(item: &Value) -> Self {
        Self {
            name: string_or_empty(item, "name"),
            change: f64_or_zero(item, "change"),
            net_inflow: f64_or_zero(item, "netInflow"),
        }
    }
}

/// 涨停股
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitUpStock {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub sector: String,
    pub consecutive_days: u32, // 连板数
    pub reason: String,        // 涨停原因/概念
    pub is_broken: bool,       // 炸板
}

impl LimitUpStock {
    pub fn from_record(item: &Value) -> Self {
        Self {
            code: string_or_empty(item, "code"),
            name: string_or_empty(item, "name"),
            price: f64_or_zero(item, "price"),
            change_percent: f64_or_zero(item, "changePercent"),
            sector: string_or_empty(item, "sector"),
            consecutive_days: u32_or_zero(item, "consecutiveDays"),
            reason: string_or_empty(item, "reason"),
            is_broken: bool_or_false(item, "isBroken"),
        }
    }
}

/// 每日复盘统计。各列表可以为空，但始终存在
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReviewSnapshot {
    pub limit_up_count: u32,
    pub limit_up_broken_count: u32,
    pub limit_down_count: u32,
    #[serde(default)]
    pub top_sectors: Vec<SectorPerformance>,
    #[serde(default)]
    pub bottom_sectors: Vec<SectorPerformance>,
    #[serde(default)]
    pub inflow_sectors: Vec<SectorPerformance>,
    #[serde(default)]
    pub outflow_sectors: Vec<SectorPerformance>,
    #[serde(default)]
    pub limit_up_list: Vec<LimitUpStock>,
}

impl DailyReviewSnapshot {
    /// `stats` 对象 -> 快照；缺失的计数补 0，缺失的列表补空
    pub fn from_stats(stats: &Value) -> Self {
        Self {
            limit_up_count: u32_or_zero(stats, "limitUpCount"),
            limit_up_broken_count: u32_or_zero(stats, "limitUpBrokenCount"),
            limit_down_count: u32_or_zero(stats, "limitDownCount"),
            top_sectors: record_list(stats, "topSectors", SectorPerformance::from_record),
            bottom_sectors: record_list(stats, "bottomSectors", SectorPerformance::from_record),
            inflow_sectors: record_list(stats, "inflowSectors", SectorPerformance::from_record),
            outflow_sectors: record_list(stats, "outflowSectors", SectorPerformance::from_record),
            limit_up_list: record_list(stats, "limitUpList", LimitUpStock::from_record),
        }
    }
}

/// 复盘结果：统计 + AI 文字点评
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReview {
    pub data: DailyReviewSnapshot,
    pub analysis: String,
}

pub const REVIEW_UNAVAILABLE: &str = "API Unavailable";
pub const REVIEW_FAILED: &str = "无法获取市场复盘数据。";

impl DailyReview {
    pub fn unavailable() -> Self {
        Self {
            data: DailyReviewSnapshot::default(),
            analysis: REVIEW_UNAVAILABLE.to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            data: DailyReviewSnapshot::default(),
            analysis: REVIEW_FAILED.to_string(),
        }
    }
}
