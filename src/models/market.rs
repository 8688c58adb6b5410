use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json::{f64_or_zero, opt_f64, opt_string, string_or_empty};

/// 大盘指数快照（每次拉取整体替换，code 为标识）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    pub name: String,
    pub code: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64, // 成交额（亿）
}

impl MarketIndex {
    pub fn new(name: &str, code: &str, value: f64, change: f64, change_percent: f64, volume: f64) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            value,
            change,
            change_percent,
            volume,
        }
    }

    /// 模型返回的单条记录，缺失字段补 0 / 空串
    pub fn from_record(item: &Value) -> Self {
        Self {
            name: string_or_empty(item, "name"),
            code: string_or_empty(item, "code"),
            value: f64_or_zero(item, "value"),
            change: f64_or_zero(item, "change"),
            change_percent: f64_or_zero(item, "changePercent"),
            volume: f64_or_zero(item, "volume"),
        }
    }
}

/// 四大指数兜底数据（AI 不可用或返回空时展示）
pub fn fallback_indices() -> Vec<MarketIndex> {
    vec![
        MarketIndex::new("上证指数", "000001", 3050.23, 12.4, 0.41, 4500.0),
        MarketIndex::new("深证成指", "399001", 9680.55, -15.2, -0.16, 5800.0),
        MarketIndex::new("创业板指", "399006", 1890.12, 5.6, 0.30, 2100.0),
        MarketIndex::new("科创50", "000688", 850.33, 8.1, 0.96, 980.0),
    ]
}

/// 自选股条目（用户维护，code 在列表内唯一）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub change_amount: f64,
    pub rate_of_change: f64, // 涨速
    pub volume: f64,         // 成交量（手）
    pub turnover: f64,       // 成交额（元）
    pub turnover_rate: f64,  // 换手率 %
    pub volume_ratio: f64,   // 量比
    pub market_cap: f64,     // 总市值（亿）
    pub sector: String,
    pub sector_change: f64,
}

impl WatchlistEntry {
    /// 用户刚添加、尚未刷新到行情的占位条目
    pub fn placeholder(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: code.to_string(),
            price: 0.0,
            change_percent: 0.0,
            change_amount: 0.0,
            rate_of_change: 0.0,
            volume: 0.0,
            turnover: 0.0,
            turnover_rate: 0.0,
            volume_ratio: 0.0,
            market_cap: 0.0,
            sector: "加载中...".to_string(),
            sector_change: 0.0,
        }
    }

    pub fn matches(&self, quote: &WatchlistQuote) -> bool {
        quote.code.as_deref() == Some(self.code.as_str())
            || quote.name.as_deref() == Some(self.name.as_str())
    }

    /// 将行情覆盖到已有条目上：只覆盖模型实际给出的字段，code 保持不变
    pub fn overlay(&self, quote: &WatchlistQuote) -> Self {
        let mut merged = self.clone();
        if let Some(name) = quote.name.as_ref().filter(|n| !n.is_empty()) {
            merged.name = name.clone();
        }
        if let Some(sector) = quote.sector.as_ref().filter(|s| !s.is_empty()) {
            merged.sector = sector.clone();
        }
        let numeric = [
            (&mut merged.price, quote.price),
            (&mut merged.change_percent, quote.change_percent),
            (&mut merged.change_amount, quote.change_amount),
            (&mut merged.rate_of_change, quote.rate_of_change),
            (&mut merged.volume, quote.volume),
            (&mut merged.turnover, quote.turnover),
            (&mut merged.turnover_rate, quote.turnover_rate),
            (&mut merged.volume_ratio, quote.volume_ratio),
            (&mut merged.market_cap, quote.market_cap),
            (&mut merged.sector_change, quote.sector_change),
        ];
        for (slot, value) in numeric {
            if let Some(v) = value {
                *slot = v;
            }
        }
        merged
    }
}

/// AI 返回的自选股行情：字段可能缺失，保留 Option 以便合并时区分“没给”和“给了 0”
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistQuote {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
    pub change_amount: Option<f64>,
    pub rate_of_change: Option<f64>,
    pub volume: Option<f64>,
    pub turnover: Option<f64>,
    pub turnover_rate: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub market_cap: Option<f64>,
    pub sector: Option<String>,
    pub sector_change: Option<f64>,
}

impl WatchlistQuote {
    pub fn from_record(item: &Value) -> Self {
        Self {
            code: opt_string(item, "code"),
            name: opt_string(item, "name"),
            price: opt_f64(item, "price"),
            change_percent: opt_f64(item, "changePercent"),
            change_amount: opt_f64(item, "changeAmount"),
            rate_of_change: opt_f64(item, "rateOfChange"),
            volume: opt_f64(item, "volume"),
            turnover: opt_f64(item, "turnover"),
            turnover_rate: opt_f64(item, "turnoverRate"),
            volume_ratio: opt_f64(item, "volumeRatio"),
            market_cap: opt_f64(item, "marketCap"),
            sector: opt_string(item, "sector"),
            sector_change: opt_f64(item, "sectorChange"),
        }
    }
}

/// 拉取行情时发给 AI 的查询键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuery {
    pub code: String,
    pub name: String,
}

impl From<&WatchlistEntry> for StockQuery {
    fn from(entry: &WatchlistEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
        }
    }
}
