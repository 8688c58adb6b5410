use serde::{Deserialize, Serialize};
use super::market::WatchlistEntry;

/// 各视图自动刷新间隔
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshIntervals {
    #[serde(default = "default_indices_secs")]
    pub indices_secs: u64,
    #[serde(default = "default_watchlist_secs")]
    pub watchlist_secs: u64,
}

fn default_indices_secs() -> u64 { 15 }
fn default_watchlist_secs() -> u64 { 10 }
fn default_true() -> bool { true }

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            indices_secs: default_indices_secs(),
            watchlist_secs: default_watchlist_secs(),
        }
    }
}

/// 运行期设置（仅内存，不落盘）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub refresh: RefreshIntervals,
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
    /// 首次启动时的自选股
    #[serde(default = "default_watchlist")]
    pub default_watchlist: Vec<WatchlistEntry>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            refresh: RefreshIntervals::default(),
            auto_refresh: true,
            default_watchlist: default_watchlist(),
        }
    }
}

fn seed(
    code: &str,
    name: &str,
    quote: [f64; 10],
    sector: &str,
) -> WatchlistEntry {
    let [price, change_percent, change_amount, rate_of_change, volume, turnover, turnover_rate, volume_ratio, market_cap, sector_change] = quote;
    WatchlistEntry {
        code: code.to_string(),
        name: name.to_string(),
        price,
        change_percent,
        change_amount,
        rate_of_change,
        volume,
        turnover,
        turnover_rate,
        volume_ratio,
        market_cap,
        sector: sector.to_string(),
        sector_change,
    }
}

pub fn default_watchlist() -> Vec<WatchlistEntry> {
    vec![
        seed("600519", "贵州茅台", [1750.00, 0.5, 8.75, 0.02, 25000.0, 4375000000.0, 0.3, 1.1, 22000.0, 0.4], "白酒"),
        seed("300750", "宁德时代", [185.60, -1.2, -2.25, -0.1, 450000.0, 8352000000.0, 1.5, 0.8, 8500.0, -0.8], "电池"),
        seed("000001", "平安银行", [10.45, 1.2, 0.12, 0.1, 1200000.0, 1254000000.0, 0.8, 1.5, 2000.0, 0.9], "银行"),
        seed("601138", "工业富联", [25.88, 3.5, 0.88, 0.5, 890000.0, 2303320000.0, 3.2, 2.5, 5100.0, 2.1], "电子元件"),
    ]
}
