use anyhow::{anyhow, Result};
use std::sync::Mutex;

use crate::models::market::WatchlistEntry;
use crate::services::ai_service::TextGenerator;
use crate::services::market_data::MarketDataService;
use crate::services::refresh::{RefreshGeneration, Versioned};

/// 内存中的自选股列表（不落盘）
pub struct WatchlistStore {
    entries: Mutex<Vec<WatchlistEntry>>,
    /// 刷新串行化，避免两次合并互相覆盖
    refresh_lock: tokio::sync::Mutex<()>,
    generation: RefreshGeneration,
}

impl WatchlistStore {
    pub fn new(seed: Vec<WatchlistEntry>) -> Self {
        Self {
            entries: Mutex::new(seed),
            refresh_lock: tokio::sync::Mutex::new(()),
            generation: RefreshGeneration::new(),
        }
    }

    pub fn entries(&self) -> Vec<WatchlistEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.name).collect()
    }

    /// 追加占位条目，行情由下一次刷新补齐
    pub fn add(&self, code: &str) -> Result<WatchlistEntry> {
        let code = code.trim();
        if code.is_empty() {
            return Err(anyhow!("股票代码不能为空"));
        }
        let mut entries = self.entries.lock().map_err(|_| anyhow!("自选股列表不可用"))?;
        if entries.iter().any(|e| e.code == code) {
            return Err(anyhow!("{} 已在自选股中", code));
        }
        let entry = WatchlistEntry::placeholder(code);
        entries.push(entry.clone());
        Ok(entry)
    }

    pub fn remove(&self, code: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|e| e.code != code);
                entries.len() != before
            }
            Err(_) => false,
        }
    }

    /// 把刷新结果按 code 写回当前列表；刷新期间用户新增/删除的条目不受影响
    pub fn apply_refresh(&self, refreshed: &[WatchlistEntry]) {
        if let Ok(mut entries) = self.entries.lock() {
            for entry in entries.iter_mut() {
                if let Some(updated) = refreshed.iter().find(|r| r.code == entry.code) {
                    *entry = updated.clone();
                }
            }
        }
    }

    /// 拉取最新行情并写回，返回刷新后的完整列表
    pub async fn refresh<G: TextGenerator>(&self, market: &MarketDataService<G>) -> Versioned<Vec<WatchlistEntry>> {
        let _guard = self.refresh_lock.lock().await;
        let token = self.generation.begin();
        let snapshot = self.entries();
        let refreshed = market.get_watchlist_data(&snapshot).await;
        if self.generation.is_latest(token) {
            self.apply_refresh(&refreshed);
        }
        Versioned {
            generation: token,
            data: self.entries(),
        }
    }
}
