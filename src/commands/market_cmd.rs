use serde::Serialize;
use tauri::State;

use crate::models::market::MarketIndex;
use crate::models::news::NewsItem;
use crate::services::refresh::Versioned;
use crate::services::scheduler::{MarketStatus, TradingScheduler};
use crate::AppState;

/// 四大指数（失败时为兜底数据）
#[tauri::command]
pub async fn get_indices(
    state: State<'_, AppState>,
) -> Result<Versioned<Vec<MarketIndex>>, String> {
    Ok(state.indices.refresh(state.market.get_indices()).await)
}

/// 最近一次成功写回的指数，视图挂载时先展示
#[tauri::command]
pub async fn get_cached_indices(
    state: State<'_, AppState>,
) -> Result<Option<Versioned<Vec<MarketIndex>>>, String> {
    Ok(state.indices.get())
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub indices: Versioned<Vec<MarketIndex>>,
    pub news: Vec<NewsItem>,
}

/// 行情监控页：指数与快讯并发拉取，互不等待
#[tauri::command]
pub async fn get_overview(
    state: State<'_, AppState>,
) -> Result<Overview, String> {
    let names = state.watchlist.names();
    let (indices, news) = futures::join!(
        state.indices.refresh(state.market.get_indices()),
        state.market.get_news(&names),
    );
    Ok(Overview { indices, news })
}

#[tauri::command]
pub fn get_market_status() -> MarketStatus {
    TradingScheduler::market_status()
}
