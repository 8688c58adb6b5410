use tauri::State;

use crate::models::news::NewsItem;
use crate::AppState;

/// 市场与自选股相关快讯；未指定股票时使用当前自选股名称
#[tauri::command]
pub async fn get_news(
    state: State<'_, AppState>,
    stock_names: Option<Vec<String>>,
) -> Result<Vec<NewsItem>, String> {
    let names = stock_names
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| state.watchlist.names());
    Ok(state.market.get_news(&names).await)
}
