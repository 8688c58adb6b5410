use tauri::State;

use crate::models::market::WatchlistEntry;
use crate::services::refresh::Versioned;
use crate::AppState;

#[tauri::command]
pub async fn get_watchlist(
    state: State<'_, AppState>,
) -> Result<Vec<WatchlistEntry>, String> {
    Ok(state.watchlist.entries())
}

#[tauri::command]
pub async fn refresh_watchlist(
    state: State<'_, AppState>,
) -> Result<Versioned<Vec<WatchlistEntry>>, String> {
    Ok(state.watchlist.refresh(state.market.as_ref()).await)
}

/// 立即追加占位条目，前端随后调用 refresh_watchlist 补齐行情
#[tauri::command]
pub async fn add_watchlist_stock(
    state: State<'_, AppState>,
    code: String,
) -> Result<Vec<WatchlistEntry>, String> {
    let entry = state.watchlist.add(&code).map_err(|e| e.to_string())?;
    log::info!("添加自选股: {}", entry.code);
    Ok(state.watchlist.entries())
}

#[tauri::command]
pub async fn remove_watchlist_stock(
    state: State<'_, AppState>,
    code: String,
) -> Result<Vec<WatchlistEntry>, String> {
    if !state.watchlist.remove(&code) {
        return Err(format!("{} 不在自选股中", code));
    }
    Ok(state.watchlist.entries())
}
