use std::time::Duration;
use tauri::{AppHandle, Emitter, State};

use crate::AppState;

pub const EVENT_INDICES_UPDATED: &str = "market-indices-updated";
pub const EVENT_WATCHLIST_UPDATED: &str = "watchlist-updated";

/// 开启某个视图的定时刷新（indices / watchlist），结果通过事件推送
#[tauri::command]
pub async fn start_auto_refresh(
    state: State<'_, AppState>,
    app: AppHandle,
    view: String,
) -> Result<(), String> {
    match view.as_str() {
        "indices" => {
            let market = state.market.clone();
            let indices = state.indices.clone();
            let every = Duration::from_secs(state.settings.refresh.indices_secs);
            state.refresh_tasks.start("indices", every, move || {
                let market = market.clone();
                let indices = indices.clone();
                let app = app.clone();
                async move {
                    let result = indices.refresh(market.get_indices()).await;
                    if indices.is_latest(result.generation) {
                        if let Err(e) = app.emit(EVENT_INDICES_UPDATED, &result) {
                            log::warn!("推送指数刷新失败: {}", e);
                        }
                    }
                }
            });
        }
        "watchlist" => {
            let market = state.market.clone();
            let watchlist = state.watchlist.clone();
            let every = Duration::from_secs(state.settings.refresh.watchlist_secs);
            state.refresh_tasks.start("watchlist", every, move || {
                let market = market.clone();
                let watchlist = watchlist.clone();
                let app = app.clone();
                async move {
                    let result = watchlist.refresh(market.as_ref()).await;
                    if let Err(e) = app.emit(EVENT_WATCHLIST_UPDATED, &result) {
                        log::warn!("推送自选股刷新失败: {}", e);
                    }
                }
            });
        }
        other => return Err(format!("未知的刷新视图: {}", other)),
    }
    Ok(())
}

/// 视图卸载时取消定时刷新
#[tauri::command]
pub async fn stop_auto_refresh(
    state: State<'_, AppState>,
    view: String,
) -> Result<bool, String> {
    Ok(state.refresh_tasks.stop(&view))
}
