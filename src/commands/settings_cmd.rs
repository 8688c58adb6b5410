use tauri::State;

use crate::models::ai::ApiStatus;
use crate::models::settings::AppSettings;
use crate::AppState;

#[tauri::command]
pub async fn get_settings(
    state: State<'_, AppState>,
) -> Result<AppSettings, String> {
    Ok(state.settings.clone())
}

/// 侧边栏连接状态指示
#[tauri::command]
pub async fn get_api_status(
    state: State<'_, AppState>,
) -> Result<ApiStatus, String> {
    Ok(state.market.fetcher().generator().status())
}
