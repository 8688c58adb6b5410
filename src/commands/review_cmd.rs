use tauri::State;

use crate::services::presentation::DailyReviewView;
use crate::AppState;

/// 每日复盘：涨停表已按连板数排序，附带炸板率
#[tauri::command]
pub async fn get_daily_review(
    state: State<'_, AppState>,
) -> Result<DailyReviewView, String> {
    let review = state.market.get_daily_review_data().await;
    Ok(DailyReviewView::from(review))
}
