use tauri::State;

use crate::models::opportunity::{Opportunity, OpportunityCategory};
use crate::services::presentation::{filter_by_category, OpportunityBoard};
use crate::AppState;

/// 明日机会，按短线/形态/长线分三栏
#[tauri::command]
pub async fn get_opportunities(
    state: State<'_, AppState>,
) -> Result<OpportunityBoard, String> {
    let list = state.market.get_opportunities().await;
    Ok(OpportunityBoard::from_list(&list))
}

#[tauri::command]
pub async fn get_opportunities_by_category(
    state: State<'_, AppState>,
    category: String,
) -> Result<Vec<Opportunity>, String> {
    let category = OpportunityCategory::parse(&category)
        .ok_or_else(|| format!("未知的机会类别: {}", category))?;
    let list = state.market.get_opportunities().await;
    Ok(filter_by_category(&list, category))
}
