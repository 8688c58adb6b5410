use serde::{Deserialize, Serialize};

use crate::models::opportunity::{Opportunity, OpportunityCategory};
use crate::models::review::{DailyReview, DailyReviewSnapshot, LimitUpStock};

/// 涨停表按连板数降序（稳定排序，同连板数保持原顺序）
pub fn sort_limit_up_by_streak(list: &mut [LimitUpStock]) {
    list.sort_by(|a, b| b.consecutive_days.cmp(&a.consecutive_days));
}

/// 炸板率 = 炸板 / (涨停 + 炸板)，四舍五入到整数百分比；无涨停时为 0
pub fn broken_rate_percent(limit_up_count: u32, broken_count: u32) -> u32 {
    if limit_up_count == 0 {
        return 0;
    }
    let total = f64::from(limit_up_count) + f64::from(broken_count);
    (f64::from(broken_count) / total * 100.0).round() as u32
}

pub fn filter_by_category(opportunities: &[Opportunity], category: OpportunityCategory) -> Vec<Opportunity> {
    opportunities
        .iter()
        .filter(|o| o.category == category)
        .cloned()
        .collect()
}

/// 复盘页展示数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReviewView {
    pub data: DailyReviewSnapshot,
    pub analysis: String,
    pub broken_rate: u32,
}

impl From<DailyReview> for DailyReviewView {
    fn from(review: DailyReview) -> Self {
        let mut data = review.data;
        sort_limit_up_by_streak(&mut data.limit_up_list);
        let broken_rate = broken_rate_percent(data.limit_up_count, data.limit_up_broken_count);
        Self {
            data,
            analysis: review.analysis,
            broken_rate,
        }
    }
}

/// 明日机会三栏
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunityBoard {
    pub short: Vec<Opportunity>,
    pub pattern: Vec<Opportunity>,
    pub long: Vec<Opportunity>,
}

impl OpportunityBoard {
    pub fn from_list(opportunities: &[Opportunity]) -> Self {
        Self {
            short: filter_by_category(opportunities, OpportunityCategory::Short),
            pattern: filter_by_category(opportunities, OpportunityCategory::Pattern),
            long: filter_by_category(opportunities, OpportunityCategory::Long),
        }
    }
}
