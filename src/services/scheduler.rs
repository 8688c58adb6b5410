use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A 股交易时段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    #[serde(rename = "weekend")]
    Weekend,
    #[serde(rename = "pre_market")]
    PreMarket,
    #[serde(rename = "call_auction")]
    CallAuction,
    #[serde(rename = "morning")]
    MorningSession,
    #[serde(rename = "lunch_break")]
    LunchBreak,
    #[serde(rename = "afternoon")]
    AfternoonSession,
    #[serde(rename = "closed")]
    Closed,
}

impl MarketPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MarketPhase::Weekend => "休市(周末)",
            MarketPhase::PreMarket => "盘前",
            MarketPhase::CallAuction => "竞价中",
            MarketPhase::MorningSession => "交易中(上午)",
            MarketPhase::LunchBreak => "午间休市",
            MarketPhase::AfternoonSession => "交易中(下午)",
            MarketPhase::Closed => "已收盘",
        }
    }

    pub fn is_trading(&self) -> bool {
        matches!(
            self,
            MarketPhase::CallAuction | MarketPhase::MorningSession | MarketPhase::AfternoonSession
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStatus {
    pub phase: MarketPhase,
    pub label: String,
    pub is_trading: bool,
}

pub struct TradingScheduler;

impl TradingScheduler {
    /// 状态栏用的时段判断（不考虑节假日），不影响数据拉取
    pub fn phase_at(now: NaiveDateTime) -> MarketPhase {
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketPhase::Weekend;
        }
        let time_val = now.hour() * 100 + now.minute();

        // 竞价 9:15-9:25，上午 9:30-11:30，下午 13:00-15:00
        if time_val < 915 {
            MarketPhase::PreMarket
        } else if time_val < 930 {
            MarketPhase::CallAuction
        } else if time_val <= 1130 {
            MarketPhase::MorningSession
        } else if time_val < 1300 {
            MarketPhase::LunchBreak
        } else if time_val <= 1500 {
            MarketPhase::AfternoonSession
        } else {
            MarketPhase::Closed
        }
    }

    pub fn market_status() -> MarketStatus {
        let phase = Self::phase_at(Local::now().naive_local());
        MarketStatus {
            phase,
            label: phase.label().to_string(),
            is_trading: phase.is_trading(),
        }
    }
}
