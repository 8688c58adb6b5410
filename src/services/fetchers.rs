use serde_json::Value;

use crate::models::ai::{AIConfig, GenerateOptions};
use crate::models::market::{MarketIndex, StockQuery, WatchlistQuote};
use crate::models::news::NewsItem;
use crate::models::opportunity::Opportunity;
use crate::models::review::{DailyReview, DailyReviewSnapshot};
use crate::services::ai_service::TextGenerator;
use crate::services::response_parser::{into_array, into_object, parse_ai_json};

/// 行情类抓取偏向事实，temperature 压低
const FACTUAL_TEMPERATURE: f64 = 0.1;
const REVIEW_TEMPERATURE: f64 = 0.2;
/// 明日机会本身带推测性质，适当放开
const OPPORTUNITY_TEMPERATURE: f64 = 0.3;
const MAX_NEWS_ITEMS: usize = 6;

/// 各类数据的抓取器：拼 prompt -> 调 AI -> 解析 -> 归一化。
/// 任何失败都降级为空结果，不向调用方抛错；不重试。
pub struct MarketDataFetcher<G> {
    config: AIConfig,
    generator: G,
}

impl<G: TextGenerator> MarketDataFetcher<G> {
    pub fn new(config: AIConfig, generator: G) -> Self {
        Self { config, generator }
    }

    pub fn is_available(&self) -> bool {
        self.config.has_credential()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 单次请求 + 解析，网络错误与解析失败同样处理
    async fn ask(&self, label: &str, prompt: &str, options: GenerateOptions) -> Option<Value> {
        match self.generator.generate(prompt, options).await {
            Ok(text) => parse_ai_json(&text),
            Err(e) => {
                log::error!("{} 请求失败: {}", label, e);
                None
            }
        }
    }

    async fn ask_records(&self, label: &str, prompt: &str, options: GenerateOptions) -> Vec<Value> {
        into_array(self.ask(label, prompt, options).await)
            .map(|items| items.into_iter().filter(|v| v.is_object()).collect())
            .unwrap_or_default()
    }

    /// 1. 四大指数实时行情
    pub async fn fetch_indices(&self) -> Vec<MarketIndex> {
        if !self.is_available() {
            return vec![];
        }
        let prompt = "Get the absolute latest REAL-TIME quotes for: 上证指数, 深证成指, 创业板指, 科创50.\n\
            Return JSON array: [{ \"name\": \"string\", \"code\": \"string\", \"value\": number, \"change\": number, \
            \"changePercent\": number, \"volume\": number (billions) }]";

        self.ask_records("指数行情", prompt, GenerateOptions::grounded(FACTUAL_TEMPERATURE))
            .await
            .iter()
            .map(MarketIndex::from_record)
            .collect()
    }

    /// 2. 自选股实时行情
    pub async fn fetch_watchlist_quotes(&self, stocks: &[StockQuery]) -> Vec<WatchlistQuote> {
        if !self.is_available() || stocks.is_empty() {
            return vec![];
        }
        let stock_list = stocks
            .iter()
            .map(|s| if s.name == s.code { s.code.clone() } else { format!("{}({})", s.name, s.code) })
            .collect::<Vec<_>>()
            .join(", ");

        let prompt = format!(
            "Find the LATEST REAL-TIME trading data (Price, Change%, Volume, Turnover Rate, Sector) for: {}.\n\
            \n\
            Return strictly a JSON array:\n\
            [{{\n  \"code\": \"string (stock code)\",\n  \"name\": \"string\",\n  \"price\": number,\n  \
            \"changePercent\": number,\n  \"changeAmount\": number,\n  \"rateOfChange\": number (estimated speed),\n  \
            \"volume\": number (hands),\n  \"turnover\": number (amount),\n  \"turnoverRate\": number (percent),\n  \
            \"volumeRatio\": number,\n  \"marketCap\": number (billions),\n  \"sector\": \"string (main industry)\",\n  \
            \"sectorChange\": number (sector change %)\n}}]",
            stock_list
        );

        self.ask_records("自选股行情", &prompt, GenerateOptions::grounded(FACTUAL_TEMPERATURE))
            .await
            .iter()
            .map(WatchlistQuote::from_record)
            .collect()
    }

    /// 3. 市场与个股快讯（带情绪判断）
    pub async fn fetch_news(&self, stock_names: &[String]) -> Vec<NewsItem> {
        if !self.is_available() {
            return vec![];
        }
        let prompt = format!(
            "Find the latest breaking news for A-Share market and these stocks: {}.\n\
            Return JSON array (max {} items):\n\
            [{{ \"id\": \"unique_id\", \"title\": \"string\", \"summary\": \"string\", \"relatedStocks\": [\"string\"], \
            \"sentiment\": \"positive\"|\"negative\"|\"neutral\", \"timestamp\": \"HH:MM\" }}]",
            stock_names.join(", "),
            MAX_NEWS_ITEMS
        );

        self.ask_records("情报快讯", &prompt, GenerateOptions::grounded_default())
            .await
            .iter()
            .take(MAX_NEWS_ITEMS)
            .map(NewsItem::from_record)
            .collect()
    }

    /// 4. 每日复盘：涨跌停统计、板块排行、涨停明细 + 文字点评
    pub async fn fetch_daily_review(&self) -> DailyReview {
        if !self.is_available() {
            return DailyReview::unavailable();
        }
        let prompt = "Review today's A-Share market data.\n\
            \n\
            1. Statistics: Limit Up Count, Limit Down Count, Limit Up Broken Count.\n\
            2. Sectors: Top 5 Gainers, Top 5 Losers, Top 5 Net Inflow, Top 5 Net Outflow.\n\
            3. **IMPORTANT**: List at least 15 significant Limit Up (ZhangTing) stocks today. Include their Name, Code, \
            Price, Sector, Consecutive Limit Ups (连板数), and Reason (Concept).\n\
            \n\
            Return JSON structure:\n\
            {\n  \"stats\": {\n    \"limitUpCount\": number,\n    \"limitUpBrokenCount\": number,\n    \
            \"limitDownCount\": number,\n    \
            \"topSectors\": [{\"name\": \"string\", \"change\": number, \"netInflow\": number}],\n    \
            \"bottomSectors\": [{\"name\": \"string\", \"change\": number, \"netInflow\": number}],\n    \
            \"inflowSectors\": [{\"name\": \"string\", \"change\": number, \"netInflow\": number}],\n    \
            \"outflowSectors\": [{\"name\": \"string\", \"change\": number, \"netInflow\": number}],\n    \
            \"limitUpList\": [{\"name\": \"string\", \"code\": \"string\", \"price\": number, \
            \"changePercent\": number (usually 10 or 20), \"sector\": \"string\", \
            \"consecutiveDays\": number (e.g., 1, 2, 3...), \"reason\": \"string (e.g. AI, Low Altitude)\"}]\n  },\n  \
            \"analysis\": \"Brief market analysis summary (max 150 words).\"\n}";

        let parsed = into_object(
            self.ask("每日复盘", prompt, GenerateOptions::grounded(REVIEW_TEMPERATURE)).await,
        );
        let Some(root) = parsed else {
            return DailyReview::failed();
        };
        let Some(stats) = root.get("stats").filter(|s| s.is_object()) else {
            log::warn!("每日复盘返回结构缺少 stats 对象");
            return DailyReview::failed();
        };

        DailyReview {
            data: DailyReviewSnapshot::from_stats(stats),
            analysis: root
                .get("analysis")
                .and_then(|a| a.as_str())
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// 5. 明日机会（短线/形态/长线）
    pub async fn fetch_opportunities(&self) -> Vec<Opportunity> {
        if !self.is_available() {
            return vec![];
        }
        let prompt = "Analyze the A-Share market for TOMORROW's trading opportunities.\n\
            \n\
            Identify at least 10-12 specific stock opportunities across these categories:\n\
            1. Short-term (Short): Hot concepts, recent limit-ups, active funds.\n\
            2. Pattern (Pattern): Technical breakouts (e.g. Cup and Handle, Moving Average Support).\n\
            3. Long-term (Long): Undervalued, high dividend, or policy support.\n\
            \n\
            Return strictly a JSON array:\n\
            [{\n  \"type\": \"short\" | \"pattern\" | \"long\",\n  \"stockName\": \"string\",\n  \
            \"stockCode\": \"string\",\n  \"description\": \"string (reason)\",\n  \
            \"score\": number (0-100 confidence),\n  \"tags\": [\"string\"]\n}]";

        self.ask_records("明日机会", prompt, GenerateOptions::grounded(OPPORTUNITY_TEMPERATURE))
            .await
            .iter()
            .filter_map(Opportunity::from_record)
            .enumerate()
            .map(|(i, mut opp)| {
                opp.id = format!("opp-{}", i);
                opp
            })
            .collect()
    }
}
