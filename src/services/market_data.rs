use crate::models::market::{fallback_indices, MarketIndex, StockQuery, WatchlistEntry, WatchlistQuote};
use crate::models::news::NewsItem;
use crate::models::opportunity::Opportunity;
use crate::models::review::DailyReview;
use crate::services::ai_service::TextGenerator;
use crate::services::fetchers::MarketDataFetcher;

/// 前端数据入口：在抓取器之上叠加兜底与合并策略
pub struct MarketDataService<G> {
    fetcher: MarketDataFetcher<G>,
}

impl<G: TextGenerator> MarketDataService<G> {
    pub fn new(fetcher: MarketDataFetcher<G>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &MarketDataFetcher<G> {
        &self.fetcher
    }

    /// 指数：拿不到实时数据时返回四大指数兜底值，保证前端始终有数据可画
    pub async fn get_indices(&self) -> Vec<MarketIndex> {
        let data = self.fetcher.fetch_indices().await;
        if data.is_empty() {
            log::info!("指数实时数据为空，使用兜底数据");
            return fallback_indices();
        }
        data
    }

    /// 自选股：按 code 或 name 匹配并覆盖行情，条目数量与顺序保持不变
    pub async fn get_watchlist_data(&self, current: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
        if current.is_empty() {
            return vec![];
        }
        let queries: Vec<StockQuery> = current.iter().map(StockQuery::from).collect();
        let quotes = self.fetcher.fetch_watchlist_quotes(&queries).await;
        merge_watchlist(current, &quotes)
    }

    /// 复盘：各列表由类型保证存在（缺失时为空）
    pub async fn get_daily_review_data(&self) -> DailyReview {
        self.fetcher.fetch_daily_review().await
    }

    pub async fn get_news(&self, stock_names: &[String]) -> Vec<NewsItem> {
        self.fetcher.fetch_news(stock_names).await
    }

    pub async fn get_opportunities(&self) -> Vec<Opportunity> {
        self.fetcher.fetch_opportunities().await
    }
}

/// 每个已有条目取第一条 code 或 name 相同的行情覆盖；没匹配上的原样保留
pub fn merge_watchlist(current: &[WatchlistEntry], quotes: &[WatchlistQuote]) -> Vec<WatchlistEntry> {
    current
        .iter()
        .map(|entry| match quotes.iter().find(|q| entry.matches(q)) {
            Some(quote) => entry.overlay(quote),
            None => entry.clone(),
        })
        .collect()
}
