//! 数据访问层集成测试
//!
//! 用预置回复的 ScriptedGenerator 代替真实 AI 服务，不访问网络：
//!   cargo test --test test_market_data

use anyhow::anyhow;
use std::collections::VecDeque;
use std::sync::Mutex;

use app_lib::models::ai::{AIConfig, GenerateOptions};
use app_lib::models::market::{fallback_indices, WatchlistEntry};
use app_lib::models::news::Sentiment;
use app_lib::models::opportunity::OpportunityCategory;
use app_lib::models::review::{REVIEW_FAILED, REVIEW_UNAVAILABLE};
use app_lib::models::settings::default_watchlist;
use app_lib::services::ai_service::TextGenerator;
use app_lib::services::fetchers::MarketDataFetcher;
use app_lib::services::market_data::MarketDataService;
use app_lib::services::presentation::{filter_by_category, DailyReviewView, OpportunityBoard};
use app_lib::services::watchlist::WatchlistStore;

/// 按顺序返回预置回复，并记录每次调用的 prompt 与参数
#[derive(Default)]
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<(String, GenerateOptions)>>,
}

impl ScriptedGenerator {
    fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            calls: Mutex::new(vec![]),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            calls: Mutex::new(vec![]),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_options(&self) -> Option<GenerateOptions> {
        self.calls.lock().unwrap().last().map(|(_, o)| *o)
    }

    fn last_prompt(&self) -> String {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone()).unwrap_or_default()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push((prompt.to_string(), options));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Ok(String::new()),
        }
    }
}

fn configured() -> AIConfig {
    AIConfig {
        api_key: "test-key".to_string(),
        ..AIConfig::default()
    }
}

fn service(generator: ScriptedGenerator) -> MarketDataService<ScriptedGenerator> {
    MarketDataService::new(MarketDataFetcher::new(configured(), generator))
}

fn service_without_key(generator: ScriptedGenerator) -> MarketDataService<ScriptedGenerator> {
    MarketDataService::new(MarketDataFetcher::new(AIConfig::default(), generator))
}

fn calls(svc: &MarketDataService<ScriptedGenerator>) -> usize {
    svc.fetcher().generator().call_count()
}

// ==================== 指数 ====================

#[tokio::test]
async fn test_indices_empty_result_falls_back() {
    let svc = service(ScriptedGenerator::replying(&["[]"]));
    let indices = svc.get_indices().await;
    assert_eq!(indices, fallback_indices());
    assert_eq!(indices.len(), 4);
    assert_eq!(indices[0].name, "上证指数");
    assert_eq!(indices[0].value, 3050.23);
    assert_eq!(indices[3].code, "000688");
    assert_eq!(indices[3].change_percent, 0.96);
}

#[tokio::test]
async fn test_indices_fenced_reply_with_prose() {
    let reply = "根据最新搜索结果：\n```json\n[\
        {\"name\":\"上证指数\",\"code\":\"000001\",\"value\":3288.4,\"change\":\"-5.1\",\"changePercent\":-0.15,\"volume\":5120},\
        {\"name\":\"深证成指\",\"code\":\"399001\",\"value\":10201.3}\
        ]\n```";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let indices = svc.get_indices().await;

    assert_eq!(indices.len(), 2);
    assert_eq!(indices[0].value, 3288.4);
    assert_eq!(indices[0].change, -5.1);
    assert_eq!(indices[1].change_percent, 0.0);

    let options = svc.fetcher().generator().last_options().unwrap();
    assert!(options.search_enabled);
    assert_eq!(options.temperature, Some(0.1));
}

#[tokio::test]
async fn test_indices_service_error_falls_back() {
    let svc = service(ScriptedGenerator::failing("connection reset by peer"));
    assert_eq!(svc.get_indices().await, fallback_indices());
    assert_eq!(calls(&svc), 1);
}

#[tokio::test]
async fn test_indices_wrong_shape_falls_back() {
    let svc = service(ScriptedGenerator::replying(&["{\"indices\": []}"]));
    assert_eq!(svc.get_indices().await, fallback_indices());
}

#[tokio::test]
async fn test_indices_trailing_prose_after_json_falls_back() {
    // 只截首不截尾：完整数组后面跟着说明文字会解析失败，最终走兜底，不会 panic
    let reply = "[{\"name\":\"上证指数\",\"code\":\"000001\",\"value\":3300}]\n数据来源：公开网络。";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    assert_eq!(svc.get_indices().await, fallback_indices());
}

#[tokio::test]
async fn test_indices_without_credential_never_calls_service() {
    let svc = service_without_key(ScriptedGenerator::replying(&["[{\"name\":\"x\"}]"]));
    assert_eq!(svc.get_indices().await, fallback_indices());
    assert_eq!(calls(&svc), 0);
}

// ==================== 自选股 ====================

fn two_entries() -> Vec<WatchlistEntry> {
    default_watchlist().into_iter().take(2).collect()
}

#[tokio::test]
async fn test_watchlist_partial_reply_keeps_unmatched_entry() {
    let reply = "```json\n[{\"code\":\"600519\",\"name\":\"贵州茅台\",\"price\":1688.8,\"changePercent\":-1.02,\
        \"turnoverRate\":0.25,\"sector\":\"白酒\"}]\n```";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let input = two_entries();
    let output = svc.get_watchlist_data(&input).await;

    assert_eq!(output.len(), 2);
    assert_eq!(output[0].code, "600519");
    assert_eq!(output[0].price, 1688.8);
    assert_eq!(output[0].change_percent, -1.02);
    assert_eq!(output[0].turnover_rate, 0.25);
    // 模型没给的字段保持原值
    assert_eq!(output[0].market_cap, input[0].market_cap);
    assert_eq!(output[0].volume_ratio, input[0].volume_ratio);
    assert_eq!(output[1], input[1]);

    let prompt = svc.fetcher().generator().last_prompt();
    assert!(prompt.contains("贵州茅台(600519)"));
    assert!(prompt.contains("宁德时代(300750)"));
}

#[tokio::test]
async fn test_watchlist_empty_input_makes_no_call() {
    let svc = service(ScriptedGenerator::replying(&["[]"]));
    assert!(svc.get_watchlist_data(&[]).await.is_empty());
    assert_eq!(calls(&svc), 0);
}

#[tokio::test]
async fn test_watchlist_failure_returns_input_unchanged() {
    let svc = service(ScriptedGenerator::failing("timed out"));
    let input = two_entries();
    assert_eq!(svc.get_watchlist_data(&input).await, input);
}

#[tokio::test]
async fn test_watchlist_store_refresh_end_to_end() {
    let reply = "[{\"code\":\"300750\",\"price\":\"201.5\"}, {\"code\":\"002594\",\"name\":\"比亚迪\",\"price\":260}]";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let store = WatchlistStore::new(two_entries());
    store.add("002594").unwrap();

    let result = store.refresh(&svc).await;
    assert_eq!(result.generation, 1);
    let codes: Vec<&str> = result.data.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["600519", "300750", "002594"]);
    assert_eq!(result.data[1].price, 201.5);
    assert_eq!(result.data[2].name, "比亚迪");
    assert_eq!(result.data[2].price, 260.0);
    assert_eq!(result.data[2].sector, "加载中...");
}

// ==================== 快讯 ====================

#[tokio::test]
async fn test_news_caps_items_and_normalizes_sentiment() {
    let items: Vec<String> = (0..8)
        .map(|i| format!("{{\"id\":\"n{}\",\"title\":\"t{}\",\"sentiment\":\"{}\",\"relatedStocks\":[\"贵州茅台\"]}}", i, i, if i % 2 == 0 { "positive" } else { "mixed" }))
        .collect();
    let reply = format!("[{}]", items.join(","));
    let svc = service(ScriptedGenerator::replying(&[&reply]));
    let news = svc.get_news(&["贵州茅台".to_string()]).await;

    assert_eq!(news.len(), 6);
    assert_eq!(news[0].id, "n0");
    assert_eq!(news[0].sentiment, Sentiment::Positive);
    assert_eq!(news[1].sentiment, Sentiment::Neutral);
    assert_eq!(news[0].related_stocks, vec!["贵州茅台"]);

    let options = svc.fetcher().generator().last_options().unwrap();
    assert!(options.search_enabled);
    assert_eq!(options.temperature, None);
}

#[tokio::test]
async fn test_news_unparseable_reply_is_empty() {
    let svc = service(ScriptedGenerator::replying(&["今天没有重大新闻。"]));
    assert!(svc.get_news(&[]).await.is_empty());
}

// ==================== 每日复盘 ====================

#[tokio::test]
async fn test_review_missing_limit_up_list_defaults_empty() {
    let reply = "```json\n{\"stats\": {\"limitUpCount\": 62, \"limitUpBrokenCount\": 18, \"limitDownCount\": 5,\
        \"topSectors\": [{\"name\": \"机器人\", \"change\": 4.1, \"netInflow\": 3200}]},\
        \"analysis\": \"市场情绪回暖。\"}\n```";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let review = svc.get_daily_review_data().await;

    assert_eq!(review.data.limit_up_count, 62);
    assert!(review.data.limit_up_list.is_empty());
    assert!(review.data.bottom_sectors.is_empty());
    assert!(review.data.outflow_sectors.is_empty());
    assert_eq!(review.data.top_sectors[0].name, "机器人");
    assert_eq!(review.analysis, "市场情绪回暖。");

    let json = serde_json::to_value(&review).unwrap();
    assert_eq!(json["data"]["limit_up_list"], serde_json::json!([]));

    let options = svc.fetcher().generator().last_options().unwrap();
    assert_eq!(options.temperature, Some(0.2));
}

#[tokio::test]
async fn test_review_view_sorts_limit_up_table() {
    let reply = "{\"stats\": {\"limitUpCount\": 3, \"limitUpBrokenCount\": 1, \"limitUpList\": [\
        {\"name\": \"A\", \"consecutiveDays\": 1}, {\"name\": \"B\", \"consecutiveDays\": 4}, {\"name\": \"C\", \"consecutiveDays\": 2}]}}";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let view = DailyReviewView::from(svc.get_daily_review_data().await);

    let names: Vec<&str> = view.data.limit_up_list.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
    assert_eq!(view.broken_rate, 25);
    assert_eq!(view.analysis, "");
}

#[tokio::test]
async fn test_review_without_stats_is_failure_default() {
    let svc = service(ScriptedGenerator::replying(&["{\"analysis\": \"only text\"}"]));
    let review = svc.get_daily_review_data().await;
    assert_eq!(review.analysis, REVIEW_FAILED);
    assert_eq!(review.data.limit_up_count, 0);
    assert!(review.data.limit_up_list.is_empty());
}

#[tokio::test]
async fn test_review_without_credential() {
    let svc = service_without_key(ScriptedGenerator::default());
    let review = svc.get_daily_review_data().await;
    assert_eq!(review.analysis, REVIEW_UNAVAILABLE);
    assert!(review.data.top_sectors.is_empty());
    assert_eq!(calls(&svc), 0);
}

// ==================== 明日机会 ====================

#[tokio::test]
async fn test_opportunities_filter_into_three_panels() {
    let kinds = ["short", "pattern", "long"];
    let items: Vec<String> = (0..12)
        .map(|i| format!(
            "{{\"type\":\"{}\",\"stockName\":\"股票{}\",\"stockCode\":\"{:06}\",\"score\":{},\"tags\":[\"t{}\"]}}",
            kinds[i % 3], i, i, 60 + i, i
        ))
        .collect();
    let reply = format!("好的，以下是明日机会：\n[{}]", items.join(","));
    let svc = service(ScriptedGenerator::replying(&[&reply]));
    let list = svc.get_opportunities().await;

    assert_eq!(list.len(), 12);
    assert_eq!(list[0].id, "opp-0");
    assert_eq!(list[11].id, "opp-11");

    for (offset, category) in OpportunityCategory::ALL.iter().enumerate() {
        let filtered = filter_by_category(&list, *category);
        let names: Vec<String> = filtered.iter().map(|o| o.stock_name.clone()).collect();
        let expected: Vec<String> = (0..4).map(|k| format!("股票{}", offset + 3 * k)).collect();
        assert_eq!(names, expected);
    }

    let board = OpportunityBoard::from_list(&list);
    assert_eq!(board.short.len(), 4);
    assert_eq!(board.pattern.len(), 4);
    assert_eq!(board.long.len(), 4);

    let options = svc.fetcher().generator().last_options().unwrap();
    assert_eq!(options.temperature, Some(0.3));
}

#[tokio::test]
async fn test_opportunities_drop_unknown_category() {
    let reply = "[{\"type\":\"short\",\"stockName\":\"a\"},{\"type\":\"swing\",\"stockName\":\"b\"},\"junk\",{\"type\":\"long\",\"stockName\":\"c\"}]";
    let svc = service(ScriptedGenerator::replying(&[reply]));
    let list = svc.get_opportunities().await;
    let ids: Vec<&str> = list.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["opp-0", "opp-1"]);
    assert_eq!(list[1].stock_name, "c");
}
