pub mod models;
pub mod services;
pub mod commands;
pub mod utils;

use std::sync::Arc;
use tauri::Manager;

use models::ai::AIConfig;
use models::market::MarketIndex;
use models::settings::AppSettings;
use services::ai_service::AIService;
use services::fetchers::MarketDataFetcher;
use services::market_data::MarketDataService;
use services::refresh::{LatestValue, RefreshRegistry};
use services::watchlist::WatchlistStore;

pub type LiveMarketData = MarketDataService<AIService>;

pub struct AppState {
    pub market: Arc<LiveMarketData>,
    pub settings: AppSettings,
    pub watchlist: Arc<WatchlistStore>,
    pub indices: Arc<LatestValue<Vec<MarketIndex>>>,
    pub refresh_tasks: RefreshRegistry,
}

impl AppState {
    pub fn new(config: AIConfig, settings: AppSettings) -> anyhow::Result<Self> {
        let service = AIService::new(config.clone())?;
        let market = MarketDataService::new(MarketDataFetcher::new(config, service));
        let watchlist = WatchlistStore::new(settings.default_watchlist.clone());
        Ok(Self {
            market: Arc::new(market),
            settings,
            watchlist: Arc::new(watchlist),
            indices: Arc::new(LatestValue::new()),
            refresh_tasks: RefreshRegistry::new(),
        })
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            let level = if cfg!(debug_assertions) {
                log::LevelFilter::Info
            } else {
                log::LevelFilter::Warn
            };
            app.handle().plugin(
                tauri_plugin_log::Builder::default()
                    .level(level)
                    .build(),
            )?;

            let config = AIConfig::from_env();
            if config.has_credential() {
                log::info!("AI 已配置: {:?} {}", config.provider, config.model_name);
            } else {
                log::info!("未配置 API_KEY，所有数据源将返回空/兜底数据");
            }

            app.manage(AppState::new(config, AppSettings::default())?);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::market_cmd::get_indices,
            commands::market_cmd::get_cached_indices,
            commands::market_cmd::get_overview,
            commands::market_cmd::get_market_status,
            commands::settings_cmd::get_settings,
            commands::settings_cmd::get_api_status,
            commands::watchlist_cmd::get_watchlist,
            commands::watchlist_cmd::refresh_watchlist,
            commands::watchlist_cmd::add_watchlist_stock,
            commands::watchlist_cmd::remove_watchlist_stock,
            commands::news_cmd::get_news,
            commands::review_cmd::get_daily_review,
            commands::opportunity_cmd::get_opportunities,
            commands::opportunity_cmd::get_opportunities_by_category,
            commands::refresh_cmd::start_auto_refresh,
            commands::refresh_cmd::stop_auto_refresh,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
