pub mod market_cmd;
pub mod news_cmd;
pub mod opportunity_cmd;
pub mod refresh_cmd;
pub mod review_cmd;
pub mod settings_cmd;
pub mod watchlist_cmd;
