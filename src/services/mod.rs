pub mod ai_service;
pub mod fetchers;
pub mod market_data;
pub mod presentation;
pub mod refresh;
pub mod response_parser;
pub mod scheduler;
pub mod watchlist;
