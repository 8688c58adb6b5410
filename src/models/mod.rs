pub mod ai;
pub mod market;
pub mod news;
pub mod opportunity;
pub mod review;
pub mod settings;
